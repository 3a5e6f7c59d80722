//! Repository implementations for Tasks domain

pub mod tasks;

use sqlx::PgPool;

pub use tasks::{CreateOutcome, TaskRepository};

/// Combined repository access for the Tasks domain
#[derive(Clone)]
pub struct TasksRepositories {
    pub tasks: TaskRepository,
}

impl TasksRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            tasks: TaskRepository::new(pool),
        }
    }
}
