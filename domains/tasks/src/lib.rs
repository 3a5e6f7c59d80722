//! Tasks domain: scheduled to-do items owned by users

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Task, TaskStatus};

// Re-export repository types
pub use repository::{CreateOutcome, TaskRepository, TasksRepositories};

// Re-export API types
pub use api::routes;
pub use api::TasksState;
