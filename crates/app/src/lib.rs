//! To-do API application composition root
//!
//! Composes the domain routers into a single application.

use axum::Router;
use sqlx::PgPool;
use todo_auth::{AuthBackend, AuthConfig};
use todo_common::Config;
use todo_tasks::{TasksRepositories, TasksState};
use todo_users::{UserRepository, UsersRepositories, UsersState};

/// Create the main application router with all routes
///
/// Fails when the token secret is unusable, before anything is served.
pub fn create_app(config: &Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let auth = AuthBackend::new(&AuthConfig::from(config))
        .map_err(|e| anyhow::anyhow!("Invalid auth configuration: {}", e))?;

    let users_state = UsersState {
        repos: UsersRepositories::new(pool.clone()),
        auth: auth.clone(),
    };

    let tasks_state = TasksState {
        repos: TasksRepositories::new(pool.clone()),
        users: UserRepository::new(pool),
        auth: auth.clone(),
    };

    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(todo_users::routes(auth.clone()).with_state(users_state))
        .merge(todo_tasks::routes(auth).with_state(tasks_state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
