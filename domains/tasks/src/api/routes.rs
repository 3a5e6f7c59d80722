//! Route definitions for Tasks domain API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use todo_auth::{require_auth, AuthBackend};

use super::handlers::tasks;
use super::middleware::TasksState;

/// Create all Tasks domain API routes; every route sits behind the authorization gate
pub fn routes(auth: AuthBackend) -> Router<TasksState> {
    Router::new()
        .route("/tasks", post(tasks::create_task))
        .route(
            "/tasks/{task_id}",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/users/{user_id}/tasks", get(tasks::list_user_tasks))
        .route_layer(middleware::from_fn_with_state(auth, require_auth))
}
