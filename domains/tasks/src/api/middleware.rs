//! Tasks domain state and auth backend integration

use crate::TasksRepositories;
use axum::extract::FromRef;
use todo_auth::AuthBackend;
use todo_users::UserRepository;

/// Application state for the Tasks domain
#[derive(Clone)]
pub struct TasksState {
    pub repos: TasksRepositories,
    /// Owner lookups for the per-user task listing
    pub users: UserRepository,
    pub auth: AuthBackend,
}

impl FromRef<TasksState> for AuthBackend {
    fn from_ref(state: &TasksState) -> Self {
        state.auth.clone()
    }
}
