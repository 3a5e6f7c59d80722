//! Route definitions for Users domain API

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use todo_auth::{require_auth, AuthBackend};

use super::handlers::users;
use super::middleware::UsersState;

/// Sign-up and login, reachable without a token
fn public_routes() -> Router<UsersState> {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users/login", post(users::login_user))
}

/// Routes behind the authorization gate
fn protected_routes() -> Router<UsersState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route(
            "/users/{user_id}",
            get(users::get_user).delete(users::delete_user),
        )
}

/// Create all Users domain API routes
pub fn routes(auth: AuthBackend) -> Router<UsersState> {
    Router::new().merge(public_routes()).merge(
        protected_routes().route_layer(middleware::from_fn_with_state(auth, require_auth)),
    )
}
