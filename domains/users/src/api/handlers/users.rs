//! User management API handlers
//!
//! - POST /users - Sign up
//! - POST /users/login - Exchange credentials for an auth token
//! - GET /users/{userId} - Get a user
//! - GET /users - List users (keyset pagination)
//! - DELETE /users/{userId} - Delete own account

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use todo_auth::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use todo_auth::{hash_password, verify_password, AuthUser};
use todo_common::{
    parse_path_id, CursorPagination, Error, QueryParams, Result, ValidatedJson,
};
use validator::Validate;

use crate::api::middleware::UsersState;
use crate::domain::entities::User;

const USER_NOT_FOUND: &str = "user does not exist";
const INVALID_CREDENTIALS: &str = "invalid credentials";
// validator's length bounds are u64; mirror the shared usize limits.
const MIN_PASSWORD_LEN_U64: u64 = MIN_PASSWORD_LENGTH as u64;
const MAX_PASSWORD_LEN_U64: u64 = MAX_PASSWORD_LENGTH as u64;

/// Request for creating a user
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LEN_U64, max = MAX_PASSWORD_LEN_U64))]
    pub password: String,
}

/// Request for logging in
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// `{"status","message","user"}` envelope
#[derive(Debug, Serialize)]
pub struct UserApiResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub user: User,
}

/// `{"status","message","users"}` envelope
#[derive(Debug, Serialize)]
pub struct UsersApiResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub users: Vec<User>,
}

/// Login envelope carrying the issued token
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub user: User,
    pub auth_token: String,
}

fn user_response(message: &'static str, user: User) -> Json<UserApiResponse> {
    Json(UserApiResponse {
        status: "success",
        message,
        user,
    })
}

/// POST /users - Create a user
pub async fn create_user(
    State(state): State<UsersState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserApiResponse>)> {
    if state.repos.users.find_by_email(&req.email).await?.is_some() {
        return Err(Error::Conflict(format!(
            "user with email {} already exist",
            req.email
        )));
    }

    let password_hash = hash_password(&req.password).await?;
    let user = User::new(req.first_name, req.last_name, &req.email, password_hash)?;
    let created = state.repos.users.create(&user).await?;

    tracing::info!(user_id = %created.id, "User created");

    Ok((
        StatusCode::CREATED,
        user_response("user created successfully", created),
    ))
}

/// POST /users/login - Verify credentials and issue a token
pub async fn login_user(
    State(state): State<UsersState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = state
        .repos
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| Error::Authentication(INVALID_CREDENTIALS.to_string()))?;

    let password_ok = verify_password(&req.password, &user.password_hash)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(user_id = %user.id, error = %e, "Stored password hash is unusable");
            false
        });
    if !password_ok {
        tracing::debug!(user_id = %user.id, "Password authentication failed");
        return Err(Error::Authentication(INVALID_CREDENTIALS.to_string()));
    }

    let auth_token = state
        .auth
        .issue_token(user.id.to_string())
        .map_err(|e| Error::Internal(e.to_string()))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        status: "success",
        message: "user login successfully",
        user,
        auth_token,
    }))
}

/// GET /users/{userId} - Get a single user
pub async fn get_user(
    AuthUser(_ctx): AuthUser,
    State(state): State<UsersState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserApiResponse>> {
    let user_id = parse_path_id(&user_id, USER_NOT_FOUND)?;

    let user = state
        .repos
        .users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(user_response("user retrieved successfully", user))
}

/// GET /users - List users
pub async fn list_users(
    AuthUser(_ctx): AuthUser,
    State(state): State<UsersState>,
    QueryParams(pagination): QueryParams<CursorPagination>,
) -> Result<Json<UsersApiResponse>> {
    let users = state
        .repos
        .users
        .list(pagination.after(), pagination.limit())
        .await?;

    Ok(Json(UsersApiResponse {
        status: "success",
        message: "users retrieved successfully",
        users,
    }))
}

/// DELETE /users/{userId} - Delete the caller's own account
pub async fn delete_user(
    AuthUser(ctx): AuthUser,
    State(state): State<UsersState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserApiResponse>> {
    let user_id = parse_path_id(&user_id, USER_NOT_FOUND)?;

    if !ctx.is_user(user_id) {
        return Err(Error::Authorization(
            "you can only delete your own account".to_string(),
        ));
    }

    let deleted = state
        .repos
        .users
        .delete(user_id)
        .await?
        .ok_or_else(|| Error::NotFound(USER_NOT_FOUND.to_string()))?;

    tracing::info!(user_id = %deleted.id, "User deleted");

    Ok(user_response("user deleted successfully", deleted))
}
