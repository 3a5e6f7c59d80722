//! Task management API handlers
//!
//! Every handler runs behind the authorization gate. A task that belongs to
//! someone else is reported exactly like a task that does not exist.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_auth::{AuthContext, AuthUser};
use todo_common::{
    parse_path_id, CursorPagination, Error, QueryParams, Result, ValidatedJson,
};
use validator::Validate;

use crate::api::middleware::TasksState;
use crate::domain::entities::{Task, TaskStatus};
use crate::repository::CreateOutcome;

const TASK_NOT_FOUND: &str = "task does not exist";
const USER_NOT_FOUND: &str = "user does not exist";

/// Request for creating a task. The owner is always the caller.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub start_time: DateTime<Utc>,

    pub end_time: DateTime<Utc>,
}

/// Request for updating a task
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    pub status: TaskStatus,
}

/// `{"status","message","task"}` envelope
#[derive(Debug, Serialize)]
pub struct TaskApiResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub task: Task,
}

/// `{"status","message","tasks"}` envelope
#[derive(Debug, Serialize)]
pub struct TasksApiResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub tasks: Vec<Task>,
}

fn task_response(message: &'static str, task: Task) -> Json<TaskApiResponse> {
    Json(TaskApiResponse {
        status: "success",
        message,
        task,
    })
}

fn overlap_message(existing: &Task) -> String {
    format!(
        "this task is overlapping with {}, pick another time",
        existing.title
    )
}

/// Load a task the caller owns
async fn find_owned_task(state: &TasksState, ctx: &AuthContext, raw_id: &str) -> Result<Task> {
    let task_id = parse_path_id(raw_id, TASK_NOT_FOUND)?;
    let caller = ctx.user_id()?;

    state
        .repos
        .tasks
        .find(task_id)
        .await?
        .filter(|task| task.is_owned_by(caller))
        .ok_or_else(|| Error::NotFound(TASK_NOT_FOUND.to_string()))
}

/// POST /tasks - Create a task for the caller
pub async fn create_task(
    AuthUser(ctx): AuthUser,
    State(state): State<TasksState>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskApiResponse>)> {
    let owner = ctx.user_id()?;
    let task = Task::new(owner, req.title, req.start_time, req.end_time)?;

    match state.repos.tasks.create_unless_overlapping(&task).await? {
        CreateOutcome::Created(created) => {
            tracing::info!(task_id = %created.id, user_id = %owner, "Task created");
            Ok((
                StatusCode::CREATED,
                task_response("task created successfully", created),
            ))
        }
        CreateOutcome::OwnerNotFound => Err(Error::NotFound(USER_NOT_FOUND.to_string())),
        CreateOutcome::Overlapping(existing) => {
            tracing::debug!(
                user_id = %owner,
                overlapping_task_id = %existing.id,
                "Rejected overlapping task"
            );
            Err(Error::Validation(overlap_message(&existing)))
        }
    }
}

/// GET /tasks/{taskId} - Get one of the caller's tasks
pub async fn get_task(
    AuthUser(ctx): AuthUser,
    State(state): State<TasksState>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskApiResponse>> {
    let task = find_owned_task(&state, &ctx, &task_id).await?;
    Ok(task_response("task retrieved successfully", task))
}

/// GET /users/{userId}/tasks - List the caller's tasks
pub async fn list_user_tasks(
    AuthUser(ctx): AuthUser,
    State(state): State<TasksState>,
    Path(user_id): Path<String>,
    QueryParams(pagination): QueryParams<CursorPagination>,
) -> Result<Json<TasksApiResponse>> {
    let user_id = parse_path_id(&user_id, USER_NOT_FOUND)?;

    if !ctx.is_user(user_id) {
        return Err(Error::Authorization(
            "you can only list your own tasks".to_string(),
        ));
    }

    if state.users.get_by_id(user_id).await?.is_none() {
        return Err(Error::NotFound(USER_NOT_FOUND.to_string()));
    }

    let tasks = state
        .repos
        .tasks
        .list_by_user(user_id, pagination.after(), pagination.limit())
        .await?;

    Ok(Json(TasksApiResponse {
        status: "success",
        message: "tasks retrieved successfully",
        tasks,
    }))
}

/// PATCH /tasks/{taskId} - Update task status
pub async fn update_task(
    AuthUser(ctx): AuthUser,
    State(state): State<TasksState>,
    Path(task_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateTaskRequest>,
) -> Result<Json<TaskApiResponse>> {
    let task = find_owned_task(&state, &ctx, &task_id).await?;

    let updated = state
        .repos
        .tasks
        .update_status(task.id, req.status)
        .await?
        .ok_or_else(|| Error::NotFound(TASK_NOT_FOUND.to_string()))?;

    tracing::info!(task_id = %updated.id, status = %updated.status, "Task updated");

    Ok(task_response("task updated successfully", updated))
}

/// DELETE /tasks/{taskId} - Delete one of the caller's tasks
pub async fn delete_task(
    AuthUser(ctx): AuthUser,
    State(state): State<TasksState>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskApiResponse>> {
    let task = find_owned_task(&state, &ctx, &task_id).await?;

    let deleted = state
        .repos
        .tasks
        .delete(task.id)
        .await?
        .ok_or_else(|| Error::NotFound(TASK_NOT_FOUND.to_string()))?;

    tracing::info!(task_id = %deleted.id, "Task deleted");

    Ok(task_response("task deleted successfully", deleted))
}
