// ============================================================================
// TaskHub API - Task Handlers
// File: crates/taskhub-api/src/handlers/tasks.rs
// ============================================================================

use axum::{extract::State, http::StatusCode, Json};

use taskhub_core::domain::{Task, TaskFilter, TaskPage};

use crate::dto::{StatusRequest, TaskListQuery, TaskRequest};
use crate::error::ApiError;
use crate::extract::{TaskId, ValidJson, ValidQuery};
use crate::middleware::CurrentUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidJson(payload): ValidJson<TaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.tasks.create(current.user_id, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidQuery(query): ValidQuery<TaskListQuery>,
) -> Result<Json<TaskPage>, ApiError> {
    let filter = TaskFilter::from(query);
    let page = state.tasks.list(current.user_id, &filter).await?;
    Ok(Json(page))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    current: CurrentUser,
    TaskId(id): TaskId,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.tasks.get(id, current.user_id).await?))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    current: CurrentUser,
    TaskId(id): TaskId,
    ValidJson(payload): ValidJson<TaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = state.tasks.update(id, current.user_id, payload.into()).await?;
    Ok(Json(task))
}

/// PATCH /api/tasks/{id}/status
pub async fn update_task_status(
    State(state): State<AppState>,
    current: CurrentUser,
    TaskId(id): TaskId,
    ValidJson(payload): ValidJson<StatusRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .tasks
        .update_status(id, current.user_id, payload.status)
        .await?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    current: CurrentUser,
    TaskId(id): TaskId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.tasks.delete(id, current.user_id).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
