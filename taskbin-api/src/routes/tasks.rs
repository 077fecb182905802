/// Task endpoints
///
/// Every handler runs behind the bearer-token layer and receives the
/// verified caller identity as an [`AuthContext`] extension; the user id is
/// passed explicitly into each store call. Mutations keyed to a task the
/// caller does not own match zero rows and come back as 404.
///
/// # Endpoints
///
/// - `POST /tasks` - Create a task
/// - `GET /tasks` - List own tasks, newest first
/// - `DELETE /tasks/:id` - Delete a task
/// - `PUT /tasks/:id/title` - Rename a task
/// - `PUT /tasks/:id/description` - Replace a task's description
/// - `PUT /tasks/:id/status` - Change a task's status

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskbin_shared::models::task::{CreateTask, Task};
use uuid::Uuid;

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
}

/// Create task response
#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub status: String,

    /// Id of the new task, so the caller can address it
    pub id: Uuid,
}

/// One task in a listing
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: String,
}

/// Outcome body for mutations
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTitleRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDescriptionRequest {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Create a task owned by the caller
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<CreateTaskResponse>> {
    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: auth.user_id,
            title: req.title,
            description: req.description,
        },
    )
    .await?;

    tracing::debug!(task_id = %task.id, user_id = %auth.user_id, "Task created");

    Ok(Json(CreateTaskResponse {
        status: "ok".to_string(),
        id: task.id,
    }))
}

/// List the caller's tasks, newest first
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = Task::list_by_user(&state.db, auth.user_id).await?;

    Ok(Json(
        tasks
            .into_iter()
            .map(|task| TaskResponse {
                id: task.id,
                title: task.title,
                description: task.description,
                status: task.status,
            })
            .collect(),
    ))
}

/// Delete a task
///
/// # Errors
///
/// - `404 Not Found`: no task with this id belongs to the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<StatusResponse>> {
    let deleted = Task::delete(&state.db, auth.user_id, task_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(StatusResponse {
        status: "deleted".to_string(),
    }))
}

/// Rename a task
///
/// # Errors
///
/// - `404 Not Found`: no task with this id belongs to the caller
pub async fn update_title(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateTitleRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let updated = Task::update_title(&state.db, auth.user_id, task_id, &req.title).await?;

    if !updated {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(StatusResponse {
        status: "updated".to_string(),
    }))
}

/// Replace a task's description
///
/// # Errors
///
/// - `404 Not Found`: no task with this id belongs to the caller
pub async fn update_description(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateDescriptionRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let updated =
        Task::update_description(&state.db, auth.user_id, task_id, &req.description).await?;

    if !updated {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(StatusResponse {
        status: "updated".to_string(),
    }))
}

/// Change a task's status
///
/// Any string is accepted; there is no enumerated status set.
///
/// # Errors
///
/// - `404 Not Found`: no task with this id belongs to the caller
pub async fn update_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let updated = Task::update_status(&state.db, auth.user_id, task_id, &req.status).await?;

    if !updated {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(StatusResponse {
        status: "updated".to_string(),
    }))
}
