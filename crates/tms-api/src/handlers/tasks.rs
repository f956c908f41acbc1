//! Task CRUD endpoints
//!
//! All routes here sit behind the authentication gate; deletion is
//! additionally restricted to the ADMIN role at the router level.

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tms_core::{Page, PageRequest, Priority, Task, TaskData, TaskStatus, TmsError};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Task payload for create and full-replace update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TaskRequest {
    #[validate(custom(function = "validate_title"))]
    #[schema(example = "Write the quarterly report")]
    pub title: String,

    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: Option<String>,

    #[validate(required(message = "Status is required"))]
    #[schema(value_type = Option<String>, example = "OPEN")]
    pub status: Option<TaskStatus>,

    #[validate(required(message = "Priority is required"))]
    #[schema(value_type = Option<String>, example = "MEDIUM")]
    pub priority: Option<Priority>,

    /// Account id of the assignee; omit to leave the task unassigned
    pub assigned_to_id: Option<i64>,
}

// A blank title and an over-long title carry different messages, so both
// checks live in one custom validator instead of stacked attributes.
fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Title is required".into());
        return Err(err);
    }
    if title.chars().count() > 200 {
        let mut err = ValidationError::new("length");
        err.message = Some("Title cannot exceed 200 characters".into());
        return Err(err);
    }
    Ok(())
}

impl TaskRequest {
    /// Convert into store data. Status and priority are always present
    /// once validation has passed.
    fn into_data(self) -> TaskData {
        TaskData {
            title: self.title,
            description: self.description,
            status: self.status.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            assigned_to: self.assigned_to_id,
        }
    }
}

/// Task as returned to clients, with the assignee's username resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "OPEN")]
    pub status: TaskStatus,
    #[schema(value_type = String, example = "MEDIUM")]
    pub priority: Priority,
    pub assigned_to_id: Option<i64>,
    pub assigned_to_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of tasks plus the total count across all pages
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskPage {
    pub items: Vec<TaskResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

async fn to_response(state: &AppState, task: Task) -> Result<TaskResponse, AppError> {
    let assigned_to_username = match task.assigned_to {
        Some(user_id) => state
            .users
            .find_by_id(user_id)
            .await?
            .map(|user| user.username),
        None => None,
    };

    Ok(TaskResponse {
        id: task.id,
        title: task.title,
        description: task.description,
        status: task.status,
        priority: task.priority,
        assigned_to_id: task.assigned_to,
        assigned_to_username,
        created_at: task.created_at,
        updated_at: task.updated_at,
    })
}

async fn page_to_response(state: &AppState, tasks: Page<Task>) -> Result<TaskPage, AppError> {
    let Page {
        items,
        total,
        page,
        page_size,
    } = tasks;

    let mut out = Vec::with_capacity(items.len());
    for task in items {
        out.push(to_response(state, task).await?);
    }

    Ok(TaskPage {
        items: out,
        total,
        page,
        page_size,
    })
}

async fn ensure_assignee_exists(state: &AppState, assignee: Option<i64>) -> Result<(), AppError> {
    if let Some(user_id) = assignee {
        if state.users.find_by_id(user_id).await?.is_none() {
            return Err(TmsError::user_not_found(user_id).into());
        }
    }
    Ok(())
}

/// List all tasks, one page at a time
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "tasks",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("page_size" = Option<u32>, Query, description = "Items per page, capped at 100")
    ),
    responses(
        (status = 200, description = "Page of tasks", body = TaskPage),
        (status = 401, description = "Not authenticated", body = crate::error::ApiError)
    )
)]
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let tasks = state.tasks.list(page).await?;
    Ok(Json(page_to_response(&state, tasks).await?))
}

/// Get a single task by id
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    responses(
        (status = 200, description = "Task details", body = TaskResponse),
        (status = 404, description = "Task not found", body = crate::error::ApiError)
    )
)]
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let task = state
        .tasks
        .find_by_id(id)
        .await?
        .ok_or_else(|| TmsError::task_not_found(id))?;
    Ok(Json(to_response(&state, task).await?))
}

/// List the tasks assigned to one account
///
/// An unknown account id yields an empty page rather than a 404.
#[utoipa::path(
    get,
    path = "/api/tasks/user/{user_id}",
    tag = "tasks",
    params(
        ("user_id" = i64, Path, description = "Assignee account id"),
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("page_size" = Option<u32>, Query, description = "Items per page, capped at 100")
    ),
    responses(
        (status = 200, description = "Page of tasks assigned to the account", body = TaskPage)
    )
)]
pub async fn list_tasks_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let tasks = state.tasks.list_by_assignee(user_id, page).await?;
    Ok(Json(page_to_response(&state, tasks).await?))
}

/// Create a task
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "tasks",
    request_body = TaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Validation failure", body = crate::error::ApiError),
        (status = 404, description = "Assignee does not exist", body = crate::error::ApiError)
    )
)]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<CurrentUser>,
    Json(payload): Json<TaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();
    payload.validate()?;
    ensure_assignee_exists(&state, payload.assigned_to_id).await?;

    let task = state.tasks.create(payload.into_data()).await?;
    tracing::info!(task_id = task.id, created_by = %identity.username, "Task created");

    Ok((StatusCode::CREATED, Json(to_response(&state, task).await?)))
}

/// Replace every mutable field of a task
///
/// Omitting `assigned_to_id` clears the assignee.
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, description = "Validation failure", body = crate::error::ApiError),
        (status = 404, description = "Task or assignee not found", body = crate::error::ApiError)
    )
)]
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<TaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();
    payload.validate()?;
    ensure_assignee_exists(&state, payload.assigned_to_id).await?;

    let task = state
        .tasks
        .update(id, payload.into_data())
        .await?
        .ok_or_else(|| TmsError::task_not_found(id))?;
    Ok(Json(to_response(&state, task).await?))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task id")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 403, description = "Caller lacks the ADMIN role", body = crate::error::ApiError),
        (status = 404, description = "Task not found", body = crate::error::ApiError)
    )
)]
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    if !state.tasks.delete(id).await? {
        return Err(TmsError::task_not_found(id).into());
    }

    tracing::info!(task_id = id, deleted_by = %identity.username, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> TaskRequest {
        TaskRequest {
            title: "Write the report".to_string(),
            description: Some("Quarterly numbers".to_string()),
            status: Some(TaskStatus::Open),
            priority: Some(Priority::High),
            assigned_to_id: None,
        }
    }

    fn first_message(errors: &validator::ValidationErrors, field: &str) -> String {
        errors.field_errors()[field][0]
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut request = valid_request();
        request.title = "   ".to_string();

        let errors = request.validate().unwrap_err();
        assert_eq!(first_message(&errors, "title"), "Title is required");
    }

    #[test]
    fn test_overlong_title_rejected() {
        let mut request = valid_request();
        request.title = "x".repeat(201);

        let errors = request.validate().unwrap_err();
        assert_eq!(
            first_message(&errors, "title"),
            "Title cannot exceed 200 characters"
        );
    }

    #[test]
    fn test_title_boundary_accepted() {
        let mut request = valid_request();
        request.title = "x".repeat(200);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_overlong_description_rejected() {
        let mut request = valid_request();
        request.description = Some("d".repeat(2001));

        let errors = request.validate().unwrap_err();
        assert_eq!(
            first_message(&errors, "description"),
            "Description cannot exceed 2000 characters"
        );
    }

    #[test]
    fn test_missing_status_and_priority_rejected() {
        let mut request = valid_request();
        request.status = None;
        request.priority = None;

        let errors = request.validate().unwrap_err();
        assert_eq!(first_message(&errors, "status"), "Status is required");
        assert_eq!(first_message(&errors, "priority"), "Priority is required");
    }

    #[test]
    fn test_into_data_maps_every_field() {
        let mut request = valid_request();
        request.assigned_to_id = Some(7);

        let data = request.into_data();
        assert_eq!(data.title, "Write the report");
        assert_eq!(data.description.as_deref(), Some("Quarterly numbers"));
        assert_eq!(data.status, TaskStatus::Open);
        assert_eq!(data.priority, Priority::High);
        assert_eq!(data.assigned_to, Some(7));
    }

    #[test]
    fn test_response_wire_shape() {
        let response = TaskResponse {
            id: 3,
            title: "Fix the build".to_string(),
            description: None,
            status: TaskStatus::InProgress,
            priority: Priority::Medium,
            assigned_to_id: Some(5),
            assigned_to_username: Some("bob".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["priority"], "MEDIUM");
        assert_eq!(json["assigned_to_id"], 5);
        assert_eq!(json["assigned_to_username"], "bob");
        assert!(json["description"].is_null());
    }

    #[test]
    fn test_request_accepts_wire_casing() {
        let request: TaskRequest = serde_json::from_str(
            r#"{"title": "t", "status": "COMPLETED", "priority": "LOW"}"#,
        )
        .unwrap();
        assert_eq!(request.status, Some(TaskStatus::Completed));
        assert_eq!(request.priority, Some(Priority::Low));
        assert_eq!(request.assigned_to_id, None);
    }
}
