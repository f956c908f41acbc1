//! User management endpoints
//!
//! Listing and deletion are ADMIN-only; the router applies that gate.
//! Profile updates deliberately touch the email alone, since username and
//! password changes would need their own re-authentication flow.

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tms_core::{TmsError, User};
use utoipa::ToSchema;
use validator::Validate;

/// Account as returned to clients. The password hash never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Comma-separated role labels, e.g. `"USER,ADMIN"`
    pub roles: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            roles: user.roles,
            created_at: user.created_at,
        }
    }
}

/// Profile update payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(
        email(message = "Email must be valid"),
        length(max = 50, message = "Email cannot exceed 50 characters")
    )]
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// List every account
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "All accounts, ordered by id", body = [UserResponse]),
        (status = 403, description = "Caller lacks the ADMIN role", body = crate::error::ApiError)
    )
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let users = state.users.list_all().await?;
    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(response))
}

/// Get a single account by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "Account id")
    ),
    responses(
        (status = 200, description = "Account details", body = UserResponse),
        (status = 404, description = "Account not found", body = crate::error::ApiError)
    )
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| TmsError::user_not_found(id))?;
    Ok(Json(UserResponse::from(user)))
}

/// Update an account's email
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "Account id")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 400, description = "Invalid email", body = crate::error::ApiError),
        (status = 404, description = "Account not found", body = crate::error::ApiError)
    )
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();
    payload.validate()?;

    let user = state
        .users
        .update_email(id, &payload.email)
        .await?
        .ok_or_else(|| TmsError::user_not_found(id))?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete an account
///
/// Tasks assigned to the account stay behind with their assignee cleared.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "Account id")
    ),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 403, description = "Caller lacks the ADMIN role", body = crate::error::ApiError),
        (status = 404, description = "Account not found", body = crate::error::ApiError)
    )
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    if !state.users.delete(id).await? {
        return Err(TmsError::user_not_found(id).into());
    }

    tracing::info!(user_id = id, deleted_by = %identity.username, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
