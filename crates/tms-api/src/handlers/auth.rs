//! Authentication endpoints
//!
//! Registration and login both return a signed token, so a fresh account
//! can call protected routes without a second round trip.

use crate::auth::{AuthService, LoginRequest, RegisterRequest, TokenResponse};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(state.users.clone(), state.tokens.clone())
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and token issued", body = TokenResponse),
        (status = 400, description = "Validation failure or username/email already taken", body = crate::error::ApiError)
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();
    payload.validate()?;

    let response = auth_service(&state).register(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticate with username and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated, token issued", body = TokenResponse),
        (status = 400, description = "Missing username or password", body = crate::error::ApiError),
        (status = 401, description = "Invalid username or password", body = crate::error::ApiError)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();
    payload.validate()?;

    let response = auth_service(&state).login(payload).await?;
    Ok(Json(response))
}
