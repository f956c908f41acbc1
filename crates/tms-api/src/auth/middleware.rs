//! Request identity filter and authorization gates
//!
//! The identity filter runs on every request: it parses the Authorization
//! header, validates the bearer token, loads the matching account from the
//! store, and attaches a [`CurrentUser`] to the request extensions. It never
//! rejects a request itself. Rejection is the job of the gates layered onto
//! route groups: [`require_auth`] returns 401 when no identity was attached,
//! and [`require_role`] returns 403 when the identity lacks the needed role.

use crate::audit::{audit_log, extract_ip_address, extract_user_agent, AuditEvent};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tms_core::{User, ROLE_ADMIN};

/// Authenticated identity attached to request extensions
///
/// Added by [`identity_filter`] after token validation and store lookup.
/// Handlers extract it with `Extension<CurrentUser>`. The password hash is
/// deliberately not carried over from the stored account.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    /// Account identifier
    pub id: i64,
    /// Unique username (token subject)
    pub username: String,
    /// Account email address
    pub email: String,
    /// Comma-separated role labels, e.g. "USER,ADMIN"
    pub roles: String,
}

impl CurrentUser {
    /// Individual role labels, trimmed
    pub fn role_labels(&self) -> Vec<&str> {
        self.roles
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect()
    }

    /// Check if the identity carries the given role label
    pub fn has_role(&self, role: &str) -> bool {
        self.role_labels().contains(&role)
    }

    /// Check if the identity carries the ADMIN role
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            roles: user.roles,
        }
    }
}

/// Authorization gate errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied")]
    Forbidden,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AuthError::Unauthenticated => (StatusCode::UNAUTHORIZED, ApiError::unauthorized()),
            AuthError::Forbidden => (StatusCode::FORBIDDEN, ApiError::forbidden()),
        };

        (status, Json(error)).into_response()
    }
}

/// Identity filter applied to the whole router
///
/// This middleware:
/// 1. Extracts the Authorization header, if present
/// 2. Validates the Bearer token signature and expiry
/// 3. Loads the account named by the token subject from the store
/// 4. Attaches [`CurrentUser`] to request extensions
///
/// Every failure mode falls through to the next handler without an identity,
/// so public endpoints stay reachable with a bad or missing token. Invalid
/// tokens are recorded on the audit log.
///
/// # Usage
///
/// ```ignore
/// use axum::middleware;
/// use tms_api::auth::middleware::identity_filter;
///
/// let app = router.layer(middleware::from_fn_with_state(state, identity_filter));
/// ```
pub async fn identity_filter(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string());

    let Some(token) = bearer else {
        return next.run(request).await;
    };

    match state.tokens.parse_and_verify(&token) {
        Ok(claims) => match state.users.find_by_username(&claims.sub).await {
            Ok(Some(user)) => {
                request.extensions_mut().insert(CurrentUser::from(user));
            }
            Ok(None) => {
                // Token outlived its account; treat as anonymous.
                tracing::debug!(subject = %claims.sub, "Token subject no longer exists");
            }
            Err(e) => {
                tracing::error!("Failed to load request identity: {e}");
            }
        },
        Err(e) => {
            audit_log(&AuditEvent::InvalidToken {
                ip_address: extract_ip_address(request.headers()),
                user_agent: extract_user_agent(request.headers()),
                reason: e.to_string(),
            });
        }
    }

    next.run(request).await
}

/// Gate that requires an authenticated identity
///
/// Layered onto route groups whose endpoints accept any logged-in account.
/// Returns 401 when [`identity_filter`] attached no identity.
///
/// # Usage
///
/// ```ignore
/// use axum::{middleware, routing::get, Router};
/// use tms_api::auth::middleware::require_auth;
///
/// let protected = Router::new()
///     .route("/api/tasks", get(list_tasks))
///     .route_layer(middleware::from_fn(require_auth));
/// ```
pub async fn require_auth(request: Request<Body>, next: Next) -> Result<Response, AuthError> {
    if request.extensions().get::<CurrentUser>().is_none() {
        return Err(AuthError::Unauthenticated);
    }

    Ok(next.run(request).await)
}

/// Type alias for role middleware future
type RoleMiddlewareFuture =
    std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>>;

/// Middleware factory for role-based access control
///
/// Returns a gate that admits only identities carrying `required_role`.
/// An anonymous request gets 401 and a logged-in account without the role
/// gets 403; denials land on the audit log with the requested path.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, routing::delete, Router};
/// use tms_api::auth::middleware::require_role;
/// use tms_core::ROLE_ADMIN;
///
/// let admin = Router::new()
///     .route("/api/tasks/:id", delete(delete_task))
///     .route_layer(middleware::from_fn(require_role(ROLE_ADMIN)));
/// ```
pub fn require_role(
    required_role: &'static str,
) -> impl Fn(Request<Body>, Next) -> RoleMiddlewareFuture + Clone {
    move |request: Request<Body>, next: Next| {
        Box::pin(async move {
            let user = request
                .extensions()
                .get::<CurrentUser>()
                .cloned()
                .ok_or(AuthError::Unauthenticated)?;

            if !user.has_role(required_role) {
                audit_log(&AuditEvent::AccessDenied {
                    user_id: Some(user.id),
                    username: Some(user.username.clone()),
                    resource: request.uri().path().to_string(),
                    required_role: Some(required_role.to_string()),
                    ip_address: extract_ip_address(request.headers()),
                    user_agent: extract_user_agent(request.headers()),
                });

                return Err(AuthError::Forbidden);
            }

            Ok(next.run(request).await)
        })
    }
}
