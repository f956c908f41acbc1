//! API route definitions
//!
//! Three route groups with increasing requirements: public (registration,
//! login, operational probes, API docs), authenticated (task and user
//! reads/writes), and ADMIN (deletion, account listing). The identity
//! filter runs on every request; the per-group gates decide whether the
//! resolved identity is sufficient.

use crate::auth::{identity_filter, require_auth, require_role};
use crate::handlers::{auth, health, tasks, users};
use crate::middleware::{metrics_middleware, security_headers_middleware};
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tms_core::config::ServerConfig;
use tms_core::ROLE_ADMIN;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the whole service
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_handler,
        auth::login_handler,
        tasks::list_tasks,
        tasks::get_task,
        tasks::list_tasks_by_user,
        tasks::create_task,
        tasks::update_task,
        tasks::delete_task,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        health::health_check,
        health::readiness_check,
    ),
    components(schemas(
        crate::error::ApiError,
        crate::auth::RegisterRequest,
        crate::auth::LoginRequest,
        crate::auth::TokenResponse,
        tasks::TaskRequest,
        tasks::TaskResponse,
        tasks::TaskPage,
        users::UserResponse,
        users::UpdateUserRequest,
        health::HealthResponse,
        health::ReadinessResponse,
        health::ReadinessChecks,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "tasks", description = "Task management"),
        (name = "users", description = "User management"),
        (name = "health", description = "Operational probes")
    ),
    modifiers(&SecurityAddon),
    security(("bearer_auth" = []))
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// CORS layer from configuration
///
/// With CORS disabled or no configured origins the layer stays
/// restrictive and emits no CORS headers.
fn build_cors(server: &ServerConfig) -> CorsLayer {
    if !server.cors_enabled || server.cors_origins.is_empty() {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Assemble the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics));

    // Protected routes (any authenticated identity)
    let protected_routes = Router::new()
        .route("/api/tasks", get(tasks::list_tasks))
        .route("/api/tasks", post(tasks::create_task))
        .route("/api/tasks/:id", get(tasks::get_task))
        .route("/api/tasks/:id", put(tasks::update_task))
        .route("/api/tasks/user/:user_id", get(tasks::list_tasks_by_user))
        .route("/api/users/:id", get(users::get_user))
        .route("/api/users/:id", put(users::update_user))
        .layer(middleware::from_fn(require_auth));

    // Administrative routes
    let admin_routes = Router::new()
        .route("/api/tasks/:id", delete(tasks::delete_task))
        .route("/api/users", get(users::list_users))
        .route("/api/users/:id", delete(users::delete_user))
        .layer(middleware::from_fn(require_role(ROLE_ADMIN)));

    let cors = build_cors(&state.config.server);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(middleware::from_fn(security_headers_middleware))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    identity_filter,
                )),
        )
        .with_state(state)
}

/// Router over a freshly seeded in-memory store, for integration tests
#[cfg(feature = "test-utils")]
pub async fn create_router_for_testing() -> Router {
    use tms_core::{MemoryStore, TaskStore, UserStore};

    // One store instance behind both handles, so user deletion clears
    // task assignees in tests exactly as it does in production.
    let store = Arc::new(MemoryStore::new());
    let users: Arc<dyn UserStore> = store.clone();
    let tasks: Arc<dyn TaskStore> = store;

    crate::seed::seed_demo_data(users.as_ref(), tasks.as_ref())
        .await
        .expect("seeding an in-memory store");

    let state = Arc::new(AppState::new(
        tms_core::AppConfig::default(),
        users,
        tasks,
    ));
    state.set_ready(true);

    create_router(state)
}
