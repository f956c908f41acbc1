//! TMS API Server
//!
//! REST API server for the task management system.

use std::sync::Arc;

use tms_api::routes::create_router;
use tms_api::seed;
use tms_api::state::AppState;
use tms_core::{AppConfig, AuthConfig, MemoryStore, PgStore, StorageBackend, TaskStore, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "tms_api={level},tower_http={level}",
            level = config.logging.level
        )
        .into()
    });
    if config.logging.json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if config.auth.jwt_secret == AuthConfig::default().jwt_secret {
        tracing::warn!("TMS_JWT_SECRET not set; using the development signing secret");
    }

    // Build the storage backend. Both handles point at one instance so
    // that deleting a user clears assignees on its tasks.
    let (users, tasks): (Arc<dyn UserStore>, Arc<dyn TaskStore>) = match config.database.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            let store = Arc::new(MemoryStore::new());
            (store.clone(), store)
        }
        StorageBackend::Postgres => {
            let store = Arc::new(
                PgStore::connect(
                    &config.database.postgres_url,
                    config.database.postgres_pool_size,
                )
                .await?,
            );
            store.ensure_schema().await?;
            tracing::info!("Connected to PostgreSQL");
            (store.clone(), store)
        }
    };

    if config.database.seed_demo_data {
        seed::seed_demo_data(users.as_ref(), tasks.as_ref()).await?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Create application state
    let state = Arc::new(AppState::new(config, users, tasks));
    state.set_ready(true);

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("TMS API server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
