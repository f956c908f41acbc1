//! Metrics tracking middleware
//!
//! Records request counts, error counts, and latency per matched route
//! into the shared application state, where the /metrics endpoint reads
//! them back out.

use crate::state::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

/// Metrics tracking middleware
///
/// Requests are keyed by the route template, so `/api/tasks/7` and
/// `/api/tasks/12` land in the same `/api/tasks/:id` bucket. Requests
/// that match no route are not recorded, which keeps the key set
/// bounded by the routing table no matter what paths clients send.
pub async fn metrics_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string());

    let response = next.run(request).await;

    if let Some(endpoint) = endpoint {
        let latency_us = start.elapsed().as_micros() as u64;
        let status = response.status().as_u16();

        // Record off the request path to avoid adding latency
        let state = state.clone();
        tokio::spawn(async move {
            state.record_request(endpoint, status, latency_us).await;
        });
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::{middleware, routing::get, Router};
    use std::time::Duration;
    use tms_core::{AppConfig, MemoryStore};
    use tower::ServiceExt;

    fn test_router() -> (Router, Arc<AppState>) {
        let store = Arc::new(MemoryStore::new());
        let state = Arc::new(AppState::new(AppConfig::default(), store.clone(), store));
        let router = Router::new()
            .route("/api/tasks/:id", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                metrics_middleware,
            ));
        (router, state)
    }

    #[tokio::test]
    async fn test_requests_are_keyed_by_route_template() {
        let (router, state) = test_router();

        let request = Request::builder()
            .uri("/api/tasks/123")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Recording happens off the request path; wait for it to land
        let mut snapshot = state.endpoint_snapshot().await;
        for _ in 0..100 {
            if !snapshot.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
            snapshot = state.endpoint_snapshot().await;
        }

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["/api/tasks/:id"].requests, 1);
        assert!(!snapshot.contains_key("/api/tasks/123"));
    }

    #[tokio::test]
    async fn test_unmatched_paths_are_not_recorded() {
        let (router, state) = test_router();

        for i in 0..20 {
            let request = Request::builder()
                .uri(format!("/no/such/route/{i}"))
                .body(Body::empty())
                .unwrap();
            let response = router.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }

        // Give any stray recording task a chance to run first
        tokio::time::sleep(Duration::from_millis(20)).await;
        let snapshot = state.endpoint_snapshot().await;
        assert!(snapshot.is_empty());
    }
}
