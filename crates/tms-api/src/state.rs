//! Application state management

use crate::auth::TokenCodec;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tms_core::{AppConfig, TaskStore, UserStore};
use tokio::sync::RwLock;

/// Per-endpoint request statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct EndpointMetrics {
    /// Total requests observed
    pub requests: u64,
    /// Responses with a 4xx or 5xx status
    pub errors: u64,
    /// Sum of request latencies in microseconds
    pub total_latency_us: u64,
}

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// User storage backend
    pub users: Arc<dyn UserStore>,
    /// Task storage backend
    pub tasks: Arc<dyn TaskStore>,
    /// Token codec shared by the login flow and the identity filter
    pub tokens: TokenCodec,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
    /// Ready status
    pub is_ready: AtomicBool,
    /// Per-endpoint statistics, keyed by matched route template
    pub endpoint_metrics: RwLock<HashMap<String, EndpointMetrics>>,
}

impl AppState {
    /// Create new application state with config and storage backends
    ///
    /// For the in-memory backend both store handles should point at the same
    /// instance so that deleting a user clears assignees on its tasks.
    pub fn new(config: AppConfig, users: Arc<dyn UserStore>, tasks: Arc<dyn TaskStore>) -> Self {
        let tokens = TokenCodec::new(&config.auth.jwt_secret, config.auth.jwt_ttl_secs);

        Self {
            config,
            users,
            tasks,
            tokens,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            is_ready: AtomicBool::new(true),
            endpoint_metrics: RwLock::new(HashMap::new()),
        }
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check if service is ready
    pub fn is_ready(&self) -> bool {
        self.is_ready.load(Ordering::SeqCst)
    }

    /// Set ready status
    pub fn set_ready(&self, ready: bool) {
        self.is_ready.store(ready, Ordering::SeqCst);
    }

    /// Record one request outcome against its route template
    pub async fn record_request(&self, endpoint: String, status: u16, latency_us: u64) {
        let mut metrics = self.endpoint_metrics.write().await;
        let entry = metrics.entry(endpoint).or_default();
        entry.requests += 1;
        if status >= 400 {
            entry.errors += 1;
        }
        entry.total_latency_us += latency_us;
    }

    /// Snapshot of the per-endpoint statistics
    pub async fn endpoint_snapshot(&self) -> HashMap<String, EndpointMetrics> {
        self.endpoint_metrics.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tms_core::MemoryStore;

    fn test_state() -> AppState {
        let store = Arc::new(MemoryStore::new());
        AppState::new(AppConfig::default(), store.clone(), store)
    }

    #[tokio::test]
    async fn test_record_request_aggregates_per_endpoint() {
        let state = test_state();

        state.record_request("/api/tasks".to_string(), 200, 150).await;
        state.record_request("/api/tasks".to_string(), 404, 50).await;
        state.record_request("/health".to_string(), 200, 10).await;

        let snapshot = state.endpoint_snapshot().await;
        let tasks = &snapshot["/api/tasks"];

        assert_eq!(tasks.requests, 2);
        assert_eq!(tasks.errors, 1);
        assert_eq!(tasks.total_latency_us, 200);
        assert_eq!(snapshot["/health"].requests, 1);
    }

    #[test]
    fn test_request_counter() {
        let state = test_state();

        assert_eq!(state.get_request_count(), 0);
        state.increment_requests();
        state.increment_requests();
        assert_eq!(state.get_request_count(), 2);
    }
}
