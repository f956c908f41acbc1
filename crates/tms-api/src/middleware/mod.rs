//! HTTP middleware
//!
//! Request-path middleware that is not tied to authentication: security
//! response headers and per-endpoint metrics collection. The identity
//! filter and authorization gates live in `auth::middleware`.

pub mod metrics;
pub mod security_headers;

pub use metrics::metrics_middleware;
pub use security_headers::security_headers_middleware;
