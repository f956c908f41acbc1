//! TMS API - REST server for task management
//!
//! Axum HTTP layer over `tms-core`: registration and login with signed
//! bearer tokens, role-gated task and user CRUD, operational probes, and
//! OpenAPI documentation.

pub mod audit;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod state;

pub use routes::create_router;

#[cfg(feature = "test-utils")]
pub use routes::create_router_for_testing;
