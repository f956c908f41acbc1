//! HTTP request handlers
//!
//! One module per resource: authentication, tasks, users, and the
//! operational endpoints (health, readiness, metrics).

pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;
