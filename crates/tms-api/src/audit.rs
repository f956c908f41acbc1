//! Security audit logging for authentication events
//!
//! Structured audit records for registrations, logins, rejected tokens, and
//! access-control denials. Events are logged at INFO level with the "audit"
//! target, so they can be filtered and routed separately from application
//! logs by any tracing subscriber or log aggregator.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Security audit events for authentication and authorization
///
/// Events raised by the auth service carry account identifiers; events
/// raised by the request middleware additionally carry the client address
/// and user agent taken from the request headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// Successful account registration
    Registration {
        user_id: i64,
        username: String,
        email: String,
        role: String,
    },

    /// Rejected account registration
    RegistrationFailure { username: String, reason: String },

    /// Successful login
    LoginSuccess { user_id: i64, username: String },

    /// Failed login attempt
    LoginFailure { username: String, reason: String },

    /// Invalid or expired token presented on a request
    InvalidToken {
        ip_address: Option<String>,
        user_agent: Option<String>,
        reason: String,
    },

    /// Request denied by a role gate
    AccessDenied {
        user_id: Option<i64>,
        username: Option<String>,
        resource: String,
        required_role: Option<String>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    },
}

/// Log a security audit event with structured fields
///
/// The full event is serialized to JSON alongside the headline fields, for
/// compatibility with log aggregators like Elasticsearch or CloudWatch Logs.
pub fn audit_log(event: &AuditEvent) {
    let event_json = serde_json::to_string(event)
        .unwrap_or_else(|e| format!("{{\"error\":\"Failed to serialize audit event: {e}\"}}"));

    match event {
        AuditEvent::Registration {
            user_id,
            username,
            email,
            role,
        } => {
            info!(
                target: "audit",
                event = %event_json,
                user_id = %user_id,
                username = %username,
                email = %email,
                role = %role,
                "Registration successful"
            );
        }
        AuditEvent::RegistrationFailure { username, reason } => {
            info!(
                target: "audit",
                event = %event_json,
                username = %username,
                reason = %reason,
                "Registration failed"
            );
        }
        AuditEvent::LoginSuccess { user_id, username } => {
            info!(
                target: "audit",
                event = %event_json,
                user_id = %user_id,
                username = %username,
                "Login successful"
            );
        }
        AuditEvent::LoginFailure { username, reason } => {
            info!(
                target: "audit",
                event = %event_json,
                username = %username,
                reason = %reason,
                "Login failed"
            );
        }
        AuditEvent::InvalidToken {
            ip_address, reason, ..
        } => {
            info!(
                target: "audit",
                event = %event_json,
                ip_address = ?ip_address,
                reason = %reason,
                "Invalid token"
            );
        }
        AuditEvent::AccessDenied {
            user_id,
            username,
            resource,
            required_role,
            ip_address,
            ..
        } => {
            info!(
                target: "audit",
                event = %event_json,
                user_id = ?user_id,
                username = ?username,
                resource = %resource,
                required_role = ?required_role,
                ip_address = ?ip_address,
                "Access denied"
            );
        }
    }
}

/// Extract the client IP address from request headers
///
/// Checks X-Forwarded-For first (taking the first hop, the client), then
/// X-Real-IP. Returns None when neither header is set; connection info
/// would have to be threaded through separately.
pub fn extract_ip_address(headers: &axum::http::HeaderMap) -> Option<String> {
    if let Some(xff) = headers.get("x-forwarded-for") {
        if let Ok(xff_str) = xff.to_str() {
            if let Some(first_ip) = xff_str.split(',').next() {
                return Some(first_ip.trim().to_string());
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            return Some(ip_str.to_string());
        }
    }

    None
}

/// Extract the user agent from request headers
pub fn extract_user_agent(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|ua| ua.to_str().ok())
        .map(|s| s.to_string())
}
