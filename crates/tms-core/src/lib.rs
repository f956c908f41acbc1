//! TMS Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the TMS system:
//! - Account and task domain models
//! - Pagination types
//! - Common error types
//! - The storage port (async traits) with in-memory and PostgreSQL adapters
//! - Configuration management

pub mod config;
pub mod store;

pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, LoggingConfig, ServerConfig, StorageBackend,
};
pub use store::{MemoryStore, NewUser, PgStore, TaskData, TaskStore, UserStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for TMS operations
#[derive(Error, Debug)]
pub enum TmsError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TmsError {
    /// Not-found error for a task id, with the message shape clients rely on
    pub fn task_not_found(id: i64) -> Self {
        Self::NotFound(format!("Task not found with id: {id}"))
    }

    /// Not-found error for a user id
    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound(format!("User not found with id: {id}"))
    }
}

pub type Result<T> = std::result::Result<T, TmsError>;

// ============================================================================
// Roles
// ============================================================================

/// Role label granted to every account at registration
pub const ROLE_USER: &str = "USER";

/// Role label required for administrative endpoints
pub const ROLE_ADMIN: &str = "ADMIN";

// ============================================================================
// Account Model
// ============================================================================

/// A registered account
///
/// `roles` is a comma-separated list of labels (e.g. `"USER"` or
/// `"USER,ADMIN"`), stored exactly as granted. The password hash is never
/// serialized; response DTOs omit it entirely.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// Unique contact address
    pub email: String,

    /// Argon2id PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Comma-separated role labels
    pub roles: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Split the stored role string into individual labels
    pub fn role_labels(&self) -> Vec<&str> {
        self.roles
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .collect()
    }

    /// Check whether this account carries the given role label
    pub fn has_role(&self, role: &str) -> bool {
        self.role_labels().iter().any(|label| *label == role)
    }
}

// ============================================================================
// Task Model
// ============================================================================

/// Workflow state of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// Priority level of a task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// A work item tracked by the service
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: i64,

    pub title: String,

    pub description: Option<String>,

    pub status: TaskStatus,

    pub priority: Priority,

    /// Account id of the assignee, if any
    pub assigned_to: Option<i64>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Pagination
// ============================================================================

/// Default page size when the request does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on the page size a client may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination parameters (zero-based page index)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub page: u32,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Clamp the page size into `1..=MAX_PAGE_SIZE`
    pub fn clamped(self) -> Self {
        Self {
            page: self.page,
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of items to skip for this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }
}

/// One page of results plus the total count across all pages
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Convert the items while keeping the paging envelope
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
