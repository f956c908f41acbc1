//! Storage port for accounts and tasks
//!
//! The HTTP layer reaches persistence only through these traits. Two
//! adapters ship: an in-memory store (the default, also used by the test
//! harness) and a PostgreSQL store built on SQLx.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::{Page, PageRequest, Priority, Result, Task, TaskStatus, User};

/// New account data for [`UserStore::create`]
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub roles: String,
}

/// Task fields for create and full-replace update
#[derive(Debug, Clone)]
pub struct TaskData {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assigned_to: Option<i64>,
}

/// Trait for account storage operations
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new account and return it with its assigned id
    async fn create(&self, user: NewUser) -> Result<User>;

    /// Get account by id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Get account by login name
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Whether an account with this login name exists
    async fn exists_by_username(&self, username: &str) -> Result<bool>;

    /// Whether an account with this email exists
    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    /// All accounts, ordered by id
    async fn list_all(&self) -> Result<Vec<User>>;

    /// Replace the email of an account; `None` when the id is unknown
    async fn update_email(&self, id: i64, email: &str) -> Result<Option<User>>;

    /// Remove an account; `false` when the id is unknown.
    ///
    /// Tasks assigned to the removed account lose their assignee.
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Trait for task storage operations
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a new task and return it with its assigned id
    async fn create(&self, data: TaskData) -> Result<Task>;

    /// Get task by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Task>>;

    /// One page of all tasks, ordered by id
    async fn list(&self, page: PageRequest) -> Result<Page<Task>>;

    /// One page of the tasks assigned to the given account, ordered by id
    async fn list_by_assignee(&self, user_id: i64, page: PageRequest) -> Result<Page<Task>>;

    /// Replace every mutable field of a task; `None` when the id is unknown
    async fn update(&self, id: i64, data: TaskData) -> Result<Option<Task>>;

    /// Remove a task; `false` when the id is unknown
    async fn delete(&self, id: i64) -> Result<bool>;
}
