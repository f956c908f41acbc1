//! PostgreSQL store
//!
//! Account and task persistence using SQLx and PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;

use super::{NewUser, TaskData, TaskStore, UserStore};
use crate::{Page, PageRequest, Priority, Result, Task, TaskStatus, TmsError, User};

/// PostgreSQL account and task store
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect a new store
    pub async fn connect(database_url: &str, pool_size: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .connect(database_url)
            .await
            .map_err(|e| TmsError::Database(format!("PostgreSQL connection failed: {e}")))?;

        Ok(Self { pool })
    }

    /// Create from an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the tables this store needs if they are missing
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                roles TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| TmsError::Database(format!("Failed to create users table: {e}")))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                status TEXT NOT NULL,
                priority TEXT NOT NULL,
                assigned_to BIGINT REFERENCES users(id) ON DELETE SET NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| TmsError::Database(format!("Failed to create tasks table: {e}")))?;

        Ok(())
    }
}

/// Account row from database
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    roles: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            roles: row.roles,
            created_at: row.created_at,
        }
    }
}

/// Task row from database
#[derive(Debug, FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: Option<String>,
    status: String,
    priority: String,
    assigned_to: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description,
            status: match row.status.as_str() {
                "IN_PROGRESS" => TaskStatus::InProgress,
                "COMPLETED" => TaskStatus::Completed,
                _ => TaskStatus::Open,
            },
            priority: match row.priority.as_str() {
                "LOW" => Priority::Low,
                "HIGH" => Priority::High,
                _ => Priority::Medium,
            },
            assigned_to: row.assigned_to,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Constraint name when the error is a unique violation on the users table
fn unique_violation(e: &sqlx::Error) -> Option<&str> {
    let db = e.as_database_error()?;
    if db.is_unique_violation() {
        Some(db.constraint().unwrap_or_default())
    } else {
        None
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, user: NewUser) -> Result<User> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (username, email, password_hash, roles)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, roles, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.roles)
        .fetch_one(&self.pool)
        .await
        // Racing registrations report the same conflict the service
        // pre-checks produce, not a 500
        .map_err(|e| match unique_violation(&e) {
            Some(constraint) if constraint.contains("username") => {
                TmsError::Conflict("Username is already taken".to_string())
            }
            Some(_) => TmsError::Conflict("Email is already in use".to_string()),
            None => TmsError::Database(format!("Failed to create user: {e}")),
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, roles, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TmsError::Database(format!("Failed to get user: {e}")))?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, roles, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TmsError::Database(format!("Failed to get user: {e}")))?;

        Ok(row.map(User::from))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| TmsError::Database(format!("Failed to check username: {e}")))?;

        Ok(row.0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| TmsError::Database(format!("Failed to check email: {e}")))?;

        Ok(row.0)
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password_hash, roles, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TmsError::Database(format!("Failed to list users: {e}")))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update_email(&self, id: i64, email: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            UPDATE users SET email = $2
            WHERE id = $1
            RETURNING id, username, email, password_hash, roles, created_at
            "#,
        )
        .bind(id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        // Only email is written here, so any unique violation is the
        // email constraint
        .map_err(|e| match unique_violation(&e) {
            Some(_) => TmsError::Conflict("Email is already in use".to_string()),
            None => TmsError::Database(format!("Failed to update user: {e}")),
        })?;

        Ok(row.map(User::from))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        // assigned_to references are cleared by ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| TmsError::Database(format!("Failed to delete user: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn create(&self, data: TaskData) -> Result<Task> {
        let row: TaskRow = sqlx::query_as(
            r#"
            INSERT INTO tasks (title, description, status, priority, assigned_to)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, status, priority, assigned_to, created_at, updated_at
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.status.to_string())
        .bind(data.priority.to_string())
        .bind(data.assigned_to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TmsError::Database(format!("Failed to create task: {e}")))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, status, priority, assigned_to, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TmsError::Database(format!("Failed to get task: {e}")))?;

        Ok(row.map(Task::from))
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Task>> {
        let page = page.clamped();

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| TmsError::Database(format!("Failed to count tasks: {e}")))?;

        let rows: Vec<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, status, priority, assigned_to, created_at, updated_at
            FROM tasks
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.page_size as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TmsError::Database(format!("Failed to list tasks: {e}")))?;

        Ok(Page {
            items: rows.into_iter().map(Task::from).collect(),
            total: total.0 as u64,
            page: page.page,
            page_size: page.page_size,
        })
    }

    async fn list_by_assignee(&self, user_id: i64, page: PageRequest) -> Result<Page<Task>> {
        let page = page.clamped();

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE assigned_to = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| TmsError::Database(format!("Failed to count tasks: {e}")))?;

        let rows: Vec<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, status, priority, assigned_to, created_at, updated_at
            FROM tasks
            WHERE assigned_to = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page.page_size as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TmsError::Database(format!("Failed to list tasks: {e}")))?;

        Ok(Page {
            items: rows.into_iter().map(Task::from).collect(),
            total: total.0 as u64,
            page: page.page,
            page_size: page.page_size,
        })
    }

    async fn update(&self, id: i64, data: TaskData) -> Result<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as(
            r#"
            UPDATE tasks SET
                title = $2,
                description = $3,
                status = $4,
                priority = $5,
                assigned_to = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, priority, assigned_to, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.status.to_string())
        .bind(data.priority.to_string())
        .bind(data.assigned_to)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TmsError::Database(format!("Failed to update task: {e}")))?;

        Ok(row.map(Task::from))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| TmsError::Database(format!("Failed to delete task: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
