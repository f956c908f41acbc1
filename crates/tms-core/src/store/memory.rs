//! In-memory store
//!
//! Default backend for the demo: accounts and tasks live in
//! `tokio::sync::RwLock`-guarded maps with atomic id counters, so the
//! service runs without any external database. Username and email
//! uniqueness is enforced inside the write lock, standing in for the
//! UNIQUE constraints of the SQL schema.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{NewUser, TaskData, TaskStore, UserStore};
use crate::{Page, PageRequest, Result, Task, TmsError, User};

/// In-memory account and task store
pub struct MemoryStore {
    users: RwLock<HashMap<i64, User>>,
    tasks: RwLock<HashMap<i64, Task>>,
    next_user_id: AtomicI64,
    next_task_id: AtomicI64,
}

impl MemoryStore {
    /// Create an empty store; ids start at 1
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            tasks: RwLock::new(HashMap::new()),
            next_user_id: AtomicI64::new(1),
            next_task_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn paginate(mut items: Vec<Task>, page: PageRequest) -> Page<Task> {
    let page = page.clamped();
    items.sort_by_key(|t| t.id);
    let total = items.len() as u64;
    let start = (page.offset() as usize).min(items.len());
    let items = items
        .into_iter()
        .skip(start)
        .take(page.page_size as usize)
        .collect();

    Page {
        items,
        total,
        page: page.page,
        page_size: page.page_size,
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User> {
        // Check and insert under one write lock so concurrent
        // registrations cannot both pass the service pre-checks
        // and end up with the same username or email.
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(TmsError::Conflict("Username is already taken".to_string()));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(TmsError::Conflict("Email is already in use".to_string()));
        }

        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            roles: user.roles,
            created_at: Utc::now(),
        };
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.users.read().await.values().any(|u| u.email == email))
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn update_email(&self, id: i64, email: &str) -> Result<Option<User>> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.id != id && u.email == email) {
            return Err(TmsError::Conflict("Email is already in use".to_string()));
        }
        match users.get_mut(&id) {
            Some(user) => {
                user.email = email.to_string();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let removed = self.users.write().await.remove(&id).is_some();
        if removed {
            // Mirror the SQL schema's ON DELETE SET NULL
            let mut tasks = self.tasks.write().await;
            for task in tasks.values_mut() {
                if task.assigned_to == Some(id) {
                    task.assigned_to = None;
                }
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create(&self, data: TaskData) -> Result<Task> {
        let id = self.next_task_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let task = Task {
            id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assigned_to: data.assigned_to,
            created_at: now,
            updated_at: now,
        };
        self.tasks.write().await.insert(id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Task>> {
        let tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        Ok(paginate(tasks, page))
    }

    async fn list_by_assignee(&self, user_id: i64, page: PageRequest) -> Result<Page<Task>> {
        let tasks: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.assigned_to == Some(user_id))
            .cloned()
            .collect();
        Ok(paginate(tasks, page))
    }

    async fn update(&self, id: i64, data: TaskData) -> Result<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&id) {
            Some(task) => {
                task.title = data.title;
                task.description = data.description;
                task.status = data.status;
                task.priority = data.priority;
                task.assigned_to = data.assigned_to;
                task.updated_at = Utc::now();
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }
}
