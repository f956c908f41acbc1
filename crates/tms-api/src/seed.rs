//! Demo data seeding
//!
//! Registers the demo accounts (`admin`/`password` and `user`/`password`)
//! plus a handful of sample tasks. Seeding is idempotent: when the admin
//! account already exists the whole pass is skipped.

use crate::auth::hash_password;
use tms_core::{NewUser, Priority, TaskData, TaskStatus, TaskStore, UserStore, ROLE_ADMIN, ROLE_USER};

pub async fn seed_demo_data(users: &dyn UserStore, tasks: &dyn TaskStore) -> anyhow::Result<()> {
    if users.exists_by_username("admin").await? {
        tracing::debug!("Demo data already present, skipping seed");
        return Ok(());
    }

    let admin = users
        .create(NewUser {
            username: "admin".to_string(),
            email: "admin@demo.com".to_string(),
            password_hash: hash_password("password")?,
            roles: format!("{ROLE_USER},{ROLE_ADMIN}"),
        })
        .await?;

    let user = users
        .create(NewUser {
            username: "user".to_string(),
            email: "user@demo.com".to_string(),
            password_hash: hash_password("password")?,
            roles: ROLE_USER.to_string(),
        })
        .await?;

    tasks
        .create(TaskData {
            title: "Review the deployment checklist".to_string(),
            description: Some("Walk through every step before the next release".to_string()),
            status: TaskStatus::Open,
            priority: Priority::High,
            assigned_to: Some(admin.id),
        })
        .await?;

    tasks
        .create(TaskData {
            title: "Update the onboarding guide".to_string(),
            description: Some("The storage section is out of date".to_string()),
            status: TaskStatus::InProgress,
            priority: Priority::Medium,
            assigned_to: Some(user.id),
        })
        .await?;

    tasks
        .create(TaskData {
            title: "Archive stale branches".to_string(),
            description: None,
            status: TaskStatus::Open,
            priority: Priority::Low,
            assigned_to: None,
        })
        .await?;

    tracing::info!(
        admin_id = admin.id,
        user_id = user.id,
        "Seeded demo accounts and sample tasks"
    );
    Ok(())
}
