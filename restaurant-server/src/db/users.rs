use shared::models::{Role, User};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::auth::hash_password;
use crate::core::config::BootstrapAdmin;

pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub password_hash: &'a str,
    pub role: Role,
}

pub async fn create(pool: &SqlitePool, user: NewUser<'_>) -> Result<User, sqlx::Error> {
    let now = now_millis();
    sqlx::query_as(
        "INSERT INTO users (email, name, phone, password_hash, role, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(user.email)
    .bind(user.name)
    .bind(user.phone)
    .bind(user.password_hash)
    .bind(user.role)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Case-insensitive (column is `COLLATE NOCASE`)
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn admin_exists(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'admin'")
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Create the bootstrap administrator unless an admin already exists
pub async fn ensure_admin(pool: &SqlitePool, admin: &BootstrapAdmin) -> anyhow::Result<()> {
    if admin_exists(pool).await? {
        tracing::debug!("Administrator already present, skipping bootstrap");
        return Ok(());
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| anyhow::anyhow!("Failed to hash bootstrap admin password: {e}"))?;

    let user = create(
        pool,
        NewUser {
            email: &admin.email,
            name: &admin.name,
            phone: None,
            password_hash: &password_hash,
            role: Role::Admin,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap administrator created");
    Ok(())
}
