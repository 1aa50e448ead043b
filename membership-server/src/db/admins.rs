//! Admin account repository

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::util::now_millis;

/// Administrator account. `password_hash` is an argon2 PHC string,
/// never the raw password.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Admin {
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: i64,
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> AppResult<Option<Admin>> {
    let row = sqlx::query_as::<_, Admin>(
        "SELECT username, password_hash, role, is_active, created_at \
         FROM admin WHERE username = ?1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a new admin account. Username uniqueness is enforced here, not
/// left to chance at the store level.
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    role: &str,
) -> AppResult<()> {
    let result = sqlx::query(
        "INSERT INTO admin (username, password_hash, role, is_active, created_at) \
         VALUES (?1, ?2, ?3, 1, ?4)",
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .bind(now_millis())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            let app_err = AppError::from(e);
            if matches!(app_err, AppError::Conflict(_)) {
                Err(AppError::conflict(format!(
                    "Admin '{username}' already exists"
                )))
            } else {
                Err(app_err)
            }
        }
    }
}

/// Insert-if-absent for the bootstrap admin seeded at startup
pub async fn create_if_absent(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> AppResult<bool> {
    if find_by_username(pool, username).await?.is_some() {
        return Ok(false);
    }
    create(pool, username, password_hash, "admin").await?;
    Ok(true)
}
