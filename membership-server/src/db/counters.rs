//! Named atomic counters
//!
//! Membership numbering must not read-count-then-insert: two concurrent
//! registrations would mint the same sequence. The upsert below increments
//! and returns in a single statement, so every caller observes a distinct
//! value.

use sqlx::SqlitePool;

use crate::error::AppResult;

/// Counter name backing membership numbering
pub const MEMBERSHIP: &str = "membership";

/// Atomically increment `name` and return the new value (first call yields 1)
pub async fn next(pool: &SqlitePool, name: &str) -> AppResult<i64> {
    let value: i64 = sqlx::query_scalar(
        "INSERT INTO counter (name, value) VALUES (?1, 1) \
         ON CONFLICT(name) DO UPDATE SET value = value + 1 \
         RETURNING value",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(value)
}

/// Current value without incrementing (0 when the counter does not exist)
pub async fn current(pool: &SqlitePool, name: &str) -> AppResult<i64> {
    let value: Option<i64> = sqlx::query_scalar("SELECT value FROM counter WHERE name = ?1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(value.unwrap_or(0))
}
