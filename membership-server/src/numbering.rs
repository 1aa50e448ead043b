//! Membership numbering
//!
//! `PBM-<year>-<sequence>`, sequence zero-padded to six digits. The sequence
//! comes from the atomic `membership` counter, never from a live count of
//! member rows, so concurrent registrations cannot mint the same number.

use chrono::{Datelike, Utc};
use sqlx::SqlitePool;

use crate::db::counters;
use crate::error::AppResult;

/// Format a membership number for a given year and sequence
pub fn format_membership_no(year: i32, sequence: i64) -> String {
    format!("PBM-{year}-{sequence:06}")
}

/// Mint the next membership number for the current calendar year
pub async fn next_membership_no(pool: &SqlitePool) -> AppResult<String> {
    let sequence = counters::next(pool, counters::MEMBERSHIP).await?;
    Ok(format_membership_no(Utc::now().year(), sequence))
}
