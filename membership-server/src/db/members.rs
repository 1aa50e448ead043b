//! Member repository
//!
//! One row per registered member, keyed naturally by mobile number.
//! Records are inserted once; membership numbers are never regenerated.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::util::now_millis;

/// Full member record as stored
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub father_name: String,
    pub gender: String,
    pub dob: String,
    pub age: i64,
    pub blood_group: String,
    pub mobile: String,
    pub email: String,
    pub state: String,
    pub district: String,
    pub local_body: String,
    pub locality_type: String,
    pub constituency: String,
    pub ward: String,
    pub address: String,
    pub voter_id: String,
    pub national_id: String,
    pub photo: Option<String>,
    pub membership_no: String,
    pub created_at: i64,
}

/// New member data, validated upstream; optional fields already
/// normalized to empty strings.
#[derive(Debug, Clone, Default)]
pub struct NewMember {
    pub name: String,
    pub father_name: String,
    pub gender: String,
    pub dob: String,
    pub age: i64,
    pub blood_group: String,
    pub mobile: String,
    pub email: String,
    pub state: String,
    pub district: String,
    pub local_body: String,
    pub locality_type: String,
    pub constituency: String,
    pub ward: String,
    pub address: String,
    pub voter_id: String,
    pub national_id: String,
}

/// Redacted projection for the admin dashboard.
///
/// Deliberately excludes address, voter ID, national ID and the photo path.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberSummary {
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub district: String,
    pub gender: String,
    pub age: i64,
}

pub async fn exists_by_mobile(pool: &SqlitePool, mobile: &str) -> AppResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member WHERE mobile = ?1")
        .bind(mobile)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

pub async fn find_by_mobile(pool: &SqlitePool, mobile: &str) -> AppResult<Option<Member>> {
    let row = sqlx::query_as::<_, Member>("SELECT * FROM member WHERE mobile = ?1")
        .bind(mobile)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a new member record. A concurrent insert for the same mobile
/// loses to the unique index and surfaces as a conflict.
pub async fn create(
    pool: &SqlitePool,
    data: &NewMember,
    membership_no: &str,
    photo: Option<&str>,
) -> AppResult<Member> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = now_millis();

    let result = sqlx::query(
        "INSERT INTO member (id, name, father_name, gender, dob, age, blood_group, mobile, \
         email, state, district, local_body, locality_type, constituency, ward, address, \
         voter_id, national_id, photo, membership_no, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)",
    )
    .bind(&id)
    .bind(&data.name)
    .bind(&data.father_name)
    .bind(&data.gender)
    .bind(&data.dob)
    .bind(data.age)
    .bind(&data.blood_group)
    .bind(&data.mobile)
    .bind(&data.email)
    .bind(&data.state)
    .bind(&data.district)
    .bind(&data.local_body)
    .bind(&data.locality_type)
    .bind(&data.constituency)
    .bind(&data.ward)
    .bind(&data.address)
    .bind(&data.voter_id)
    .bind(&data.national_id)
    .bind(photo)
    .bind(membership_no)
    .bind(now)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(e) => {
            let app_err = AppError::from(e);
            if matches!(app_err, AppError::Conflict(_)) {
                return Err(AppError::conflict(format!(
                    "Mobile number {} is already registered",
                    data.mobile
                )));
            }
            return Err(app_err);
        }
    }

    find_by_mobile(pool, &data.mobile)
        .await?
        .ok_or_else(|| AppError::database("Member missing after insert"))
}

/// Dashboard listing, newest first, paginated
pub async fn list_summaries(
    pool: &SqlitePool,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<MemberSummary>> {
    let rows = sqlx::query_as::<_, MemberSummary>(
        "SELECT id, name, mobile, district, gender, age FROM member \
         ORDER BY created_at DESC LIMIT ?1 OFFSET ?2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count(pool: &SqlitePool) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Delete a member by mobile number. Returns false when no record matched.
pub async fn delete_by_mobile(pool: &SqlitePool, mobile: &str) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM member WHERE mobile = ?1")
        .bind(mobile)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
