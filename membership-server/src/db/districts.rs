//! District repository
//!
//! The district list is fixed and seeded once at startup; the application
//! only ever reads it afterwards.

use sqlx::SqlitePool;

use crate::error::AppResult;

/// The 37 recognized districts of Tamil Nadu
pub const TAMIL_NADU_DISTRICTS: [&str; 37] = [
    "Ariyalur",
    "Chengalpattu",
    "Chennai",
    "Coimbatore",
    "Cuddalore",
    "Dharmapuri",
    "Dindigul",
    "Erode",
    "Kallakurichi",
    "Kancheepuram",
    "Karur",
    "Krishnagiri",
    "Madurai",
    "Mayiladuthurai",
    "Nagapattinam",
    "Namakkal",
    "Nilgiris",
    "Perambalur",
    "Pudukkottai",
    "Ramanathapuram",
    "Ranipet",
    "Salem",
    "Sivagangai",
    "Tenkasi",
    "Thanjavur",
    "Theni",
    "Thoothukudi",
    "Tiruchirappalli",
    "Tirunelveli",
    "Tirupathur",
    "Tiruppur",
    "Tiruvallur",
    "Tiruvannamalai",
    "Tiruvarur",
    "Vellore",
    "Viluppuram",
    "Virudhunagar",
];

/// Idempotent seed: insert-if-absent for every known district
pub async fn seed(pool: &SqlitePool) -> AppResult<()> {
    for name in TAMIL_NADU_DISTRICTS {
        sqlx::query("INSERT INTO district (name) VALUES (?1) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }
    tracing::info!(count = TAMIL_NADU_DISTRICTS.len(), "Districts verified");
    Ok(())
}

pub async fn list_names(pool: &SqlitePool) -> AppResult<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar("SELECT name FROM district ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(names)
}

pub async fn exists(pool: &SqlitePool, name: &str) -> AppResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM district WHERE name = ?1")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}
