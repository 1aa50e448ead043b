//! Shared application state
//!
//! Constructed once at startup and cloned into every handler — no global
//! singletons. Startup connects, migrates, seeds the district list and the
//! bootstrap admin, and ensures the blob directories exist.

use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::config::Config;
use crate::db::{self, DbService, admins, districts};
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT issue/verify service for admin sessions
    pub jwt: JwtService,
    /// Directory holding uploaded member photos
    pub upload_dir: PathBuf,
    /// Directory holding cached ID card PDFs
    pub idcard_dir: PathBuf,
}

impl AppState {
    /// Connect, migrate, seed, and prepare blob directories
    pub async fn new(config: &Config) -> AppResult<Self> {
        if let Some(parent) = PathBuf::from(&config.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::internal(format!("Failed to create data dir: {e}")))?;
        }

        let db = DbService::new(&config.database_path).await?;

        districts::seed(&db.pool).await?;

        let password_hash = crate::auth::hash_password(&config.admin_password)?;
        if admins::create_if_absent(&db.pool, &config.admin_username, &password_hash).await? {
            tracing::info!(username = %config.admin_username, "Bootstrap admin created");
        }

        let upload_dir = PathBuf::from(&config.upload_dir);
        let idcard_dir = PathBuf::from(&config.idcard_dir);
        for dir in [&upload_dir, &idcard_dir] {
            std::fs::create_dir_all(dir).map_err(|e| {
                AppError::internal(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }

        Ok(Self {
            pool: db.pool,
            jwt: JwtService::new(&config.jwt_secret),
            upload_dir,
            idcard_dir,
        })
    }

    /// Build a state over an already-open pool (tests)
    pub fn with_pool(
        pool: SqlitePool,
        jwt_secret: &str,
        upload_dir: PathBuf,
        idcard_dir: PathBuf,
    ) -> Self {
        Self {
            pool,
            jwt: JwtService::new(jwt_secret),
            upload_dir,
            idcard_dir,
        }
    }

    /// Flush and close the connection pool
    pub async fn shutdown(&self) {
        db::DbService {
            pool: self.pool.clone(),
        }
        .close()
        .await;
    }
}
