//! Server configuration
//!
//! All settings come from environment variables. Secrets (JWT signing key,
//! bootstrap admin credentials) are required outside the development
//! environment; startup aborts when they are missing rather than running
//! with auth disabled.

use anyhow::{Context, Result, bail};

/// Membership server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT signing secret for admin sessions
    pub jwt_secret: String,
    /// Bootstrap admin username (seeded at startup if absent)
    pub admin_username: String,
    /// Bootstrap admin password (hashed before storage)
    pub admin_password: String,
    /// Directory for uploaded member photos
    pub upload_dir: String,
    /// Directory for cached ID card PDFs
    pub idcard_dir: String,
    /// Allowed CORS origins (comma-separated); empty means permissive (dev)
    pub cors_origins: Vec<String>,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String> {
        match std::env::var(name) {
            Ok(v) if !v.is_empty() => Ok(v),
            _ if environment == "development" => Ok(format!("dev-{name}-not-for-production")),
            _ => bail!("{name} must be set in {environment} environment"),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let jwt_secret = Self::require_secret("JWT_SECRET", &environment)
            .context("admin auth cannot start without a signing secret")?;
        let admin_username = Self::require_secret("ADMIN_USERNAME", &environment)?;
        let admin_password = Self::require_secret("ADMIN_PASSWORD", &environment)?;

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/membership.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            jwt_secret,
            admin_username,
            admin_password,
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
            idcard_dir: std::env::var("IDCARD_DIR").unwrap_or_else(|_| "idcards".into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
