//! Membership registration backend
//!
//! HTTP service for a civic organization's member onboarding:
//!
//! - **Registration** (`registration`): multipart form → validated member
//!   record with a sequential membership number
//! - **Numbering** (`numbering`): `PBM-<year>-<seq>` over an atomic counter
//! - **ID cards** (`idcard`): fixed-layout PDF card per member, cached on disk
//! - **Admin** (`auth`, `api::admin`): argon2 + JWT gated dashboard
//! - **Storage** (`db`, `photos`): SQLite document tables and photo blobs

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod idcard;
pub mod numbering;
pub mod photos;
pub mod registration;
pub mod state;
pub mod util;

pub use auth::{CurrentAdmin, JwtService};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
