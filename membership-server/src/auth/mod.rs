//! Authentication: argon2 password hashing, JWT sessions, admin middleware

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{AdminClaims, CurrentAdmin, JwtService};
pub use middleware::{ADMIN_COOKIE, require_admin};
pub use password::{hash_password, verify_password};
