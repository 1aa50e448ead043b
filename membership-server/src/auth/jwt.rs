//! Admin session tokens
//!
//! Stateless signed JWTs; validity is entirely signature + expiry. There is
//! no revocation list — logout only clears the client cookie and the token
//! stays cryptographically valid until natural expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Fixed session lifetime
const TOKEN_EXPIRY_HOURS: i64 = 6;

/// Claims carried in an admin session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Username (subject)
    pub sub: String,
    /// Account role, expected to be "admin"
    pub role: String,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

/// JWT issue/verify service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for an authenticated admin (6-hour expiry)
    pub fn issue(&self, username: &str, role: &str) -> AppResult<String> {
        self.issue_with_lifetime(username, role, Duration::hours(TOKEN_EXPIRY_HOURS))
    }

    /// Issue with an explicit lifetime (negative lifetimes produce
    /// already-expired tokens, used by tests)
    pub fn issue_with_lifetime(
        &self,
        username: &str,
        role: &str,
        lifetime: Duration,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = AdminClaims {
            sub: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))
    }

    /// Verify signature and expiry, returning the decoded claims
    pub fn verify(&self, token: &str) -> Result<AdminClaims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let data =
            decode::<AdminClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::InvalidToken,
                }
            })?;
        Ok(data.claims)
    }
}

/// Authenticated admin identity, injected into request extensions by the
/// auth middleware
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub username: String,
    pub role: String,
}

impl From<AdminClaims> for CurrentAdmin {
    fn from(claims: AdminClaims) -> Self {
        Self {
            username: claims.sub,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_verify_roundtrip() {
        let service = JwtService::new("test-secret-at-least-32-bytes-long!!");
        let token = service.issue("admin123", "admin").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, "admin123");
        assert_eq!(claims.role, "admin");
        assert!(claims.exp - claims.iat == 6 * 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = JwtService::new("test-secret-at-least-32-bytes-long!!");
        let token = service
            .issue_with_lifetime("admin123", "admin", Duration::hours(-1))
            .unwrap();

        match service.verify(&token) {
            Err(AppError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {other:?}"),
        }
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = JwtService::new("test-secret-at-least-32-bytes-long!!");
        let token = service.issue("admin123", "admin").unwrap();

        // Flip a character in the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(
            service.verify(&tampered),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let issuer = JwtService::new("first-secret-at-least-32-bytes-long!");
        let verifier = JwtService::new("other-secret-at-least-32-bytes-long!");
        let token = issuer.issue("admin123", "admin").unwrap();

        assert!(verifier.verify(&token).is_err());
    }
}
