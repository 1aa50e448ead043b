//! Admin authentication middleware
//!
//! Extracts the session token from the `Authorization: Bearer` header or
//! the `admin_token` cookie, verifies it and checks the admin role. On
//! success a [`CurrentAdmin`] is injected into request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::CurrentAdmin;
use crate::error::AppError;
use crate::state::AppState;

/// Cookie name carrying the admin session token
pub const ADMIN_COOKIE: &str = "admin_token";

/// Pull the admin token out of a request: bearer header first, cookie fallback
fn extract_token(req: &Request) -> Option<String> {
    if let Some(header) = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        && let Some(token) = header.strip_prefix("Bearer ")
    {
        return Some(token.to_string());
    }

    let cookies = req
        .headers()
        .get(http::header::COOKIE)
        .and_then(|h| h.to_str().ok())?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == ADMIN_COOKIE).then(|| value.to_string())
    })
}

/// Require a valid admin session on every request passing through
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match extract_token(&req) {
        Some(t) => t,
        None => {
            tracing::warn!(uri = %req.uri(), "Admin request without token");
            return Err(AppError::Unauthorized);
        }
    };

    let claims = state.jwt.verify(&token).map_err(|e| {
        tracing::warn!(uri = %req.uri(), error = %e, "Admin token rejected");
        e
    })?;

    if claims.role != "admin" {
        tracing::warn!(subject = %claims.sub, role = %claims.role, "Non-admin token on admin route");
        return Err(AppError::forbidden("Admin role required"));
    }

    req.extensions_mut().insert(CurrentAdmin::from(claims));
    Ok(next.run(req).await)
}
