//! Admin routes: login, account creation, dashboard listing, member delete
//!
//! Everything except `/admin/login` sits behind the admin auth middleware
//! (applied in `api::build_router`).

use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Deserialize;

use crate::auth::{self, ADMIN_COOKIE};
use crate::db::{admins, members};
use crate::error::{AppError, AppResult};
use crate::idcard;
use crate::state::AppState;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Dashboard pagination bounds
const DEFAULT_PAGE_SIZE: i64 = 100;
const MAX_PAGE_SIZE: i64 = 500;

pub fn login_router() -> Router<AppState> {
    Router::new().route("/admin/login", post(login))
}

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/admin/create-admin", post(create_admin))
        .route("/admin/dashboard", get(dashboard))
        .route("/candidates/{mobile}", delete(delete_member))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /admin/login — verify credentials, issue the session token
///
/// The token goes out both as an http-only cookie and in the JSON body so
/// deployments can use either cookie or bearer auth.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let account = admins::find_by_username(&state.pool, &req.username).await?;

    // Fixed delay before inspecting the result, same cost for every outcome
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(a) if a.is_active => a,
        Some(_) => {
            tracing::warn!(username = %req.username, "Login rejected - account disabled");
            return Err(AppError::invalid_credentials());
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    if !auth::verify_password(&req.password, &account.password_hash) {
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let token = state.jwt.issue(&account.username, &account.role)?;

    tracing::info!(username = %account.username, "Admin logged in");

    let cookie = format!("{ADMIN_COOKIE}={token}; HttpOnly; Secure; SameSite=None; Path=/");
    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::internal(format!("Invalid cookie value: {e}")))?,
    );

    Ok((
        headers,
        Json(serde_json::json!({ "message": "Login successful", "token": token })),
    ))
}

/// POST /admin/create-admin — create another admin account (admin only)
async fn create_admin(
    State(state): State<AppState>,
    Json(req): Json<CreateAdminRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::validation("username and password are required"));
    }

    let role = req.role.as_deref().unwrap_or("admin");
    let password_hash = auth::hash_password(&req.password)?;
    admins::create(&state.pool, req.username.trim(), &password_hash, role).await?;

    tracing::info!(username = %req.username.trim(), role = %role, "Admin account created");
    Ok(Json(serde_json::json!({ "message": "Admin created" })))
}

/// GET /admin/dashboard — redacted member listing, paginated
async fn dashboard(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<members::MemberSummary>>> {
    let limit = page
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = page.offset.unwrap_or(0).max(0);

    let summaries = members::list_summaries(&state.pool, limit, offset).await?;
    Ok(Json(summaries))
}

/// DELETE /candidates/{mobile} — remove a member record and its cached card
async fn delete_member(
    State(state): State<AppState>,
    Path(mobile): Path<String>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if !members::delete_by_mobile(&state.pool, &mobile).await? {
        return Err(AppError::not_found(format!(
            "No member with mobile {mobile}"
        )));
    }

    idcard::remove_cached_card(&state.idcard_dir, &mobile);

    tracing::info!(mobile = %mobile, "Member deleted");
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Candidate deleted successfully" })),
    ))
}
