//! HTTP routes
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`register`] - public member registration
//! - [`districts`] - public district listing
//! - [`admin`] - admin login, account creation, dashboard, delete
//! - [`idcard`] - card download (admin path + public legacy path)

pub mod admin;
pub mod districts;
pub mod health;
pub mod idcard;
pub mod register;

use axum::{Router, middleware};
use http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_admin;
use crate::state::AppState;

/// Build the CORS layer: explicit origins with credentials when configured,
/// permissive otherwise (development)
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    // Cookie-based admin sessions need credentials, which rules out
    // wildcard methods/headers
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Build the full application router with middleware and state applied
pub fn build_app(state: AppState, cors_origins: &[String]) -> Router {
    let protected = Router::new()
        .merge(admin::protected_router())
        .merge(idcard::protected_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new()
        .merge(health::router())
        .merge(register::router())
        .merge(districts::router())
        .merge(admin::login_router())
        .merge(idcard::public_router())
        .merge(protected)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
