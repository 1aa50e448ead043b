//! ID card download routes
//!
//! `/admin/idcard/{mobile}` is the admin-gated path; `/download-id/{mobile}`
//! is the public legacy path members use from the confirmation page. Both
//! stream the same cached PDF.

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
    routing::get,
};

use crate::error::{AppError, AppResult};
use crate::idcard;
use crate::state::AppState;

pub fn public_router() -> Router<AppState> {
    Router::new().route("/download-id/{mobile}", get(download))
}

pub fn protected_router() -> Router<AppState> {
    Router::new().route("/admin/idcard/{mobile}", get(download))
}

/// Stream the rendered card as an attachment
async fn download(
    State(state): State<AppState>,
    Path(mobile): Path<String>,
) -> AppResult<impl IntoResponse> {
    let bytes = idcard::get_or_render(&state, &mobile).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    let disposition = format!("attachment; filename=\"{mobile}_ID_Card.pdf\"");
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::internal(format!("Invalid header value: {e}")))?,
    );

    Ok((headers, bytes))
}
