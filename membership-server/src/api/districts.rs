//! District listing route

use axum::{Json, Router, extract::State, routing::get};

use crate::db::districts;
use crate::error::AppResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/districts", get(list))
}

/// GET /districts — seeded district names
async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let names = districts::list_names(&state.pool).await?;
    Ok(Json(names))
}
