use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/warehouse", get(warehouse))
}

/// GET /api/diag/warehouse - runs a trivial query against the warehouse to
/// confirm auth and connectivity.
async fn warehouse(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.repo.ping().await?;
    Ok(Json(json!({ "ok": true })))
}
