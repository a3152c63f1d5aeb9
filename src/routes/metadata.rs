use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::MonthSummary;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/months-available", get(months_available))
}

#[derive(Debug, Serialize)]
struct MonthsAvailableResponse {
    available_months: Vec<MonthSummary>,
    total_months: usize,
}

/// GET /api/metadata/months-available
///
/// Months present in the warehouse with their record counts, newest first.
async fn months_available(
    State(state): State<AppState>,
) -> Result<Json<MonthsAvailableResponse>, AppError> {
    let months = state.repo.fetch_available_months().await?;
    Ok(Json(MonthsAvailableResponse {
        total_months: months.len(),
        available_months: months,
    }))
}
