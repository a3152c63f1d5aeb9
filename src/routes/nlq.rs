use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{ComparisonResult, DateParams, MetricSelector, NlqRequest, TimePeriodSpec};
use crate::services::{metrics_service, nlq_service};
use crate::state::AppState;

const COMPARE_ENDPOINT: &str = "/api/metrics/compare-periods";

pub fn router() -> Router<AppState> {
    Router::new().route("/parse", post(parse))
}

#[derive(Debug, Serialize)]
struct NlqPlanResponse {
    metrics: Vec<MetricSelector>,
    time_periods: [TimePeriodSpec; 2],
    api_params: DateParams,
    endpoint: &'static str,
    suggested_url: String,
}

#[derive(Debug, Serialize)]
struct NlqExecuteResponse {
    question: String,
    metrics: Vec<MetricSelector>,
    ranges: DateParams,
    result: ComparisonResult,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum NlqResponse {
    Plan(NlqPlanResponse),
    Executed(NlqExecuteResponse),
}

/// POST /api/nlq/parse
///
/// Body: `{"question": "...", "execute": true}`. With `execute=false` only
/// the parsed plan (metrics, periods, resolved dates) comes back; with
/// `execute=true` the comparison runs against the warehouse as well.
async fn parse(
    State(state): State<AppState>,
    Json(req): Json<NlqRequest>,
) -> Result<Json<NlqResponse>, AppError> {
    info!("POST /api/nlq/parse - Question: {}", req.question);

    let today = Utc::now().date_naive();
    let resolved = nlq_service::recognize_and_resolve(&state.nlq, &req.question, today)
        .ok_or(AppError::Unrecognized)?;
    let params = DateParams::from(resolved.window);

    if !req.execute {
        return Ok(Json(NlqResponse::Plan(NlqPlanResponse {
            metrics: resolved.metrics,
            time_periods: resolved.periods,
            api_params: params,
            endpoint: COMPARE_ENDPOINT,
            suggested_url: params.suggested_url(),
        })));
    }

    let result =
        metrics_service::compare_periods(state.repo.as_ref(), &resolved.window, &resolved.metrics)
            .await?;

    Ok(Json(NlqResponse::Executed(NlqExecuteResponse {
        question: req.question,
        metrics: resolved.metrics,
        ranges: params,
        result,
    })))
}
