use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/trigger", get(trigger))
}

#[derive(Debug, Deserialize)]
struct TriggerQuery {
    #[serde(rename = "insertId")]
    insert_id: String,
    amount: f64,
}

/// GET /api/webhook/trigger?insertId=...&amount=...
///
/// Forwards the event to the configured n8n workflow and relays its reply.
async fn trigger(
    Query(params): Query<TriggerQuery>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    info!(
        "GET /api/webhook/trigger - insertId={} amount={}",
        params.insert_id, params.amount
    );

    let reply = state.webhook.trigger(&params.insert_id, params.amount).await?;

    Ok(Json(json!({
        "sent": true,
        "forwarded_params": { "insertId": params.insert_id, "amount": params.amount },
        "n8n_response": reply,
    })))
}
