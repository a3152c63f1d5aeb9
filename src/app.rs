use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::routes::{diag, health, metadata, metrics, nlq, webhook};
use crate::state::AppState;

/// Logged at startup so the boot log shows the live surface.
pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/health",
    "/api/metrics/compare-periods",
    "/api/nlq/parse",
    "/api/metadata/months-available",
    "/api/webhook/trigger",
    "/api/diag/warehouse",
];

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .route("/", get(root))
        .nest("/health", health::router())
        .nest("/api/metrics", metrics::router())
        .nest("/api/nlq", nlq::router())
        .nest("/api/metadata", metadata::router())
        .nest("/api/webhook", webhook::router())
        .nest("/api/diag", diag::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "ok": true, "service": "ads-metrics-backend" }))
}
