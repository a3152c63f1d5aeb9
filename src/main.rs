use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use ads_metrics_backend::app;
use ads_metrics_backend::config::Config;
use ads_metrics_backend::domain::nlq::NlqConfig;
use ads_metrics_backend::external::bigquery::BigQueryRepository;
use ads_metrics_backend::external::webhook::WebhookClient;
use ads_metrics_backend::logging::{init_logging, LoggingConfig};
use ads_metrics_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let config = Config::from_env();
    tracing::info!(
        "Warehouse: {} (location={})",
        config.warehouse.table_fqn(),
        config.warehouse.location
    );

    let state = AppState {
        nlq: NlqConfig::default(),
        repo: Arc::new(BigQueryRepository::new(config.warehouse.clone())),
        webhook: WebhookClient::new(config.n8n_webhook_url.clone()),
    };
    let app = app::create_app(state);

    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 ads-metrics backend running at http://{}/", addr);
    tracing::info!("Registered routes: {:?}", app::ROUTE_PATHS);
    axum::serve(listener, app).await?;

    Ok(())
}
