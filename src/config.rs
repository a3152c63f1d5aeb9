/// Warehouse coordinates for the BigQuery-backed repository.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    pub project_id: String,
    pub dataset: String,
    pub table: String,
    /// Region of the dataset (e.g. US, EU). Queries without it fail with
    /// location errors on non-US datasets.
    pub location: String,
}

impl WarehouseConfig {
    pub fn table_fqn(&self) -> String {
        format!("`{}.{}.{}`", self.project_id, self.dataset, self.table)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub warehouse: WarehouseConfig,
    pub n8n_webhook_url: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            warehouse: WarehouseConfig {
                project_id: env_or("BQ_PROJECT", "n8n-ads-spend"),
                dataset: env_or("BQ_DATASET", "ads_warehouse"),
                table: env_or("BQ_TABLE", "ads_spend_raw"),
                location: env_or("BQ_LOCATION", "US"),
            },
            n8n_webhook_url: env_or("N8N_WEBHOOK_URL", "http://localhost:5678/webhook/ads-metrics"),
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:8000"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
