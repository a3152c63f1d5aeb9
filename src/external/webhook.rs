use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("n8n unreachable: {0}")]
    Unreachable(String),
}

/// Forwards accepted events to an n8n workflow webhook.
#[derive(Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Forward the event and relay whatever the workflow replies: JSON if
    /// the content type says so, raw text otherwise.
    pub async fn trigger(&self, insert_id: &str, amount: f64) -> Result<Value, WebhookError> {
        let amount = amount.to_string();
        let resp = self
            .client
            .get(&self.url)
            .query(&[("insertId", insert_id), ("amount", amount.as_str())])
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| WebhookError::Unreachable(e.to_string()))?
            .error_for_status()
            .map_err(|e| WebhookError::Unreachable(e.to_string()))?;

        let is_json = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            resp.json()
                .await
                .map_err(|e| WebhookError::Unreachable(e.to_string()))
        } else {
            let text = resp
                .text()
                .await
                .map_err(|e| WebhookError::Unreachable(e.to_string()))?;
            Ok(Value::String(text))
        }
    }
}
