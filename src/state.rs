use std::sync::Arc;

use crate::domain::nlq::NlqConfig;
use crate::external::metrics_repository::MetricsRepository;
use crate::external::webhook::WebhookClient;

#[derive(Clone)]
pub struct AppState {
    pub nlq: NlqConfig,
    pub repo: Arc<dyn MetricsRepository>,
    pub webhook: WebhookClient,
}
