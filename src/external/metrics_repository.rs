use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DailyMetricRow, DateRange, MonthSummary};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("auth error: {0}")]
    Auth(String),
}

#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Daily spend/conversions/revenue totals over `span`, one row per
    /// calendar day that has data. Days without rows are simply absent;
    /// null cells come back as zero.
    async fn fetch_daily_metrics(
        &self,
        span: DateRange,
    ) -> Result<Vec<DailyMetricRow>, RepositoryError>;

    /// Months present in the warehouse, newest first, with row counts.
    async fn fetch_available_months(&self) -> Result<Vec<MonthSummary>, RepositoryError>;

    /// Cheap liveness probe against the warehouse.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
