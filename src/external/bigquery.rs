//! BigQuery-backed repository, speaking the `jobs.query` REST endpoint
//! directly with a metadata-server or gcloud access token.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::WarehouseConfig;
use crate::external::metrics_repository::{MetricsRepository, RepositoryError};
use crate::models::{DailyMetricRow, DateRange, MonthSummary};

const METADATA_TOKEN_URL: &str =
    "http://metadata/computeMetadata/v1/instance/service-accounts/default/token";

pub struct BigQueryRepository {
    client: reqwest::Client,
    config: WarehouseConfig,
}

impl BigQueryRepository {
    pub fn new(config: WarehouseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn query_url(&self) -> String {
        format!(
            "https://bigquery.googleapis.com/bigquery/v2/projects/{}/queries",
            self.config.project_id
        )
    }

    /// Token order: GCE/Cloud Run metadata server first, then a local
    /// `gcloud auth print-access-token` for development machines.
    async fn access_token(&self) -> Result<String, RepositoryError> {
        let metadata = self
            .client
            .get(METADATA_TOKEN_URL)
            .header("Metadata-Flavor", "Google")
            .timeout(Duration::from_secs(2))
            .send()
            .await;

        if let Ok(resp) = metadata {
            if resp.status().is_success() {
                let body: MetadataToken = resp
                    .json()
                    .await
                    .map_err(|e| RepositoryError::Parse(e.to_string()))?;
                return Ok(body.access_token);
            }
        }

        let output = tokio::process::Command::new("gcloud")
            .args(["auth", "print-access-token"])
            .output()
            .await
            .map_err(|_| {
                RepositoryError::Auth(
                    "no access token available (metadata and gcloud both unavailable)".to_string(),
                )
            })?;

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if output.status.success() && !token.is_empty() {
            Ok(token)
        } else {
            Err(RepositoryError::Auth(
                "no access token available (metadata and gcloud both unavailable)".to_string(),
            ))
        }
    }

    async fn run_query(
        &self,
        sql: &str,
        params: Vec<QueryParameter>,
    ) -> Result<QueryResponse, RepositoryError> {
        let token = self.access_token().await?;

        let body = QueryRequest {
            query: sql.to_string(),
            use_legacy_sql: false,
            location: self.config.location.clone(),
            parameter_mode: (!params.is_empty()).then(|| "NAMED".to_string()),
            query_parameters: params,
        };

        tracing::info!(
            "BQ query (location={}): {}",
            self.config.location,
            sql.split_whitespace().collect::<Vec<_>>().join(" ")
        );

        let resp = self
            .client
            .post(self.query_url())
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(1000).collect();
            return Err(RepositoryError::BadResponse(format!(
                "BigQuery HTTP {status}: {snippet}"
            )));
        }

        let data: QueryResponse = resp
            .json()
            .await
            .map_err(|e| RepositoryError::Parse(e.to_string()))?;

        // BigQuery can return an error payload with a 200 status
        if let Some(error) = data.error {
            return Err(RepositoryError::BadResponse(format!(
                "BigQuery error payload: {error}"
            )));
        }

        Ok(data)
    }
}

#[async_trait]
impl MetricsRepository for BigQueryRepository {
    async fn fetch_daily_metrics(
        &self,
        span: DateRange,
    ) -> Result<Vec<DailyMetricRow>, RepositoryError> {
        let sql = format!(
            "SELECT DATE(date) AS dt, \
                    SUM(spend) AS spend, \
                    SUM(conversions) AS conversions, \
                    SUM(revenue) AS revenue \
             FROM {} \
             WHERE DATE(date) BETWEEN @start AND @end \
             GROUP BY dt \
             ORDER BY dt",
            self.config.table_fqn()
        );

        let params = vec![
            QueryParameter::date("start", span.start),
            QueryParameter::date("end", span.end),
        ];

        let response = self.run_query(&sql, params).await?;
        response
            .records()
            .iter()
            .map(|record| {
                Ok(DailyMetricRow {
                    date: field_date(record, "dt")?,
                    spend: field_f64(record, "spend"),
                    conversions: field_f64(record, "conversions"),
                    revenue: field_f64(record, "revenue"),
                })
            })
            .collect()
    }

    async fn fetch_available_months(&self) -> Result<Vec<MonthSummary>, RepositoryError> {
        let sql = format!(
            "SELECT DATE_TRUNC(DATE(date), MONTH) AS data_month, \
                    MIN(DATE(date)) AS month_start, \
                    MAX(DATE(date)) AS month_end, \
                    COUNT(*) AS record_count \
             FROM {} \
             GROUP BY data_month \
             ORDER BY data_month DESC",
            self.config.table_fqn()
        );

        let response = self.run_query(&sql, Vec::new()).await?;
        response
            .records()
            .iter()
            .map(|record| {
                Ok(MonthSummary {
                    data_month: field_date(record, "data_month")?,
                    month_start: field_date(record, "month_start")?,
                    month_end: field_date(record, "month_end")?,
                    record_count: field_f64(record, "record_count") as i64,
                })
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.run_query("SELECT 1 AS ok", Vec::new()).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// jobs.query wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    query: String,
    use_legacy_sql: bool,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter_mode: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    query_parameters: Vec<QueryParameter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryParameter {
    name: String,
    parameter_type: ParameterType,
    parameter_value: ParameterValue,
}

#[derive(Debug, Serialize)]
struct ParameterType {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Serialize)]
struct ParameterValue {
    value: String,
}

impl QueryParameter {
    fn date(name: &str, value: NaiveDate) -> Self {
        Self {
            name: name.to_string(),
            parameter_type: ParameterType {
                kind: "DATE".to_string(),
            },
            parameter_value: ParameterValue {
                value: value.to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    schema: Option<TableSchema>,
    rows: Option<Vec<TableRow>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TableSchema {
    fields: Vec<TableField>,
}

#[derive(Debug, Deserialize)]
struct TableField {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TableRow {
    f: Vec<TableCell>,
}

#[derive(Debug, Deserialize)]
struct TableCell {
    v: Option<serde_json::Value>,
}

impl QueryResponse {
    /// Zip each row's positional cells with the schema field names.
    fn records(&self) -> Vec<HashMap<&str, Option<&str>>> {
        let Some(schema) = &self.schema else {
            return Vec::new();
        };
        let rows = self.rows.as_deref().unwrap_or(&[]);

        rows.iter()
            .map(|row| {
                schema
                    .fields
                    .iter()
                    .zip(row.f.iter())
                    .map(|(field, cell)| (field.name.as_str(), cell_str(cell)))
                    .collect()
            })
            .collect()
    }
}

fn cell_str(cell: &TableCell) -> Option<&str> {
    match &cell.v {
        Some(serde_json::Value::String(s)) if s != "null" => Some(s.as_str()),
        _ => None,
    }
}

/// Null cells are zero, per the comparator's contract.
fn field_f64(record: &HashMap<&str, Option<&str>>, name: &str) -> f64 {
    record
        .get(name)
        .copied()
        .flatten()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}

fn field_date(
    record: &HashMap<&str, Option<&str>>,
    name: &str,
) -> Result<NaiveDate, RepositoryError> {
    let raw = record
        .get(name)
        .copied()
        .flatten()
        .ok_or_else(|| RepositoryError::Parse(format!("missing `{name}` in query result")))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| RepositoryError::Parse(format!("bad `{name}` date `{raw}`: {e}")))
}
