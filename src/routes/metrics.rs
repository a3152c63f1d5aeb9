use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::{DateRange, DeltaReport, MetricSelector, PeriodWindowPair};
use crate::services::metrics_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/compare-periods", get(compare_periods))
}

#[derive(Debug, Deserialize)]
struct ComparePeriodsQuery {
    first_start: String,
    first_end: String,
    second_start: String,
    second_end: String,
    /// "CAC,ROAS" or "all" (default)
    metrics: Option<String>,
}

#[derive(Debug, Serialize)]
struct PeriodsEcho {
    first: DateRange,
    second: DateRange,
}

#[derive(Debug, Serialize)]
struct ComparePeriodsResponse {
    periods: PeriodsEcho,
    first_period: serde_json::Value,
    second_period: serde_json::Value,
    deltas_pct: DeltaReport,
}

/// GET /api/metrics/compare-periods
///
/// Explicit-dates comparison. Example:
/// /api/metrics/compare-periods?first_start=2025-05-01&first_end=2025-05-31&second_start=2025-06-01&second_end=2025-06-30
async fn compare_periods(
    Query(params): Query<ComparePeriodsQuery>,
    State(state): State<AppState>,
) -> Result<Json<ComparePeriodsResponse>, AppError> {
    let first = parse_range("First", &params.first_start, &params.first_end)?;
    let second = parse_range("Second", &params.second_start, &params.second_end)?;
    // Overlap between explicitly supplied windows is the caller's business;
    // each window only has to be a valid range on its own.
    let window = PeriodWindowPair { first, second };
    let metrics = parse_metrics(params.metrics.as_deref())?;

    info!(
        "GET /api/metrics/compare-periods - first {}..{} second {}..{}",
        first.start, first.end, second.start, second.end
    );

    let (result, deltas) =
        metrics_service::compare_periods_with_deltas(state.repo.as_ref(), &window, &metrics)
            .await?;

    Ok(Json(ComparePeriodsResponse {
        periods: PeriodsEcho { first, second },
        first_period: result.first_period,
        second_period: result.second_period,
        deltas_pct: deltas,
    }))
}

fn parse_date(label: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {label} date. Use YYYY-MM-DD")))
}

fn parse_range(label: &str, start: &str, end: &str) -> Result<DateRange, AppError> {
    let start = parse_date(label, start)?;
    let end = parse_date(label, end)?;
    if start > end {
        return Err(AppError::Validation(format!(
            "{label} period start must be before end"
        )));
    }
    Ok(DateRange { start, end })
}

fn parse_metrics(raw: Option<&str>) -> Result<Vec<MetricSelector>, AppError> {
    let Some(raw) = raw else {
        return Ok(vec![MetricSelector::All]);
    };
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(vec![MetricSelector::All]);
    }
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            MetricSelector::parse(s)
                .ok_or_else(|| AppError::Validation(format!("Unknown metric: {s}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_rejects_inverted_dates() {
        assert!(parse_range("First", "2025-06-30", "2025-06-01").is_err());
        assert!(parse_range("First", "2025-06-01", "2025-06-30").is_ok());
    }

    #[test]
    fn test_parse_range_rejects_bad_format() {
        assert!(parse_range("First", "06/01/2025", "2025-06-30").is_err());
    }

    #[test]
    fn test_parse_metrics_csv() {
        assert_eq!(
            parse_metrics(Some("CAC,ROAS")).unwrap(),
            vec![MetricSelector::Cac, MetricSelector::Roas]
        );
        assert_eq!(parse_metrics(None).unwrap(), vec![MetricSelector::All]);
        assert_eq!(parse_metrics(Some("All")).unwrap(), vec![MetricSelector::All]);
        assert!(parse_metrics(Some("clicks")).is_err());
    }
}
