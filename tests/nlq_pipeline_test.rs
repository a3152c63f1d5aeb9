//! End-to-end pipeline tests: question -> recognized periods -> resolved
//! windows -> comparison over a stub warehouse repository.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde_json::json;

use ads_metrics_backend::domain::nlq::NlqConfig;
use ads_metrics_backend::external::metrics_repository::{MetricsRepository, RepositoryError};
use ads_metrics_backend::models::{DailyMetricRow, DateRange, MetricSelector, MonthSummary};
use ads_metrics_backend::services::{metrics_service, nlq_service};

/// In-memory repository holding a fixed set of daily rows.
struct StubRepository {
    rows: Vec<DailyMetricRow>,
}

#[async_trait]
impl MetricsRepository for StubRepository {
    async fn fetch_daily_metrics(
        &self,
        span: DateRange,
    ) -> Result<Vec<DailyMetricRow>, RepositoryError> {
        Ok(self
            .rows
            .iter()
            .filter(|r| span.contains(r.date))
            .cloned()
            .collect())
    }

    async fn fetch_available_months(&self) -> Result<Vec<MonthSummary>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// One row per day over `[start, end]` with constant daily figures.
fn daily_rows(start: NaiveDate, end: NaiveDate, spend: f64, conversions: f64) -> Vec<DailyMetricRow> {
    let mut rows = Vec::new();
    let mut date = start;
    while date <= end {
        rows.push(DailyMetricRow {
            date,
            spend,
            conversions,
            revenue: conversions * 100.0,
        });
        date += Duration::days(1);
    }
    rows
}

#[tokio::test]
async fn relative_days_question_end_to_end() {
    let today = d(2025, 6, 30);
    // June: 10/day spend, May: 20/day spend
    let mut rows = daily_rows(d(2025, 5, 1), d(2025, 5, 31), 20.0, 2.0);
    rows.extend(daily_rows(d(2025, 6, 1), d(2025, 6, 30), 10.0, 1.0));
    let repo = StubRepository { rows };

    let resolved = nlq_service::recognize_and_resolve(
        &NlqConfig::default(),
        "Compare performance for last 30 days vs prior 30 days",
        today,
    )
    .expect("question should resolve");

    assert_eq!(resolved.window.second, DateRange { start: d(2025, 6, 1), end: d(2025, 6, 30) });
    assert_eq!(resolved.window.first, DateRange { start: d(2025, 5, 2), end: d(2025, 5, 31) });

    let result = metrics_service::compare_periods(&repo, &resolved.window, &resolved.metrics)
        .await
        .expect("stub repository never fails");

    // first window: 30 days of May at 20/day
    assert_eq!(result.first_period["spend"], json!(600.0));
    assert_eq!(result.first_period["conversions"], json!(60.0));
    assert_eq!(result.first_period["CAC"], json!(10.0));
    // second window: 30 days of June at 10/day
    assert_eq!(result.second_period["spend"], json!(300.0));
    assert_eq!(result.second_period["ROAS"], json!(10.0));
}

#[tokio::test]
async fn month_question_filters_to_requested_metrics() {
    let today = d(2025, 6, 15);
    let mut rows = daily_rows(d(2025, 5, 1), d(2025, 5, 31), 20.0, 2.0);
    rows.extend(daily_rows(d(2025, 6, 1), d(2025, 6, 15), 10.0, 1.0));
    let repo = StubRepository { rows };

    let resolved = nlq_service::recognize_and_resolve(
        &NlqConfig::default(),
        "CAC and ROAS this month vs last month",
        today,
    )
    .expect("question should resolve");

    assert_eq!(
        resolved.metrics,
        vec![MetricSelector::Cac, MetricSelector::Roas]
    );
    // current month truncated at today, previous month in full
    assert_eq!(resolved.window.second, DateRange { start: d(2025, 6, 1), end: d(2025, 6, 15) });
    assert_eq!(resolved.window.first, DateRange { start: d(2025, 5, 1), end: d(2025, 5, 31) });

    let result = metrics_service::compare_periods(&repo, &resolved.window, &resolved.metrics)
        .await
        .expect("stub repository never fails");

    let second = result.second_period.as_object().unwrap();
    assert_eq!(second.get("period"), Some(&json!("second")));
    assert!(second.contains_key("CAC"));
    assert!(second.contains_key("ROAS"));
    assert!(!second.contains_key("spend"));
}

#[tokio::test]
async fn empty_second_window_yields_zeroed_period() {
    let today = d(2025, 6, 30);
    // Data only in May; the trailing-30-days window has no rows
    let rows = daily_rows(d(2025, 5, 1), d(2025, 5, 31), 20.0, 2.0);
    let repo = StubRepository { rows };

    let resolved = nlq_service::recognize_and_resolve(
        &NlqConfig::default(),
        "last 30 days vs prior 30 days",
        today,
    )
    .expect("question should resolve");

    let result = metrics_service::compare_periods(&repo, &resolved.window, &resolved.metrics)
        .await
        .expect("stub repository never fails");

    assert_eq!(result.second_period["spend"], json!(0.0));
    assert!(result.second_period["CAC"].is_null());
    assert!(result.second_period["ROAS"].is_null());
    assert_eq!(result.first_period["spend"], json!(600.0));
}

#[tokio::test]
async fn deltas_reported_for_explicit_windows() {
    let mut rows = daily_rows(d(2025, 5, 1), d(2025, 5, 31), 20.0, 2.0);
    rows.extend(daily_rows(d(2025, 6, 1), d(2025, 6, 30), 10.0, 1.0));
    let repo = StubRepository { rows };

    let window = ads_metrics_backend::models::PeriodWindowPair {
        first: DateRange { start: d(2025, 5, 1), end: d(2025, 5, 31) },
        second: DateRange { start: d(2025, 6, 1), end: d(2025, 6, 30) },
    };

    let (_result, deltas) = metrics_service::compare_periods_with_deltas(
        &repo,
        &window,
        &[MetricSelector::All],
    )
    .await
    .expect("stub repository never fails");

    // spend 620 -> 300
    assert_eq!(deltas.spend, Some(-51.61));
    // CAC is 10.0 in both windows
    assert_eq!(deltas.cac, Some(0.0));
}
