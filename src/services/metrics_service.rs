use crate::domain::compare;
use crate::errors::AppError;
use crate::external::metrics_repository::MetricsRepository;
use crate::models::{ComparisonResult, DateRange, DeltaReport, MetricSelector, PeriodWindowPair};

/// Span covering both windows, fetched in a single warehouse round trip.
/// Explicit caller windows may arrive in either chronological order.
fn fetch_span(window: &PeriodWindowPair) -> DateRange {
    DateRange {
        start: window.first.start.min(window.second.start),
        end: window.first.end.max(window.second.end),
    }
}

/// Fetch rows for the combined span and compare the two windows.
pub async fn compare_periods(
    repo: &dyn MetricsRepository,
    window: &PeriodWindowPair,
    metrics: &[MetricSelector],
) -> Result<ComparisonResult, AppError> {
    let rows = repo.fetch_daily_metrics(fetch_span(window)).await?;
    Ok(compare::compare(&rows, window, metrics))
}

/// Explicit-dates variant: filtered periods plus per-metric percent deltas
/// computed from the unfiltered aggregates.
pub async fn compare_periods_with_deltas(
    repo: &dyn MetricsRepository,
    window: &PeriodWindowPair,
    metrics: &[MetricSelector],
) -> Result<(ComparisonResult, DeltaReport), AppError> {
    let rows = repo.fetch_daily_metrics(fetch_span(window)).await?;
    let (first, second) = compare::aggregate(&rows, window);
    let report = compare::deltas(&first, &second);
    let result = ComparisonResult {
        first_period: compare::project(&first, metrics),
        second_period: compare::project(&second, metrics),
    };
    Ok((result, report))
}
