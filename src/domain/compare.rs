//! Period comparator: buckets daily rows into the two windows, sums them,
//! derives CAC/ROAS with safe division, and filters to requested metrics.

use serde_json::{json, Map, Value};

use crate::models::{
    ComparisonResult, DailyMetricRow, DeltaReport, MetricSelector, PeriodAggregate,
    PeriodWindowPair,
};

/// Quotient that is `None` instead of an error or infinity when the
/// divisor is zero.
pub fn safe_divide(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Percent change from `old` to `new`, rounded to 2 decimals. `None` when
/// either side is missing or the baseline is zero.
pub fn pct_delta(new: Option<f64>, old: Option<f64>) -> Option<f64> {
    let (new, old) = (new?, old?);
    safe_divide(new - old, old).map(|v| round2(v * 100.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum both windows. Rows outside either window are dropped; a row that
/// falls in both (possible only with overlapping explicit input) counts
/// toward the first window, matching the warehouse CASE labelling. An
/// empty window still yields a zeroed aggregate.
pub fn aggregate(
    rows: &[DailyMetricRow],
    window: &PeriodWindowPair,
) -> (PeriodAggregate, PeriodAggregate) {
    let mut first = (0.0, 0.0, 0.0);
    let mut second = (0.0, 0.0, 0.0);

    for row in rows {
        let bucket = if window.first.contains(row.date) {
            &mut first
        } else if window.second.contains(row.date) {
            &mut second
        } else {
            continue;
        };
        bucket.0 += row.spend;
        bucket.1 += row.conversions;
        bucket.2 += row.revenue;
    }

    (finish("first", first), finish("second", second))
}

fn finish(period: &str, (spend, conversions, revenue): (f64, f64, f64)) -> PeriodAggregate {
    // Exact quotients here; rounding happens only when a period is
    // projected for output, so delta math never runs on rounded inputs.
    PeriodAggregate {
        period: period.to_string(),
        spend,
        conversions,
        revenue,
        cac: safe_divide(spend, conversions),
        roas: safe_divide(revenue, spend),
    }
}

/// Project an aggregate down to `period` plus the requested metric keys,
/// rounding the derived ratios to 2 decimals. `all` keeps every field.
pub fn project(aggregate: &PeriodAggregate, metrics: &[MetricSelector]) -> Value {
    let keep_all = metrics.iter().any(|m| *m == MetricSelector::All);
    let mut out = Map::new();
    out.insert("period".to_string(), json!(aggregate.period));

    let mut put = |key: &'static str, value: Value| {
        if keep_all || metrics.iter().any(|m| m.key() == key) {
            out.insert(key.to_string(), value);
        }
    };
    put("spend", json!(aggregate.spend));
    put("conversions", json!(aggregate.conversions));
    put("revenue", json!(aggregate.revenue));
    put("CAC", json!(aggregate.cac.map(round2)));
    put("ROAS", json!(aggregate.roas.map(round2)));

    Value::Object(out)
}

/// Bucket, sum, derive, filter. Both periods are always present in the
/// result, zero-filled when no rows fall in a window.
pub fn compare(
    rows: &[DailyMetricRow],
    window: &PeriodWindowPair,
    metrics: &[MetricSelector],
) -> ComparisonResult {
    let (first, second) = aggregate(rows, window);
    ComparisonResult {
        first_period: project(&first, metrics),
        second_period: project(&second, metrics),
    }
}

/// Percentage deltas of the second period against the first, computed from
/// unfiltered aggregates.
pub fn deltas(first: &PeriodAggregate, second: &PeriodAggregate) -> DeltaReport {
    DeltaReport {
        spend: pct_delta(Some(second.spend), Some(first.spend)),
        conversions: pct_delta(Some(second.conversions), Some(first.conversions)),
        revenue: pct_delta(Some(second.revenue), Some(first.revenue)),
        cac: pct_delta(second.cac, first.cac),
        roas: pct_delta(second.roas, first.roas),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(date: NaiveDate, spend: f64, conversions: f64, revenue: f64) -> DailyMetricRow {
        DailyMetricRow {
            date,
            spend,
            conversions,
            revenue,
        }
    }

    fn window() -> PeriodWindowPair {
        PeriodWindowPair {
            first: DateRange {
                start: d(2025, 5, 1),
                end: d(2025, 5, 31),
            },
            second: DateRange {
                start: d(2025, 6, 1),
                end: d(2025, 6, 30),
            },
        }
    }

    #[test]
    fn test_safe_divide_zero_denominator() {
        assert_eq!(safe_divide(10.0, 0.0), None);
        assert_eq!(safe_divide(10.0, 4.0), Some(2.5));
        assert_eq!(safe_divide(0.0, 5.0), Some(0.0));
    }

    #[test]
    fn test_pct_delta() {
        assert_eq!(pct_delta(Some(120.0), Some(100.0)), Some(20.0));
        assert_eq!(pct_delta(Some(80.0), Some(100.0)), Some(-20.0));
        assert_eq!(pct_delta(Some(100.0), Some(0.0)), None);
        assert_eq!(pct_delta(None, Some(100.0)), None);
        assert_eq!(pct_delta(Some(100.0), None), None);
        // rounded to 2 decimals
        assert_eq!(pct_delta(Some(1.0), Some(3.0)), Some(-66.67));
    }

    #[test]
    fn test_aggregate_sums_and_ratios() {
        let rows = vec![
            row(d(2025, 5, 10), 100.0, 10.0, 1000.0),
            row(d(2025, 5, 11), 50.0, 5.0, 500.0),
            row(d(2025, 6, 2), 300.0, 20.0, 2400.0),
        ];
        let (first, second) = aggregate(&rows, &window());

        assert_eq!(first.spend, 150.0);
        assert_eq!(first.conversions, 15.0);
        assert_eq!(first.revenue, 1500.0);
        assert_eq!(first.cac, Some(10.0));
        assert_eq!(first.roas, Some(10.0));

        assert_eq!(second.spend, 300.0);
        assert_eq!(second.cac, Some(15.0));
        assert_eq!(second.roas, Some(8.0));
    }

    #[test]
    fn test_aggregate_discards_rows_outside_both_windows() {
        let rows = vec![
            row(d(2025, 4, 30), 999.0, 9.0, 99.0),
            row(d(2025, 7, 1), 999.0, 9.0, 99.0),
            row(d(2025, 6, 15), 10.0, 1.0, 100.0),
        ];
        let (first, second) = aggregate(&rows, &window());
        assert_eq!(first.spend, 0.0);
        assert_eq!(second.spend, 10.0);
    }

    #[test]
    fn test_aggregate_overlapping_row_counted_once() {
        let overlapping = PeriodWindowPair {
            first: DateRange {
                start: d(2025, 6, 1),
                end: d(2025, 6, 15),
            },
            second: DateRange {
                start: d(2025, 6, 10),
                end: d(2025, 6, 30),
            },
        };
        let rows = vec![row(d(2025, 6, 12), 100.0, 10.0, 1000.0)];
        let (first, second) = aggregate(&rows, &overlapping);
        assert_eq!(first.spend, 100.0);
        assert_eq!(second.spend, 0.0);
    }

    #[test]
    fn test_empty_window_zero_sums_null_ratios() {
        let rows = vec![row(d(2025, 5, 10), 150.0, 10.0, 1500.0)];
        let result = compare(&rows, &window(), &[MetricSelector::All]);

        assert_eq!(result.second_period["spend"], json!(0.0));
        assert_eq!(result.second_period["conversions"], json!(0.0));
        assert!(result.second_period["CAC"].is_null());
        assert!(result.second_period["ROAS"].is_null());

        assert_eq!(result.first_period["spend"], json!(150.0));
        assert_eq!(result.first_period["CAC"], json!(15.0));
        assert_eq!(result.first_period["ROAS"], json!(10.0));
    }

    #[test]
    fn test_projection_keeps_only_requested_metrics() {
        let rows = vec![row(d(2025, 5, 10), 150.0, 10.0, 1500.0)];
        let result = compare(
            &rows,
            &window(),
            &[MetricSelector::Cac, MetricSelector::Roas],
        );

        let first = result.first_period.as_object().unwrap();
        assert_eq!(first.get("period"), Some(&json!("first")));
        assert!(first.contains_key("CAC"));
        assert!(first.contains_key("ROAS"));
        assert!(!first.contains_key("spend"));
        assert!(!first.contains_key("conversions"));
        assert!(!first.contains_key("revenue"));
    }

    #[test]
    fn test_projection_all_keeps_everything() {
        let rows = vec![row(d(2025, 5, 10), 150.0, 10.0, 1500.0)];
        let result = compare(&rows, &window(), &[MetricSelector::All]);
        let first = result.first_period.as_object().unwrap();
        assert_eq!(first.len(), 6); // period + 5 metrics
    }

    #[test]
    fn test_deltas_between_periods() {
        let rows = vec![
            row(d(2025, 5, 10), 100.0, 10.0, 1000.0),
            row(d(2025, 6, 10), 150.0, 10.0, 1100.0),
        ];
        let (first, second) = aggregate(&rows, &window());
        let report = deltas(&first, &second);

        assert_eq!(report.spend, Some(50.0));
        assert_eq!(report.conversions, Some(0.0));
        assert_eq!(report.revenue, Some(10.0));
        assert_eq!(report.cac, Some(50.0)); // 15 vs 10
        assert_eq!(report.roas, Some(-26.67)); // 1100/150 vs 10, exact quotients
    }

    #[test]
    fn test_ratios_exact_internally_rounded_in_projection() {
        let rows = vec![row(d(2025, 5, 10), 100.0, 3.0, 200.0)];
        let (first, _) = aggregate(&rows, &window());

        // aggregate keeps the exact quotient for downstream delta math
        assert_eq!(first.cac, Some(100.0 / 3.0));

        // the projected view is what gets the 2-decimal rounding
        let view = project(&first, &[MetricSelector::All]);
        assert_eq!(view["CAC"], json!(33.33));
        assert_eq!(view["ROAS"], json!(2.0));
    }

    #[test]
    fn test_deltas_null_when_baseline_empty() {
        let rows = vec![row(d(2025, 6, 10), 150.0, 10.0, 1100.0)];
        let (first, second) = aggregate(&rows, &window());
        let report = deltas(&first, &second);
        assert_eq!(report.spend, None);
        assert_eq!(report.cac, None);
        assert_eq!(report.roas, None);
    }
}
