use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of ad performance as returned by the warehouse, already summed
/// per calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMetricRow {
    pub date: NaiveDate,
    pub spend: f64,
    pub conversions: f64,
    pub revenue: f64,
}

/// Inclusive calendar span. Generated ranges always satisfy `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The two windows of a comparison. When produced by the range generator
/// the windows are disjoint; explicit caller input is taken as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindowPair {
    pub first: DateRange,
    pub second: DateRange,
}

/// Sums and derived ratios for one window. `cac`/`roas` are `None` when
/// their denominator is zero, and carry the exact quotient otherwise;
/// rounding is applied only when a period is projected for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodAggregate {
    pub period: String,
    pub spend: f64,
    pub conversions: f64,
    pub revenue: f64,
    #[serde(rename = "CAC")]
    pub cac: Option<f64>,
    #[serde(rename = "ROAS")]
    pub roas: Option<f64>,
}

/// Metric-filtered view of both periods. Each side is a JSON object with
/// `period` plus the requested metric keys.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub first_period: serde_json::Value,
    pub second_period: serde_json::Value,
}

/// Percent change of each metric, second period against first. `None`
/// wherever the baseline is zero or missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaReport {
    pub spend: Option<f64>,
    pub conversions: Option<f64>,
    pub revenue: Option<f64>,
    #[serde(rename = "CAC")]
    pub cac: Option<f64>,
    #[serde(rename = "ROAS")]
    pub roas: Option<f64>,
}

/// One calendar month present in the warehouse.
#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    pub data_month: NaiveDate,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub record_count: i64,
}
