use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::PeriodWindowPair;

/// Closed set of metrics a caller can ask for. `All` means no filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricSelector {
    #[serde(rename = "CAC")]
    Cac,
    #[serde(rename = "ROAS")]
    Roas,
    #[serde(rename = "spend")]
    Spend,
    #[serde(rename = "conversions")]
    Conversions,
    #[serde(rename = "revenue")]
    Revenue,
    #[serde(rename = "all")]
    All,
}

impl MetricSelector {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "cac" => Some(Self::Cac),
            "roas" => Some(Self::Roas),
            "spend" => Some(Self::Spend),
            "conversions" => Some(Self::Conversions),
            "revenue" => Some(Self::Revenue),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Key under which this metric appears in period objects.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Cac => "CAC",
            Self::Roas => "ROAS",
            Self::Spend => "spend",
            Self::Conversions => "conversions",
            Self::Revenue => "revenue",
            Self::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DaysRole {
    Last,
    Prior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthRole {
    Current,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekRole {
    Last,
    Prior,
}

/// One recognized time period. The recognizer only ever emits these in
/// matched pairs (see `domain::nlq`), never on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "unit")]
pub enum TimePeriodSpec {
    #[serde(rename = "days")]
    RelativeDays { value: i64, role: DaysRole },
    #[serde(rename = "month")]
    RelativeMonth { role: MonthRole },
    #[serde(rename = "named_month")]
    NamedMonth { month: u32 },
    #[serde(rename = "week")]
    RelativeWeek { role: WeekRole },
}

#[derive(Debug, Deserialize)]
pub struct NlqRequest {
    pub question: String,
    #[serde(default = "default_execute")]
    pub execute: bool,
}

fn default_execute() -> bool {
    true
}

/// Resolved window as flat query parameters, the shape the explicit-dates
/// endpoint accepts.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DateParams {
    pub first_start: NaiveDate,
    pub first_end: NaiveDate,
    pub second_start: NaiveDate,
    pub second_end: NaiveDate,
}

impl From<PeriodWindowPair> for DateParams {
    fn from(window: PeriodWindowPair) -> Self {
        Self {
            first_start: window.first.start,
            first_end: window.first.end,
            second_start: window.second.start,
            second_end: window.second.end,
        }
    }
}

impl DateParams {
    /// Relative URL replaying this comparison through the explicit path.
    pub fn suggested_url(&self) -> String {
        format!(
            "/api/metrics/compare-periods?first_start={}&first_end={}&second_start={}&second_end={}",
            self.first_start, self.first_end, self.second_start, self.second_end
        )
    }
}
