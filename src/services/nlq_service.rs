use chrono::NaiveDate;

use crate::domain::nlq::{self, NlqConfig};
use crate::domain::ranges;
use crate::models::{MetricSelector, PeriodWindowPair, TimePeriodSpec};

/// A question that resolved all the way to concrete date windows.
#[derive(Debug, Clone)]
pub struct ResolvedQuestion {
    pub metrics: Vec<MetricSelector>,
    pub periods: [TimePeriodSpec; 2],
    pub window: PeriodWindowPair,
}

/// Recognize the question and resolve its periods against `today`.
/// `None` means the phrasing is not one we understand.
pub fn recognize_and_resolve(
    cfg: &NlqConfig,
    question: &str,
    today: NaiveDate,
) -> Option<ResolvedQuestion> {
    let parsed = nlq::recognize(cfg, question)?;
    let window = ranges::generate(&parsed.periods, today)?;
    Some(ResolvedQuestion {
        metrics: parsed.metrics,
        periods: parsed.periods,
        window,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_days_question() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let resolved =
            recognize_and_resolve(&NlqConfig::default(), "last 30 days vs prior 30 days", today)
                .expect("should resolve");

        assert_eq!(resolved.metrics, vec![MetricSelector::All]);
        assert_eq!(
            resolved.window.second.start,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert_eq!(resolved.window.second.end, today);
        assert_eq!(
            resolved.window.first.start,
            NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()
        );
        assert_eq!(
            resolved.window.first.end,
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
        );
    }

    #[test]
    fn test_unrecognized_question_yields_none() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert!(recognize_and_resolve(&NlqConfig::default(), "how is the weather", today).is_none());
    }
}
