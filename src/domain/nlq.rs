//! Phrase recognizer: maps a free-form question onto requested metrics and
//! a pair of time periods. Patterns are tried in a fixed order and the
//! first match wins; a question either resolves into exactly two periods
//! or is rejected outright.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{DaysRole, MetricSelector, MonthRole, TimePeriodSpec, WeekRole};

/// Immutable vocabularies for the recognizer, injected rather than read
/// from process-wide state so tests can swap them out.
#[derive(Debug, Clone)]
pub struct NlqConfig {
    /// Scanned in order; first keyword contained in the question wins.
    pub metric_keywords: &'static [(&'static str, MetricSelector)],
    pub month_names: &'static [(&'static str, u32)],
}

impl Default for NlqConfig {
    fn default() -> Self {
        Self {
            metric_keywords: METRIC_KEYWORDS,
            month_names: MONTH_NAMES,
        }
    }
}

const METRIC_KEYWORDS: &[(&str, MetricSelector)] = &[
    ("cac", MetricSelector::Cac),
    ("roas", MetricSelector::Roas),
    ("spend", MetricSelector::Spend),
    ("conversions", MetricSelector::Conversions),
    ("revenue", MetricSelector::Revenue),
    ("performance", MetricSelector::All),
    ("metrics", MetricSelector::All),
];

// English and Spanish month names, including the common "setiembre"
// spelling. Matched against normalized (accent-stripped) text.
const MONTH_NAMES: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("setiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

struct NlqPatterns {
    last_days: Regex,
    prior_days: Regex,
    this_month: Regex,
    last_month: Regex,
    month_vs_month: Regex,
}

fn patterns() -> &'static NlqPatterns {
    static PATTERNS: OnceLock<NlqPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| NlqPatterns {
        last_days: Regex::new(r"last (\d+) days?").unwrap(),
        prior_days: Regex::new(r"(prior|previous) (\d+) days?").unwrap(),
        this_month: Regex::new(r"(this|este)\s+month").unwrap(),
        last_month: Regex::new(r"last\s+month|mes pasado").unwrap(),
        month_vs_month: Regex::new(r"([a-z]+)\s+vs\s+([a-z]+)").unwrap(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuestion {
    pub metrics: Vec<MetricSelector>,
    pub periods: [TimePeriodSpec; 2],
}

/// Lowercase and strip combining marks (NFD) so accented phrasings match
/// the ASCII patterns.
pub fn normalize(question: &str) -> String {
    question
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Recognize a question. Returns `None` when no period pattern matches;
/// never a partial interpretation.
pub fn recognize(cfg: &NlqConfig, question: &str) -> Option<ParsedQuestion> {
    let q = normalize(question);
    let periods = extract_periods(cfg, &q)?;
    let metrics = extract_metrics(cfg, &q);
    Some(ParsedQuestion { metrics, periods })
}

fn extract_metrics(cfg: &NlqConfig, q: &str) -> Vec<MetricSelector> {
    if q.contains("cac") && q.contains("roas") {
        return vec![MetricSelector::Cac, MetricSelector::Roas];
    }
    for (keyword, metric) in cfg.metric_keywords {
        if q.contains(keyword) {
            return vec![*metric];
        }
    }
    vec![MetricSelector::All]
}

fn extract_periods(cfg: &NlqConfig, q: &str) -> Option<[TimePeriodSpec; 2]> {
    let p = patterns();

    if let (Some(last), Some(prior)) = (p.last_days.captures(q), p.prior_days.captures(q)) {
        if let (Ok(n), Ok(m)) = (last[1].parse::<i64>(), prior[2].parse::<i64>()) {
            // Strict equality: "last 30 days vs prior 14 days" falls
            // through and stays unrecognized.
            if n == m {
                return Some([
                    TimePeriodSpec::RelativeDays {
                        value: n,
                        role: DaysRole::Last,
                    },
                    TimePeriodSpec::RelativeDays {
                        value: n,
                        role: DaysRole::Prior,
                    },
                ]);
            }
        }
    }

    if p.this_month.is_match(q) && p.last_month.is_match(q) {
        return Some([
            TimePeriodSpec::RelativeMonth {
                role: MonthRole::Current,
            },
            TimePeriodSpec::RelativeMonth {
                role: MonthRole::Last,
            },
        ]);
    }

    if let Some(caps) = p.month_vs_month.captures(q) {
        if let (Some(a), Some(b)) = (month_number(cfg, &caps[1]), month_number(cfg, &caps[2])) {
            // Phrase order is preserved: first word becomes the first period.
            return Some([
                TimePeriodSpec::NamedMonth { month: a },
                TimePeriodSpec::NamedMonth { month: b },
            ]);
        }
    }

    if q.contains("last week") && (q.contains("prior week") || q.contains("previous week")) {
        return Some([
            TimePeriodSpec::RelativeWeek {
                role: WeekRole::Last,
            },
            TimePeriodSpec::RelativeWeek {
                role: WeekRole::Prior,
            },
        ]);
    }

    None
}

fn month_number(cfg: &NlqConfig, word: &str) -> Option<u32> {
    cfg.month_names
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, number)| *number)
}
