//! Resolves a recognized period pair into two concrete date windows.

use chrono::{Datelike, Days, NaiveDate};

use crate::domain::calendar;
use crate::models::{DateRange, DaysRole, MonthRole, PeriodWindowPair, TimePeriodSpec, WeekRole};

/// Turn a period pair into `[start, end]` windows, pure in `today`.
///
/// Returns `None` for pair shapes the recognizer never produces, and for
/// day counts the calendar cannot represent (zero, or so large the window
/// start falls off the supported date range); every recognized question
/// with a sane count resolves to `Some`. All date arithmetic is checked so
/// the function never panics on caller input.
pub fn generate(periods: &[TimePeriodSpec; 2], today: NaiveDate) -> Option<PeriodWindowPair> {
    match (periods[0], periods[1]) {
        // N days ending today, preceded by the N days immediately before.
        (
            TimePeriodSpec::RelativeDays {
                value,
                role: DaysRole::Last,
            },
            TimePeriodSpec::RelativeDays {
                value: prior_value,
                role: DaysRole::Prior,
            },
        ) if value == prior_value && value >= 1 => {
            let span = Days::new((value - 1) as u64);
            let second_start = today.checked_sub_days(span)?;
            let first_end = second_start.checked_sub_days(Days::new(1))?;
            let first_start = first_end.checked_sub_days(span)?;
            Some(PeriodWindowPair {
                first: DateRange {
                    start: first_start,
                    end: first_end,
                },
                second: DateRange {
                    start: second_start,
                    end: today,
                },
            })
        }

        // Current month truncated at today vs the full previous month.
        (
            TimePeriodSpec::RelativeMonth {
                role: MonthRole::Current,
            },
            TimePeriodSpec::RelativeMonth {
                role: MonthRole::Last,
            },
        ) => {
            let current = calendar::month_range(today.year(), today.month())?;
            let (prev_year, prev_month) = calendar::previous_month_of(today);
            let first = calendar::month_range(prev_year, prev_month)?;
            let second = DateRange {
                start: current.start,
                end: current.end.min(today),
            };
            Some(PeriodWindowPair { first, second })
        }

        // Both months resolved against today's year, in phrase order.
        (
            TimePeriodSpec::NamedMonth { month: first_month },
            TimePeriodSpec::NamedMonth {
                month: second_month,
            },
        ) => Some(PeriodWindowPair {
            first: calendar::month_range(today.year(), first_month)?,
            second: calendar::month_range(today.year(), second_month)?,
        }),

        // The 7 days ending yesterday vs the 7 days before that; today's
        // partial day is never included.
        (
            TimePeriodSpec::RelativeWeek {
                role: WeekRole::Last,
            },
            TimePeriodSpec::RelativeWeek {
                role: WeekRole::Prior,
            },
        ) => {
            let second_end = today.checked_sub_days(Days::new(1))?;
            let second_start = second_end.checked_sub_days(Days::new(6))?;
            let first_end = second_start.checked_sub_days(Days::new(1))?;
            let first_start = first_end.checked_sub_days(Days::new(6))?;
            Some(PeriodWindowPair {
                first: DateRange {
                    start: first_start,
                    end: first_end,
                },
                second: DateRange {
                    start: second_start,
                    end: second_end,
                },
            })
        }

        _ => None,
    }
}
