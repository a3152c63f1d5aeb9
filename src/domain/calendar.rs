use chrono::{Datelike, Duration, NaiveDate};

use crate::models::DateRange;

/// Full calendar span of a month, first day through last day. Handles
/// 28/29/30/31-day months and the December rollover. `None` only for an
/// out-of-range month number.
pub fn month_range(year: i32, month: u32) -> Option<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(DateRange {
        start,
        end: next_month - Duration::days(1),
    })
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Year and month of the month before the one containing `date`, derived
/// from the day preceding the first of the month. Rolls back to December
/// of the previous year in January.
pub fn previous_month_of(date: NaiveDate) -> (i32, u32) {
    let prev = first_of_month(date) - Duration::days(1);
    (prev.year(), prev.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_month_range_lengths() {
        let feb = month_range(2025, 2).unwrap();
        assert_eq!(feb.start, d(2025, 2, 1));
        assert_eq!(feb.end, d(2025, 2, 28));

        let leap_feb = month_range(2024, 2).unwrap();
        assert_eq!(leap_feb.end, d(2024, 2, 29));

        let april = month_range(2025, 4).unwrap();
        assert_eq!(april.end, d(2025, 4, 30));

        let january = month_range(2025, 1).unwrap();
        assert_eq!(january.end, d(2025, 1, 31));
    }

    #[test]
    fn test_month_range_december_rollover() {
        let december = month_range(2025, 12).unwrap();
        assert_eq!(december.start, d(2025, 12, 1));
        assert_eq!(december.end, d(2025, 12, 31));
    }

    #[test]
    fn test_month_range_rejects_invalid_month() {
        assert!(month_range(2025, 13).is_none());
        assert!(month_range(2025, 0).is_none());
    }

    #[test]
    fn test_previous_month_mid_year() {
        assert_eq!(previous_month_of(d(2025, 6, 15)), (2025, 5));
    }

    #[test]
    fn test_previous_month_january_rolls_to_december() {
        assert_eq!(previous_month_of(d(2025, 1, 10)), (2024, 12));
    }
}
