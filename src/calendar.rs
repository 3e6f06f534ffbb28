//! Pure calendar arithmetic over [`NaiveDate`].
//!
//! Every function returns `None` instead of a date outside
//! `MIN_YEAR..=MAX_YEAR`, so callers can surface a single error kind.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::consts::{DAYS_PER_WEEK, MAX_YEAR, MIN_YEAR, MONTHS_PER_YEAR};
use crate::types::StepUnit;

/// Whether `date` falls inside the supported year range.
pub fn in_supported_range(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

fn bounded(date: Option<NaiveDate>) -> Option<NaiveDate> {
    date.filter(|d| in_supported_range(*d))
}

/// Adds a signed number of days.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    bounded(shifted)
}

/// Adds a signed number of 7-day weeks.
pub fn add_weeks(date: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    add_days(date, weeks.checked_mul(DAYS_PER_WEEK)?)
}

/// Adds a signed number of months, clamping the day to the target month's
/// length: Jan 31 + 1 month is the last day of February.
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    let shifted = if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    };
    bounded(shifted)
}

/// Adds a signed number of years; Feb 29 lands on Feb 28 in non-leap years.
pub fn add_years(date: NaiveDate, years: i64) -> Option<NaiveDate> {
    add_months(date, years.checked_mul(MONTHS_PER_YEAR)?)
}

/// Moves `date` by `amount` units of `unit`.
pub fn shift(date: NaiveDate, amount: i64, unit: StepUnit) -> Option<NaiveDate> {
    match unit {
        StepUnit::Day => add_days(date, amount),
        StepUnit::Week => add_weeks(date, amount),
        StepUnit::Month => add_months(date, amount),
        StepUnit::Year => add_years(date, amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ymd;

    #[test]
    fn test_add_days_signed() {
        assert_eq!(add_days(ymd(2024, 2, 28), 1), Some(ymd(2024, 2, 29)));
        assert_eq!(add_days(ymd(2023, 2, 28), 1), Some(ymd(2023, 3, 1)));
        assert_eq!(add_days(ymd(2024, 1, 1), -1), Some(ymd(2023, 12, 31)));
        assert_eq!(add_days(ymd(2024, 1, 1), 0), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn test_add_weeks() {
        assert_eq!(add_weeks(ymd(2024, 12, 30), 1), Some(ymd(2025, 1, 6)));
        assert_eq!(add_weeks(ymd(2024, 1, 8), -2), Some(ymd(2023, 12, 25)));
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(ymd(2024, 1, 31), 1), Some(ymd(2024, 2, 29)));
        assert_eq!(add_months(ymd(2023, 1, 31), 1), Some(ymd(2023, 2, 28)));
        assert_eq!(add_months(ymd(2024, 3, 31), -1), Some(ymd(2024, 2, 29)));
        assert_eq!(add_months(ymd(2024, 5, 31), 1), Some(ymd(2024, 6, 30)));
        assert_eq!(add_months(ymd(2024, 12, 15), 1), Some(ymd(2025, 1, 15)));
        assert_eq!(add_months(ymd(2024, 1, 15), -13), Some(ymd(2022, 12, 15)));
    }

    #[test]
    fn test_add_years_leap_day() {
        assert_eq!(add_years(ymd(2024, 2, 29), 1), Some(ymd(2025, 2, 28)));
        assert_eq!(add_years(ymd(2024, 2, 29), 4), Some(ymd(2028, 2, 29)));
        assert_eq!(add_years(ymd(2024, 2, 29), -1), Some(ymd(2023, 2, 28)));
    }

    #[test]
    fn test_supported_range_edges() {
        assert_eq!(add_days(ymd(MAX_YEAR, 12, 31), 1), None);
        assert_eq!(add_days(ymd(MIN_YEAR, 1, 1), -1), None);
        assert_eq!(add_months(ymd(MAX_YEAR, 12, 1), 1), None);
        assert_eq!(add_years(ymd(2024, 1, 1), i64::MAX), None);
        assert_eq!(add_weeks(ymd(2024, 1, 1), i64::MIN), None);
    }

    #[test]
    fn test_shift_dispatches_on_unit() {
        let start = ymd(2024, 1, 31);
        assert_eq!(shift(start, 2, StepUnit::Day), Some(ymd(2024, 2, 2)));
        assert_eq!(shift(start, 1, StepUnit::Week), Some(ymd(2024, 2, 7)));
        assert_eq!(shift(start, 1, StepUnit::Month), Some(ymd(2024, 2, 29)));
        assert_eq!(shift(start, 1, StepUnit::Year), Some(ymd(2025, 1, 31)));
    }
}
