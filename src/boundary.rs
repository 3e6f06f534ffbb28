//! First and last days of the period enclosing a date.
//!
//! These work over chrono's full range; the cursor applies the supported
//! year range afterwards so a failure can report the date it tried to reach.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::consts::{DAYS_PER_WEEK, FY_START_MONTH, MIN_DAY, MONTHS_PER_QUARTER, MONTHS_PER_YEAR};
use crate::prelude::*;
use crate::types::Quarter;

/// An enclosing period a cursor can snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Period {
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "week")]
    Week,
    #[display(fmt = "quarter")]
    Quarter,
    #[display(fmt = "fiscal year")]
    FiscalYear,
}

/// Which edge of a period to snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Edge {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "end")]
    End,
}

impl Period {
    /// First or last day of the period containing `date`.
    pub fn snap(self, date: NaiveDate, edge: Edge) -> Option<NaiveDate> {
        match (self, edge) {
            (Self::Month, Edge::Start) => month_start(date),
            (Self::Month, Edge::End) => month_end(date),
            (Self::Week, Edge::Start) => week_start(date),
            (Self::Week, Edge::End) => week_end(date),
            (Self::Quarter, Edge::Start) => quarter_start(date),
            (Self::Quarter, Edge::End) => quarter_end(date),
            (Self::FiscalYear, Edge::Start) => fy_start(date),
            (Self::FiscalYear, Edge::End) => fy_end(date),
        }
    }
}

pub fn month_start(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(MIN_DAY)
}

/// One month past the month start, minus a day.
pub fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    month_start(date)?.checked_add_months(Months::new(1))?.pred_opt()
}

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let offset = date.weekday().num_days_from_monday();
    date.checked_sub_days(Days::new(u64::from(offset)))
}

/// Sunday on or after `date`.
pub fn week_end(date: NaiveDate) -> Option<NaiveDate> {
    week_start(date)?.checked_add_days(Days::new(DAYS_PER_WEEK.unsigned_abs() - 1))
}

pub fn quarter_start(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), Quarter::of(date).start_month(), MIN_DAY)
}

pub fn quarter_end(date: NaiveDate) -> Option<NaiveDate> {
    quarter_start(date)?
        .checked_add_months(Months::new(MONTHS_PER_QUARTER))?
        .pred_opt()
}

/// July 1 opening the fiscal year that contains `date`. January to June
/// belong to the fiscal year that started the previous July.
pub fn fy_start(date: NaiveDate) -> Option<NaiveDate> {
    let year = if date.month() < FY_START_MONTH {
        date.year().checked_sub(1)?
    } else {
        date.year()
    };
    NaiveDate::from_ymd_opt(year, FY_START_MONTH, MIN_DAY)
}

pub fn fy_end(date: NaiveDate) -> Option<NaiveDate> {
    let months = u32::try_from(MONTHS_PER_YEAR).ok()?;
    fy_start(date)?.checked_add_months(Months::new(months))?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ymd;
    use chrono::Weekday;

    #[test]
    fn test_month_bounds() {
        struct TestCase {
            date:  NaiveDate,
            start: NaiveDate,
            end:   NaiveDate,
        }

        let cases = [
            TestCase {
                date:  ymd(2024, 2, 10),
                start: ymd(2024, 2, 1),
                end:   ymd(2024, 2, 29),
            },
            TestCase {
                date:  ymd(2023, 2, 28),
                start: ymd(2023, 2, 1),
                end:   ymd(2023, 2, 28),
            },
            TestCase {
                date:  ymd(2024, 12, 31),
                start: ymd(2024, 12, 1),
                end:   ymd(2024, 12, 31),
            },
            TestCase {
                date:  ymd(2024, 4, 1),
                start: ymd(2024, 4, 1),
                end:   ymd(2024, 4, 30),
            },
        ];

        for case in &cases {
            assert_eq!(month_start(case.date), Some(case.start), "month start of {}", case.date);
            assert_eq!(month_end(case.date), Some(case.end), "month end of {}", case.date);
        }
    }

    #[test]
    fn test_february_end_follows_gregorian_leap_rules() {
        let cases = [(1900, 28), (2000, 29), (2023, 28), (2024, 29), (2100, 28), (9996, 29)];
        for (year, last_day) in cases {
            assert_eq!(
                month_end(ymd(year, 2, 1)),
                Some(ymd(year, 2, last_day)),
                "February {year} should end on day {last_day}"
            );
        }
    }

    #[test]
    fn test_week_bounds_span_monday_to_sunday() {
        let mut date = ymd(2023, 12, 20);
        for _ in 0..60 {
            let start = week_start(date).expect("week start exists");
            let end = week_end(date).expect("week end exists");
            assert_eq!(start.weekday(), Weekday::Mon);
            assert_eq!(end.weekday(), Weekday::Sun);
            assert_eq!((end - start).num_days(), 6);
            assert!(start <= date && date <= end);
            date = date.succ_opt().expect("successor exists");
        }
    }

    #[test]
    fn test_week_crossing_year() {
        // 2025-01-01 is a Wednesday
        assert_eq!(week_start(ymd(2025, 1, 1)), Some(ymd(2024, 12, 30)));
        assert_eq!(week_end(ymd(2025, 1, 1)), Some(ymd(2025, 1, 5)));
    }

    #[test]
    fn test_quarter_bounds() {
        let expected = [
            (ymd(2024, 1, 1), ymd(2024, 3, 31)),
            (ymd(2024, 4, 1), ymd(2024, 6, 30)),
            (ymd(2024, 7, 1), ymd(2024, 9, 30)),
            (ymd(2024, 10, 1), ymd(2024, 12, 31)),
        ];
        for month in 1..=12 {
            let date = ymd(2024, month, 15);
            let (start, end) = expected[(month as usize - 1) / 3];
            assert_eq!(quarter_start(date), Some(start), "quarter start of {date}");
            assert_eq!(quarter_end(date), Some(end), "quarter end of {date}");
        }
    }

    #[test]
    fn test_fiscal_year_bounds() {
        assert_eq!(fy_start(ymd(2024, 6, 30)), Some(ymd(2023, 7, 1)));
        assert_eq!(fy_start(ymd(2024, 7, 1)), Some(ymd(2024, 7, 1)));
        assert_eq!(fy_start(ymd(2024, 1, 1)), Some(ymd(2023, 7, 1)));
        assert_eq!(fy_start(ymd(2024, 12, 31)), Some(ymd(2024, 7, 1)));

        // span holding Feb 29, 2024
        assert_eq!(fy_end(ymd(2024, 3, 1)), Some(ymd(2024, 6, 30)));
        // span without a leap day
        assert_eq!(fy_end(ymd(2024, 9, 1)), Some(ymd(2025, 6, 30)));
    }

    #[test]
    fn test_period_snap_dispatch() {
        let date = ymd(2024, 8, 14);
        assert_eq!(Period::Month.snap(date, Edge::End), Some(ymd(2024, 8, 31)));
        assert_eq!(Period::Week.snap(date, Edge::Start), Some(ymd(2024, 8, 12)));
        assert_eq!(Period::Quarter.snap(date, Edge::Start), Some(ymd(2024, 7, 1)));
        assert_eq!(Period::FiscalYear.snap(date, Edge::End), Some(ymd(2025, 6, 30)));
        assert_eq!(Period::FiscalYear.to_string(), "fiscal year");
    }
}
