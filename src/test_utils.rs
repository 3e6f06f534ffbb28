use chrono::NaiveDate;

use crate::DateCursor;

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn cursor(year: i32, month: u32, day: u32) -> DateCursor {
    DateCursor::new(ymd(year, month, day)).expect("test date within supported years")
}
