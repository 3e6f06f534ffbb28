mod boundary;
mod calendar;
mod consts;
mod format;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;

pub use boundary::{Edge, Period};
pub use calendar::{add_days, add_months, add_weeks, add_years, shift};
pub use consts::*;
pub use format::{format_date, parse_date};
pub use range::{DateSeries, RangeOptions};
pub use types::{Boundary, FormatUse, Quarter, StepUnit};

use crate::prelude::*;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A date value given either as a calendar date or as text to be parsed
/// with a format supplied elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
pub enum DateInput<'a> {
    Date(NaiveDate),
    Text(&'a str),
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

/// Errors raised by cursor operations. Every variant is a caller input
/// error; nothing here is transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// No usable format where one was required.
    #[error("Missing date format at {0}: pass a strftime format such as '%Y-%m-%d'")]
    MissingFormat(FormatUse),

    /// A range endpoint is absent or is text with no format to parse it.
    #[error("Missing range {0} date: pass a date, or a string together with a format")]
    MissingRangeBoundary(Boundary),

    /// The components do not form a date in the supported range.
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i64, month: i64, day: i64 },

    /// A relative move would leave the supported range.
    #[error(
        "Moving {date} by {amount} {unit}(s) leaves the supported years {}-{}",
        MIN_YEAR,
        MAX_YEAR
    )]
    OutOfRange {
        date:   NaiveDate,
        amount: i64,
        unit:   StepUnit,
    },

    #[error("Invalid step unit: {0} (expected day, week, month or year)")]
    InvalidStepUnit(String),

    #[error("Range step must be non-zero")]
    ZeroStep,

    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    #[error("Cannot parse {input:?} with format {format:?}: {source}")]
    Parse {
        input:  String,
        format: String,
        source: chrono::ParseError,
    },
}

impl DateError {
    fn invalid(date: NaiveDate) -> Self {
        Self::InvalidDate {
            year:  i64::from(date.year()),
            month: i64::from(date.month()),
            day:   i64::from(date.day()),
        }
    }
}

/// Rejects dates outside `MIN_YEAR..=MAX_YEAR`.
pub(crate) fn ensure_supported(date: NaiveDate) -> Result<NaiveDate, DateError> {
    if calendar::in_supported_range(date) {
        Ok(date)
    } else {
        Err(DateError::invalid(date))
    }
}

/// Treats an empty format string the same as no format.
pub(crate) fn usable_format(format: Option<&str>) -> Option<&str> {
    format.filter(|f| !f.is_empty())
}

fn build_date(year: i64, month: i64, day: i64) -> Result<NaiveDate, DateError> {
    let invalid = || DateError::InvalidDate { year, month, day };
    let y = i32::try_from(year).map_err(|_| invalid())?;
    let m = u32::try_from(month).map_err(|_| invalid())?;
    let d = u32::try_from(day).map_err(|_| invalid())?;
    let date = NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)?;
    ensure_supported(date)
}

/// A mutable cursor over a single calendar date.
///
/// Mutators change the cursor in place and hand back `&mut Self`, so calls
/// chain with `?`:
///
/// ```
/// use date_cursor::DateCursor;
///
/// let mut cursor = DateCursor::parse("2024-01-31", "%Y-%m-%d")?;
/// cursor.next_month(1)?.month_end_date()?;
/// assert_eq!(cursor.format_to_string(None)?, "2024-02-29");
/// # Ok::<(), date_cursor::DateError>(())
/// ```
///
/// This is mutation, not a value transform: clone the cursor (or copy
/// [`DateCursor::date`]) before a call if the previous date is still needed.
/// A failed mutation leaves the cursor unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{current_date}")]
#[serde(try_from = "RawCursor")]
pub struct DateCursor {
    current_date:   NaiveDate,
    default_format: Option<String>,
}

#[derive(Deserialize)]
struct RawCursor {
    current_date:   NaiveDate,
    #[serde(default)]
    default_format: Option<String>,
}

impl TryFrom<RawCursor> for DateCursor {
    type Error = DateError;

    fn try_from(raw: RawCursor) -> Result<Self, Self::Error> {
        Ok(Self {
            current_date:   ensure_supported(raw.current_date)?,
            default_format: raw.default_format,
        })
    }
}

impl TryFrom<NaiveDate> for DateCursor {
    type Error = DateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::new(date)
    }
}

impl Default for DateCursor {
    fn default() -> Self {
        Self::today()
    }
}

impl DateCursor {
    /// Creates a cursor at `date` with no default format.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the year is outside `MIN_YEAR..=MAX_YEAR`.
    pub fn new(date: NaiveDate) -> Result<Self, DateError> {
        Ok(Self {
            current_date:   ensure_supported(date)?,
            default_format: None,
        })
    }

    /// Creates a cursor at the local calendar date, read when called.
    pub fn today() -> Self {
        Self {
            current_date:   Local::now().date_naive(),
            default_format: None,
        }
    }

    /// Parses `text` with `format`, which also becomes the default format.
    ///
    /// # Errors
    /// Returns `DateError::MissingFormat` for an empty format and
    /// `DateError::Parse` if `text` does not match it.
    pub fn parse(text: &str, format: &str) -> Result<Self, DateError> {
        Self::from_input(text, Some(format))
    }

    /// Creates a cursor from a date or from text plus a format. The format,
    /// when given, is kept as the default format.
    ///
    /// # Errors
    /// Returns `DateError::MissingFormat` if `value` is text and no format
    /// was given, `DateError::Parse` if the text does not match, and
    /// `DateError::InvalidDate` for dates outside the supported years.
    pub fn from_input<'a>(value: impl Into<DateInput<'a>>, format: Option<&str>) -> Result<Self, DateError> {
        let format = usable_format(format);
        let current_date = match value.into() {
            DateInput::Date(date) => ensure_supported(date)?,
            DateInput::Text(text) => {
                let fmt = format.ok_or(DateError::MissingFormat(FormatUse::Construction))?;
                parse_date(text, fmt)?
            },
        };
        Ok(Self {
            current_date,
            default_format: format.map(str::to_owned),
        })
    }

    /// Sets the default format, consuming and returning the cursor.
    #[must_use]
    pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
        self.default_format = Some(format.into());
        self
    }

    /// The held date
    pub const fn date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn default_format(&self) -> Option<&str> {
        usable_format(self.default_format.as_deref())
    }

    pub fn set_default_format(&mut self, format: Option<String>) -> &mut Self {
        self.default_format = format;
        self
    }
}

// --- relative moves ---
impl DateCursor {
    fn advance(&mut self, amount: i64, unit: StepUnit) -> Result<&mut Self, DateError> {
        let date = self.current_date;
        self.current_date = calendar::shift(date, amount, unit).ok_or(DateError::OutOfRange {
            date,
            amount,
            unit,
        })?;
        Ok(self)
    }

    fn retreat(&mut self, lag: i64, unit: StepUnit) -> Result<&mut Self, DateError> {
        let amount = lag.checked_neg().ok_or(DateError::OutOfRange {
            date: self.current_date,
            amount: lag,
            unit,
        })?;
        self.advance(amount, unit)
    }

    /// Moves `day_lag` days forward; a negative lag moves back. The usual lag
    /// is [`DEFAULT_LAG`].
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn next_day(&mut self, day_lag: i64) -> Result<&mut Self, DateError> {
        self.advance(day_lag, StepUnit::Day)
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn prev_day(&mut self, day_lag: i64) -> Result<&mut Self, DateError> {
        self.retreat(day_lag, StepUnit::Day)
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn next_week(&mut self, weeks_lag: i64) -> Result<&mut Self, DateError> {
        self.advance(weeks_lag, StepUnit::Week)
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn prev_week(&mut self, weeks_lag: i64) -> Result<&mut Self, DateError> {
        self.retreat(weeks_lag, StepUnit::Week)
    }

    /// Moves `month_lag` months forward, clamping the day to the length of
    /// the target month (Jan 31 becomes Feb 28 or 29).
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn next_month(&mut self, month_lag: i64) -> Result<&mut Self, DateError> {
        self.advance(month_lag, StepUnit::Month)
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn prev_month(&mut self, month_lag: i64) -> Result<&mut Self, DateError> {
        self.retreat(month_lag, StepUnit::Month)
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn next_year(&mut self, year_lag: i64) -> Result<&mut Self, DateError> {
        self.advance(year_lag, StepUnit::Year)
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the result leaves the supported years.
    pub fn prev_year(&mut self, year_lag: i64) -> Result<&mut Self, DateError> {
        self.retreat(year_lag, StepUnit::Year)
    }
}

// --- field setters ---
impl DateCursor {
    fn replace(&mut self, year: i64, month: i64, day: i64) -> Result<&mut Self, DateError> {
        self.current_date = build_date(year, month, day)?;
        Ok(self)
    }

    /// Replaces the day of month.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the day does not exist in the
    /// current month (including 0 and negatives).
    pub fn set_day(&mut self, new_day: i32) -> Result<&mut Self, DateError> {
        let date = self.current_date;
        self.replace(i64::from(date.year()), i64::from(date.month()), i64::from(new_day))
    }

    /// Replaces the month.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the month is outside `1..=12` or
    /// the current day does not exist in it.
    pub fn set_month(&mut self, new_month: i32) -> Result<&mut Self, DateError> {
        let date = self.current_date;
        self.replace(i64::from(date.year()), i64::from(new_month), i64::from(date.day()))
    }

    /// Replaces the year.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the year is outside
    /// `MIN_YEAR..=MAX_YEAR` or the date is Feb 29 and the new year is not a
    /// leap year.
    pub fn set_year(&mut self, new_year: i32) -> Result<&mut Self, DateError> {
        let date = self.current_date;
        self.replace(i64::from(new_year), i64::from(date.month()), i64::from(date.day()))
    }
}

// --- boundary snapping ---
impl DateCursor {
    fn snap(&mut self, period: Period, edge: Edge) -> Result<&mut Self, DateError> {
        let from = self.current_date;
        let to = period
            .snap(from, edge)
            .ok_or_else(|| DateError::invalid(from))
            .and_then(ensure_supported)?;
        debug!(%from, %to, %period, %edge, "snapped cursor");
        self.current_date = to;
        Ok(self)
    }

    /// Moves to the first day of the month.
    ///
    /// # Errors
    /// Never fails for a cursor in the supported range; the `Result` keeps
    /// chaining uniform.
    pub fn month_start_date(&mut self) -> Result<&mut Self, DateError> {
        self.snap(Period::Month, Edge::Start)
    }

    /// Moves to the last day of the month.
    ///
    /// # Errors
    /// Never fails for a cursor in the supported range.
    pub fn month_end_date(&mut self) -> Result<&mut Self, DateError> {
        self.snap(Period::Month, Edge::End)
    }

    /// Moves back to Monday of the current week.
    ///
    /// # Errors
    /// Never fails for a cursor in the supported range.
    pub fn week_start_date(&mut self) -> Result<&mut Self, DateError> {
        self.snap(Period::Week, Edge::Start)
    }

    /// Moves forward to Sunday of the current week.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` in the last days of `MAX_YEAR` whose
    /// week ends in the following year.
    pub fn week_end_date(&mut self) -> Result<&mut Self, DateError> {
        self.snap(Period::Week, Edge::End)
    }

    /// Moves to the first day of the quarter.
    ///
    /// # Errors
    /// Never fails for a cursor in the supported range.
    pub fn quarter_start_date(&mut self) -> Result<&mut Self, DateError> {
        self.snap(Period::Quarter, Edge::Start)
    }

    /// Moves to the last day of the quarter.
    ///
    /// # Errors
    /// Never fails for a cursor in the supported range.
    pub fn quarter_end_date(&mut self) -> Result<&mut Self, DateError> {
        self.snap(Period::Quarter, Edge::End)
    }

    /// Moves to July 1 opening the current fiscal year.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` for January to June of `MIN_YEAR`.
    pub fn fy_start_date(&mut self) -> Result<&mut Self, DateError> {
        self.snap(Period::FiscalYear, Edge::Start)
    }

    /// Moves to June 30 closing the current fiscal year.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` for July to December of `MAX_YEAR`.
    pub fn fy_end_date(&mut self) -> Result<&mut Self, DateError> {
        self.snap(Period::FiscalYear, Edge::End)
    }
}

// --- queries ---
impl DateCursor {
    pub fn quarter(&self) -> Quarter {
        Quarter::of(self.current_date)
    }

    /// Quarter number in `1..=4`
    pub fn quarter_number(&self) -> u32 {
        self.quarter().number()
    }

    /// One of `JFM`, `AMJ`, `JAS`, `OND`
    pub fn quarter_label(&self) -> &'static str {
        self.quarter().label()
    }

    /// Renders the held date with `fmt`, or the default format when `fmt` is
    /// `None`. `%QAR` and `%QNUM` expand to the quarter label and number.
    ///
    /// # Errors
    /// Returns `DateError::MissingFormat` if neither format is set and
    /// `DateError::InvalidFormat` if the format cannot render a date.
    pub fn format_to_string(&self, fmt: Option<&str>) -> Result<String, DateError> {
        let fmt = usable_format(fmt)
            .or_else(|| self.default_format())
            .ok_or(DateError::MissingFormat(FormatUse::Formatting))?;
        format_date(self.current_date, fmt)
    }
}
