use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::shift;
use crate::consts::DEFAULT_STEP;
use crate::format::{format_date, parse_date};
use crate::types::{Boundary, StepUnit};
use crate::{DateCursor, DateError, DateInput, ensure_supported, usable_format};

/// Settings for [`DateCursor::date_range`].
///
/// Every field has a default, so a partial JSON object is enough to
/// deserialize one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    /// Number of units between consecutive dates. The sign is ignored.
    pub step:        i64,
    pub step_unit:   StepUnit,
    /// Parse format for string endpoints and render format for string output.
    /// Falls back to the cursor's default format.
    pub format:      Option<String>,
    /// Append the end date when stepping does not land on it exactly.
    pub include_end: bool,
    /// Render the result with the resolved format.
    pub as_strings:  bool,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            step:        DEFAULT_STEP,
            step_unit:   StepUnit::Day,
            format:      None,
            include_end: false,
            as_strings:  false,
        }
    }
}

impl RangeOptions {
    #[must_use]
    pub const fn with_step(mut self, step: i64, unit: StepUnit) -> Self {
        self.step = step;
        self.step_unit = unit;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub const fn include_end(mut self, include_end: bool) -> Self {
        self.include_end = include_end;
        self
    }

    #[must_use]
    pub const fn as_strings(mut self, as_strings: bool) -> Self {
        self.as_strings = as_strings;
        self
    }
}

/// Dates produced by a range, either raw or rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum DateSeries {
    Dates(Vec<NaiveDate>),
    Strings(Vec<String>),
}

impl DateSeries {
    pub fn len(&self) -> usize {
        match self {
            Self::Dates(dates) => dates.len(),
            Self::Strings(strings) => strings.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the dates if the series was not rendered
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        match self {
            Self::Dates(dates) => Some(dates),
            Self::Strings(_) => None,
        }
    }

    /// Returns the strings if the series was rendered
    pub fn strings(&self) -> Option<&[String]> {
        match self {
            Self::Dates(_) => None,
            Self::Strings(strings) => Some(strings),
        }
    }

    /// Renders a date series with `fmt`; an already rendered series is
    /// returned unchanged.
    ///
    /// # Errors
    /// Returns `DateError::InvalidFormat` if `fmt` cannot render a date.
    pub fn into_strings(self, fmt: &str) -> Result<Vec<String>, DateError> {
        match self {
            Self::Dates(dates) => dates.into_iter().map(|d| format_date(d, fmt)).collect(),
            Self::Strings(strings) => Ok(strings),
        }
    }
}

/// Emits `start`, then keeps adding `step` units to the previous value
/// while it stays on or before `end`. `step` must be positive.
pub(crate) fn step_dates(start: NaiveDate, end: NaiveDate, step: i64, unit: StepUnit) -> Vec<NaiveDate> {
    debug_assert!(step > 0);

    let mut dates = Vec::new();
    let mut current = Some(start);
    while let Some(date) = current.filter(|d| *d <= end) {
        dates.push(date);
        current = shift(date, step, unit);
    }
    dates
}

fn resolve_boundary(
    input: Option<DateInput<'_>>,
    format: Option<&str>,
    boundary: Boundary,
) -> Result<NaiveDate, DateError> {
    match input {
        Some(DateInput::Date(date)) => ensure_supported(date),
        Some(DateInput::Text(text)) => {
            let fmt = format.ok_or(DateError::MissingRangeBoundary(boundary))?;
            parse_date(text, fmt)
        },
        None => Err(DateError::MissingRangeBoundary(boundary)),
    }
}

impl DateCursor {
    /// Generates dates from `start` to `end` (inclusive) in steps of
    /// `options.step` units. Does not move the cursor.
    ///
    /// `start` defaults to the cursor's date. String endpoints are parsed with
    /// `options.format` or the cursor's default format. An `end` before
    /// `start` gives an empty series.
    ///
    /// # Errors
    /// - `DateError::MissingRangeBoundary` if `end` is absent or a string
    ///   endpoint has no format to parse it.
    /// - `DateError::Parse` if a string endpoint does not match the format.
    /// - `DateError::ZeroStep` if `options.step` is zero.
    /// - `DateError::InvalidFormat` if rendering fails.
    pub fn date_range(
        &self,
        start: Option<DateInput<'_>>,
        end: Option<DateInput<'_>>,
        options: &RangeOptions,
    ) -> Result<DateSeries, DateError> {
        let format = usable_format(options.format.as_deref()).or_else(|| self.default_format());

        let start = resolve_boundary(
            Some(start.unwrap_or(DateInput::Date(self.date()))),
            format,
            Boundary::Start,
        )?;
        let end = resolve_boundary(end, format, Boundary::End)?;

        if options.step == 0 {
            return Err(DateError::ZeroStep);
        }
        let step = options.step.saturating_abs();

        let mut dates = if end < start {
            Vec::new()
        } else {
            step_dates(start, end, step, options.step_unit)
        };
        if options.include_end && start <= end && dates.last() != Some(&end) {
            dates.push(end);
        }

        debug!(
            %start,
            %end,
            step,
            unit = %options.step_unit,
            include_end = options.include_end,
            count = dates.len(),
            "generated date range"
        );

        if !options.as_strings {
            return Ok(DateSeries::Dates(dates));
        }
        match format {
            Some(fmt) => DateSeries::Dates(dates).into_strings(fmt).map(DateSeries::Strings),
            None => {
                warn!("string output requested without a format; returning dates");
                Ok(DateSeries::Dates(dates))
            },
        }
    }

    /// Shorthand for [`Self::date_range`] starting at the cursor's date.
    ///
    /// # Errors
    /// Same as [`Self::date_range`].
    pub fn range_until<'a>(
        &self,
        end: impl Into<DateInput<'a>>,
        options: &RangeOptions,
    ) -> Result<DateSeries, DateError> {
        self.date_range(None, Some(end.into()), options)
    }
}
