//! String rendering and parsing of dates.
//!
//! Formats use chrono's strftime vocabulary plus two quarter tokens that are
//! expanded first: [`QUARTER_LABEL_TOKEN`] and [`QUARTER_NUMBER_TOKEN`].

use std::fmt::Write as _;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};

use crate::DateError;
use crate::consts::{QUARTER_LABEL_TOKEN, QUARTER_NUMBER_TOKEN};
use crate::types::Quarter;

/// Custom tokens understood on top of strftime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuarterToken {
    Label,
    Number,
}

impl QuarterToken {
    const ALL: [Self; 2] = [Self::Label, Self::Number];

    const fn token(self) -> &'static str {
        match self {
            Self::Label => QUARTER_LABEL_TOKEN,
            Self::Number => QUARTER_NUMBER_TOKEN,
        }
    }

    fn expand(self, quarter: Quarter) -> String {
        match self {
            Self::Label => quarter.label().to_owned(),
            Self::Number => quarter.number().to_string(),
        }
    }
}

/// Replaces the quarter tokens in `fmt` for the quarter of `date`.
/// An escaped `%%` is copied through so `%%QAR` stays literal.
pub(crate) fn expand_quarter_tokens(fmt: &str, date: NaiveDate) -> String {
    let quarter = Quarter::of(date);
    let mut out = String::with_capacity(fmt.len());
    let mut rest = fmt;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("%%") {
            out.push_str("%%");
            rest = after;
            continue;
        }

        if let Some((token, after)) = QuarterToken::ALL
            .iter()
            .find_map(|t| tail.strip_prefix(t.token()).map(|after| (*t, after)))
        {
            out.push_str(&token.expand(quarter));
            rest = after;
        } else {
            out.push('%');
            rest = &rest[pos + 1..];
        }
    }
    out.push_str(rest);
    out
}

/// Renders `date` through `fmt`.
///
/// # Errors
/// Returns `DateError::InvalidFormat` if `fmt` holds a specifier chrono does
/// not know, or one that needs time-of-day or offset fields.
pub fn format_date(date: NaiveDate, fmt: &str) -> Result<String, DateError> {
    let expanded = expand_quarter_tokens(fmt, date);
    let items: Vec<Item<'_>> = StrftimeItems::new(&expanded).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(DateError::InvalidFormat(fmt.to_owned()));
    }

    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items.into_iter()))
        .map_err(|_| DateError::InvalidFormat(fmt.to_owned()))?;
    Ok(out)
}

/// Parses `text` with a strftime format.
///
/// # Errors
/// Returns `DateError::Parse` if `text` does not match `fmt` or does not
/// describe a full calendar date, and `DateError::InvalidDate` if the parsed
/// year is outside the supported range.
pub fn parse_date(text: &str, fmt: &str) -> Result<NaiveDate, DateError> {
    let date = NaiveDate::parse_from_str(text, fmt).map_err(|source| DateError::Parse {
        input: text.to_owned(),
        format: fmt.to_owned(),
        source,
    })?;
    crate::ensure_supported(date)
}
