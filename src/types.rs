use crate::DateError;
use crate::consts::{DECEMBER, MONTHS_PER_QUARTER, QUARTER_LABELS};
use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A calendar quarter. Q1 covers January to March.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Quarter {
    #[display(fmt = "Q1")]
    Q1,
    #[display(fmt = "Q2")]
    Q2,
    #[display(fmt = "Q3")]
    Q3,
    #[display(fmt = "Q4")]
    Q4,
}

impl Quarter {
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Classifies a 1-based month number as `((month - 1) / 3) + 1`.
    pub const fn from_month(month: u32) -> Self {
        debug_assert!(month != 0 && month <= DECEMBER);

        match month.saturating_sub(1) / MONTHS_PER_QUARTER {
            0 => Self::Q1,
            1 => Self::Q2,
            2 => Self::Q3,
            _ => Self::Q4,
        }
    }

    /// Quarter containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    /// Returns `None` for anything outside `1..=4`
    pub const fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(Self::Q1),
            2 => Some(Self::Q2),
            3 => Some(Self::Q3),
            4 => Some(Self::Q4),
            _ => None,
        }
    }

    /// Quarter number in `1..=4`
    pub const fn number(self) -> u32 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
        }
    }

    /// Three-letter label made of the first letters of the quarter's months
    pub const fn label(self) -> &'static str {
        QUARTER_LABELS[self.number() as usize - 1]
    }

    /// First month of the quarter: `3 * Q - 2`
    pub const fn start_month(self) -> u32 {
        MONTHS_PER_QUARTER * self.number() - 2
    }
}

/// Increment used when stepping through a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepUnit {
    #[default]
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "week")]
    Week,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

impl FromStr for StepUnit {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(DateError::InvalidStepUnit(other.to_owned())),
        }
    }
}

/// Which end of a date range an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Boundary {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "end")]
    End,
}

/// Where a format string was required but missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FormatUse {
    #[display(fmt = "construction")]
    Construction,
    #[display(fmt = "formatting")]
    Formatting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ymd;

    #[test]
    fn test_quarter_from_every_month() {
        let expected = [1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4];
        for (month, quarter) in (1..=12).zip(expected) {
            assert_eq!(
                Quarter::from_month(month).number(),
                quarter,
                "Month {month} should be in quarter {quarter}"
            );
        }
    }

    #[test]
    fn test_quarter_labels() {
        assert_eq!(Quarter::Q1.label(), "JFM");
        assert_eq!(Quarter::Q2.label(), "AMJ");
        assert_eq!(Quarter::Q3.label(), "JAS");
        assert_eq!(Quarter::Q4.label(), "OND");
    }

    #[test]
    fn test_quarter_start_months() {
        let starts: Vec<u32> = Quarter::ALL.iter().map(|q| q.start_month()).collect();
        assert_eq!(starts, vec![1, 4, 7, 10]);
    }

    #[test]
    fn test_quarter_from_number() {
        for quarter in Quarter::ALL {
            assert_eq!(Quarter::from_number(quarter.number()), Some(quarter));
        }
        assert_eq!(Quarter::from_number(0), None);
        assert_eq!(Quarter::from_number(5), None);
    }

    #[test]
    fn test_quarter_of_date_and_display() {
        let q = Quarter::of(ymd(2024, 8, 15));
        assert_eq!(q, Quarter::Q3);
        assert_eq!(q.to_string(), "Q3");
    }

    #[test]
    fn test_step_unit_from_str() {
        assert_eq!("day".parse::<StepUnit>().unwrap(), StepUnit::Day);
        assert_eq!("week".parse::<StepUnit>().unwrap(), StepUnit::Week);
        assert_eq!(" month ".parse::<StepUnit>().unwrap(), StepUnit::Month);
        assert_eq!("year".parse::<StepUnit>().unwrap(), StepUnit::Year);

        let result = "fortnight".parse::<StepUnit>();
        assert!(matches!(result, Err(DateError::InvalidStepUnit(ref unit)) if unit == "fortnight"));
    }

    #[test]
    fn test_step_unit_display_matches_parse() {
        for unit in [StepUnit::Day, StepUnit::Week, StepUnit::Month, StepUnit::Year] {
            assert_eq!(unit.to_string().parse::<StepUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_step_unit_serde() {
        let json = serde_json::to_string(&StepUnit::Month).unwrap();
        assert_eq!(json, r#""month""#);

        let parsed: StepUnit = serde_json::from_str(r#""week""#).unwrap();
        assert_eq!(parsed, StepUnit::Week);

        let result: Result<StepUnit, _> = serde_json::from_str(r#""decade""#);
        assert!(result.is_err());
    }
}
