/// Minimum supported year (inclusive)
pub const MIN_YEAR: i32 = 1;

/// Maximum supported year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Month number for December
pub const DECEMBER: u32 = 12;

/// First day of month
pub const MIN_DAY: u32 = 1;

/// Calendar month in which the fiscal year begins (July)
pub const FY_START_MONTH: u32 = 7;

pub const MONTHS_PER_QUARTER: u32 = 3;
pub const MONTHS_PER_YEAR: i64 = 12;
pub const DAYS_PER_WEEK: i64 = 7;

/// Quarter labels built from the first letter of each month in the quarter
pub const QUARTER_LABELS: [&str; 4] = ["JFM", "AMJ", "JAS", "OND"];

/// Format token replaced by the quarter label (e.g. `JFM`)
pub const QUARTER_LABEL_TOKEN: &str = "%QAR";
/// Format token replaced by the quarter number (e.g. `1`)
pub const QUARTER_NUMBER_TOKEN: &str = "%QNUM";

/// Conventional magnitude for relative moves
pub const DEFAULT_LAG: i64 = 1;
/// Conventional step for range generation
pub const DEFAULT_STEP: i64 = 1;

/// ISO 8601 calendar date format
pub const ISO_FORMAT: &str = "%Y-%m-%d";
