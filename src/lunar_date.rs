// 🌙 Lunar Date - Schematic Hijri date value
// Parsing + validation. A LunarDate is never built outside the calendar bounds.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::lunar_calendar::days_in_month;

// ============================================================================
// ERRORS
// ============================================================================

/// Why a lunar date could not be constructed
///
/// Exactly one variant is reported per failed construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LunarDateError {
    /// Input is not `<year>-<MM>-<DD>`
    #[error("invalid lunar date format: {input:?} (expected YYYY-MM-DD)")]
    InvalidFormat { input: String },

    /// Month outside 1..=12
    #[error("invalid lunar month: {month} (must be 1..=12)")]
    InvalidMonth { month: u8 },

    /// Day outside 1..=days_in_month(month)
    #[error("invalid lunar day: {day} for month {month} (max {max_day})")]
    InvalidDay { day: u8, month: u8, max_day: u8 },
}

// ============================================================================
// LUNAR DATE
// ============================================================================

static LUNAR_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)-([0-9]{2})-([0-9]{2})$").expect("valid regex"));

/// LunarDate - A day in the schematic lunar calendar
///
/// 12 months, odd months have 30 days, even months have 29.
/// The derived `PartialEq` is FULL equality (year included). For the
/// year-ignoring comparison use [`crate::anniversary::is_same_anniversary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LunarDate {
    // Inputs are limited to u32; the wider field lets the walk roll past u32::MAX
    year: u64,
    month: u8,
    day: u8,
}

impl LunarDate {
    /// Create a validated lunar date
    pub fn new(year: u32, month: u8, day: u8) -> Result<Self, LunarDateError> {
        if !(1..=12).contains(&month) {
            return Err(LunarDateError::InvalidMonth { month });
        }

        let max_day = days_in_month(month);
        if day < 1 || day > max_day {
            return Err(LunarDateError::InvalidDay {
                day,
                month,
                max_day,
            });
        }

        Ok(LunarDate {
            year: u64::from(year),
            month,
            day,
        })
    }

    /// Parse `YYYY-MM-DD` (year has any number of digits, month and day exactly two)
    ///
    /// # Examples:
    /// ```
    /// use hijri_anniversaries::LunarDate;
    ///
    /// let date = LunarDate::parse("1441-08-02").unwrap();
    /// assert_eq!((date.year(), date.month(), date.day()), (1441, 8, 2));
    /// assert!(LunarDate::parse("1441-08-30").is_err()); // month 8 has 29 days
    /// ```
    pub fn parse(input: &str) -> Result<Self, LunarDateError> {
        let invalid_format = || LunarDateError::InvalidFormat {
            input: input.to_string(),
        };

        let caps = LUNAR_DATE_RE.captures(input).ok_or_else(invalid_format)?;

        // Year overflow is still a shape problem, not a calendar one
        let year: u32 = caps[1].parse().map_err(|_| invalid_format())?;
        let month: u8 = caps[2].parse().map_err(|_| invalid_format())?;
        let day: u8 = caps[3].parse().map_err(|_| invalid_format())?;

        LunarDate::new(year, month, day)
    }

    pub fn year(&self) -> u64 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// (month, day) - the part of the date that recurs every year
    pub fn month_day(&self) -> (u8, u8) {
        (self.month, self.day)
    }

    /// The following schematic day
    pub fn next_day(&self) -> LunarDate {
        crate::lunar_calendar::next_day(self)
    }
}

impl FromStr for LunarDate {
    type Err = LunarDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LunarDate::parse(s)
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

// Fields are private, so the calendar module rebuilds dates through this
// without re-validating values it already knows are in range.
pub(crate) fn from_parts_unchecked(year: u64, month: u8, day: u8) -> LunarDate {
    debug_assert!((1..=12).contains(&month));
    debug_assert!(day >= 1 && day <= days_in_month(month));
    LunarDate { year, month, day }
}

// ============================================================================
// TESTS
// ============================================================================
