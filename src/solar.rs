// ☀️ Solar Date - Minimal Gregorian date for the lockstep walk
//
// Only what the projector needs: next/previous day, add whole years, ordering.
// Parsing and time zones live at the CLI boundary (chrono).

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolarDateError {
    #[error("invalid solar month: {month} (must be 1..=12)")]
    InvalidMonth { month: u8 },

    #[error("invalid solar day: {day} for {year}-{month:02} (max {max_day})")]
    InvalidDay {
        year: i32,
        month: u8,
        day: u8,
        max_day: u8,
    },
}

/// Proleptic Gregorian leap rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// SolarDate - A Gregorian calendar day (wall clock, no time zone)
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SolarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl SolarDate {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, SolarDateError> {
        if !(1..=12).contains(&month) {
            return Err(SolarDateError::InvalidMonth { month });
        }

        let max_day = days_in_month(year, month);
        if day < 1 || day > max_day {
            return Err(SolarDateError::InvalidDay {
                year,
                month,
                day,
                max_day,
            });
        }

        Ok(SolarDate { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn next_day(&self) -> SolarDate {
        let (mut year, mut month, mut day) = (self.year, self.month, self.day + 1);

        if day > days_in_month(year, month) {
            day = 1;
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }

        SolarDate { year, month, day }
    }

    pub fn previous_day(&self) -> SolarDate {
        if self.day > 1 {
            return SolarDate {
                day: self.day - 1,
                ..*self
            };
        }

        let (year, month) = if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        };

        SolarDate {
            year,
            month,
            day: days_in_month(year, month),
        }
    }

    /// Same month/day `years` later (or earlier when negative)
    ///
    /// Feb 29 lands on Feb 28 when the target year is not a leap year.
    /// `None` when the target year does not fit in an `i32`.
    pub fn add_years(&self, years: i32) -> Option<SolarDate> {
        let year = self.year.checked_add(years)?;
        let day = self.day.min(days_in_month(year, self.month));
        Some(SolarDate {
            year,
            month: self.month,
            day,
        })
    }
}

impl From<NaiveDate> for SolarDate {
    fn from(date: NaiveDate) -> Self {
        // chrono guarantees a valid Gregorian date
        SolarDate {
            year: date.year(),
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
