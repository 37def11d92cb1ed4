// ⚙️ Projection Config - Explicit value handed to the projector
// Built once by the CLI. The core never reads globals or the environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SPAN_YEARS: i32 = 1;
/// Largest span the CLI accepts in either direction
pub const MAX_SPAN_YEARS: i64 = 1000;
pub const DEFAULT_EVENT_HOUR: u8 = 18;
pub const DEFAULT_ALARM_MINUTES: u32 = 10;

// ============================================================================
// EVENT TIME
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventTimeError {
    #[error("invalid time format: {input:?} (expected HH:MM)")]
    InvalidFormat { input: String },

    #[error("invalid hour: {hour} (must be 0..=23)")]
    InvalidHour { hour: u8 },

    #[error("invalid minute: {minute} (must be 0..=59)")]
    InvalidMinute { minute: u8 },
}

/// Wall-clock hour and minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventTime {
    hour: u8,
    minute: u8,
}

impl EventTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, EventTimeError> {
        if hour > 23 {
            return Err(EventTimeError::InvalidHour { hour });
        }
        if minute > 59 {
            return Err(EventTimeError::InvalidMinute { minute });
        }
        Ok(EventTime { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl Default for EventTime {
    fn default() -> Self {
        EventTime {
            hour: DEFAULT_EVENT_HOUR,
            minute: 0,
        }
    }
}

impl FromStr for EventTime {
    type Err = EventTimeError;

    /// `HH:MM`, both parts exactly two digits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EventTimeError::InvalidFormat {
            input: s.to_string(),
        };

        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hour) || !two_digits(minute) {
            return Err(invalid());
        }

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        EventTime::new(hour, minute)
    }
}

impl TryFrom<String> for EventTime {
    type Error = EventTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventTime> for String {
    fn from(time: EventTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ============================================================================
// PROJECTION CONFIG
// ============================================================================

/// ProjectionConfig - Span and event formatting for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Whole solar years walked after the reference date (inclusive end).
    /// Negative spans walk nothing.
    pub span_years: i32,

    /// Start time on the evening before the matching day (default 18:00)
    pub event_start: EventTime,

    /// End time on the matching day (default 18:00)
    pub event_end: EventTime,

    /// Reminder lead before the start (default 10)
    pub alarm_minutes_before: u32,
}

impl ProjectionConfig {
    pub fn new() -> Self {
        ProjectionConfig {
            span_years: DEFAULT_SPAN_YEARS,
            event_start: EventTime::default(),
            event_end: EventTime::default(),
            alarm_minutes_before: DEFAULT_ALARM_MINUTES,
        }
    }

    /// Builder pattern: span in years
    pub fn with_span_years(mut self, years: i32) -> Self {
        self.span_years = years;
        self
    }

    /// Builder pattern: start and end times
    pub fn with_times(mut self, start: EventTime, end: EventTime) -> Self {
        self.event_start = start;
        self.event_end = end;
        self
    }

    /// Builder pattern: alarm lead time
    pub fn with_alarm_minutes(mut self, minutes: u32) -> Self {
        self.alarm_minutes_before = minutes;
        self
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProjectionConfig::default();
        assert_eq!(config.span_years, 1);
        assert_eq!(config.event_start, EventTime::new(18, 0).unwrap());
        assert_eq!(config.event_end, EventTime::new(18, 0).unwrap());
        assert_eq!(config.alarm_minutes_before, 10);
    }

    #[test]
    fn test_builder() {
        let config = ProjectionConfig::new()
            .with_span_years(3)
            .with_times(EventTime::new(19, 30).unwrap(), EventTime::new(20, 0).unwrap())
            .with_alarm_minutes(30);

        assert_eq!(config.span_years, 3);
        assert_eq!(config.event_start.to_string(), "19:30");
        assert_eq!(config.event_end.to_string(), "20:00");
        assert_eq!(config.alarm_minutes_before, 30);
    }

    #[test]
    fn test_event_time_parse() {
        let time: EventTime = "07:05".parse().unwrap();
        assert_eq!((time.hour(), time.minute()), (7, 5));
    }

    #[test]
    fn test_event_time_parse_errors() {
        assert_eq!(
            "24:00".parse::<EventTime>().unwrap_err(),
            EventTimeError::InvalidHour { hour: 24 }
        );
        assert_eq!(
            "12:60".parse::<EventTime>().unwrap_err(),
            EventTimeError::InvalidMinute { minute: 60 }
        );
        for input in ["7:05", "1800", "18:0", "aa:bb", "18:00:00", ""] {
            assert!(
                matches!(
                    input.parse::<EventTime>(),
                    Err(EventTimeError::InvalidFormat { .. })
                ),
                "{:?} should be a format error",
                input
            );
        }
    }

    #[test]
    fn test_config_serde_uses_hh_mm_strings() {
        let config = ProjectionConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["event_start"], "18:00");

        let back: ProjectionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
