// 🧭 Anniversary Projector - Lockstep walk of solar + lunar cursors
//
// Both cursors move one real day at a time from the correlation point. This
// is NOT a true Hijri conversion: the schematic 354-day year drifts against
// the solar year over long spans.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::anniversary::{Anniversary, AnniversaryIndex};
use crate::config::{EventTime, ProjectionConfig};
use crate::lunar_date::LunarDate;
use crate::solar::SolarDate;

// ============================================================================
// TYPES
// ============================================================================

/// CorrelationPoint - A solar and a lunar date asserted to be the same day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorrelationPoint {
    pub solar: SolarDate,
    pub lunar: LunarDate,
}

impl CorrelationPoint {
    pub fn new(solar: SolarDate, lunar: LunarDate) -> Self {
        CorrelationPoint { solar, lunar }
    }
}

/// ProjectedEvent - An anniversary landing on a concrete solar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedEvent {
    pub solar_date: SolarDate,
    pub name: String,
    pub uid: String,
}

/// LocalDateTime - Floating wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LocalDateTime {
    pub date: SolarDate,
    pub hour: u8,
    pub minute: u8,
}

impl LocalDateTime {
    pub fn at(date: SolarDate, time: EventTime) -> Self {
        LocalDateTime {
            date,
            hour: time.hour(),
            minute: time.minute(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alarm {
    pub minutes_before: u32,
}

/// EventDescriptor - Serializer-ready calendar interval
///
/// Spans "from the evening before through the evening of" the matching day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDescriptor {
    pub start: LocalDateTime,
    pub end: LocalDateTime,
    pub title: String,
    pub alarm: Alarm,
    /// `<anniversary uid>-<start year>`
    pub uid: String,
}

// ============================================================================
// WALK
// ============================================================================

/// Walk from the correlation point through `span_years` later, both ends inclusive
///
/// Emits one event per (day, matching anniversary), ordered by solar date and
/// then by table order. A negative span walks nothing; a zero span walks only
/// the reference day. A span whose end year does not fit in an `i32` also
/// walks nothing.
pub fn walk(
    correlation: &CorrelationPoint,
    span_years: i32,
    anniversaries: &[Anniversary],
) -> Vec<ProjectedEvent> {
    let mut events = Vec::new();

    if span_years < 0 {
        debug!(span_years, "negative span, nothing to walk");
        return events;
    }

    let Some(end) = correlation.solar.add_years(span_years) else {
        warn!(from = %correlation.solar, span_years, "span end out of range, nothing to walk");
        return events;
    };

    let index = AnniversaryIndex::new(anniversaries);

    let mut solar = correlation.solar;
    let mut lunar = correlation.lunar;
    let mut days_walked = 0usize;

    loop {
        for anniversary in index.matching(&lunar) {
            trace!(%solar, %lunar, name = %anniversary.name, "anniversary matched");
            events.push(ProjectedEvent {
                solar_date: solar,
                name: anniversary.name.clone(),
                uid: anniversary.uid.clone(),
            });
        }
        days_walked += 1;

        // Stop on the end day itself: never step either cursor past it
        if solar >= end {
            break;
        }
        lunar = lunar.next_day();
        solar = solar.next_day();
    }

    debug!(
        from = %correlation.solar,
        to = %end,
        days_walked,
        anniversaries = index.len(),
        distinct_days = index.distinct_days(),
        events = events.len(),
        "lockstep walk complete"
    );

    events
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// Expand a projected event into its calendar interval
pub fn describe(event: &ProjectedEvent, config: &ProjectionConfig) -> EventDescriptor {
    let start = LocalDateTime::at(event.solar_date.previous_day(), config.event_start);
    let end = LocalDateTime::at(event.solar_date, config.event_end);

    EventDescriptor {
        start,
        end,
        title: event.name.clone(),
        alarm: Alarm {
            minutes_before: config.alarm_minutes_before,
        },
        uid: format!("{}-{}", event.uid, start.date.year()),
    }
}

/// Project anniversaries over the configured span
///
/// Deterministic: identical inputs always produce identical output.
pub fn project(
    correlation: &CorrelationPoint,
    anniversaries: &[Anniversary],
    config: &ProjectionConfig,
) -> Vec<EventDescriptor> {
    walk(correlation, config.span_years, anniversaries)
        .iter()
        .map(|event| describe(event, config))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
