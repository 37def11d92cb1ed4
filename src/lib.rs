// Hijri Anniversaries - Core Library
// Projects lunar anniversaries onto solar dates; used by the CLI and tests

pub mod lunar_date;
pub mod lunar_calendar;
pub mod solar;
pub mod anniversary;
pub mod config;
pub mod projector;
pub mod loader;
pub mod ical;

// Re-export commonly used types
pub use lunar_date::{LunarDate, LunarDateError};
pub use lunar_calendar::{days_in_month, next_day};
pub use solar::{SolarDate, SolarDateError};
pub use anniversary::{find_by_date, is_same_anniversary, Anniversary, AnniversaryIndex};
pub use config::{EventTime, EventTimeError, ProjectionConfig};
pub use projector::{
    describe, project, walk,
    Alarm, CorrelationPoint, EventDescriptor, LocalDateTime, ProjectedEvent,
};
pub use loader::{load_anniversaries, read_anniversaries, LoadReport, RejectedRecord};
pub use ical::render_calendar;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
