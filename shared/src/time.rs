//! Local time display helpers
//!
//! Alert times are shown in Thailand time (UTC+7) as `HH:MM`, with the Thai
//! `น.` suffix when the message language is Thai.

use chrono::{DateTime, FixedOffset, NaiveTime, Offset, Utc};

use crate::types::Language;

/// Thai suffix appended to clock times
pub const THAI_TIME_SUFFIX: &str = "น.";

const DISPLAY_FORMAT: &str = "%H:%M";

/// Fixed UTC+7 offset (Asia/Bangkok has no daylight saving)
pub fn bangkok_offset() -> FixedOffset {
    utc_offset_hours(7)
}

/// Build a fixed offset from whole hours, clamped to the valid range
pub fn utc_offset_hours(hours: i32) -> FixedOffset {
    let hours = hours.clamp(-23, 23);
    FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| Utc.fix())
}

/// Render an instant as a local clock time
pub fn format_local_time(instant: DateTime<Utc>, offset: FixedOffset, language: Language) -> String {
    format_clock(&instant.with_timezone(&offset), language)
}

/// Render an already-localized time
pub fn format_clock(local: &DateTime<FixedOffset>, language: Language) -> String {
    let clock = local.format(DISPLAY_FORMAT);
    match language {
        Language::Thai => format!("{} {}", clock, THAI_TIME_SUFFIX),
        Language::English => clock.to_string(),
    }
}

/// Parse a clock time produced by [`format_local_time`]
pub fn parse_local_time(text: &str) -> Option<NaiveTime> {
    let clock = text.trim().trim_end_matches(THAI_TIME_SUFFIX).trim_end();
    NaiveTime::parse_from_str(clock, DISPLAY_FORMAT).ok()
}
