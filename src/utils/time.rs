//! Time utilities: `HH:MM:SS.mmm` formatting of session-relative seconds and
//! calendar durations.

use chrono::{DateTime, Local};

/// Placeholder shown for a field that has no value yet.
pub const PLACEHOLDER: &str = "--:--:--.---";

/// Format seconds as `HH:MM:SS.mmm`. Hours are not clamped to two digits;
/// negative or non-finite input prints as zero and milliseconds truncate.
pub fn format_hms(secs: f64) -> String {
    let total_ms = if secs.is_finite() && secs > 0.0 {
        // nudge past binary representation error (0.3 * 1000 = 299.999...)
        (secs * 1000.0 + 1e-6).floor() as u64
    } else {
        0
    };
    format_millis(total_ms)
}

pub fn format_millis(total_ms: u64) -> String {
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let s = total_secs % 60;
    let m = (total_secs / 60) % 60;
    let h = total_secs / 3600;
    format!("{:02}:{:02}:{:02}.{:03}", h, m, s, ms)
}

/// Whole seconds between two calendar timestamps, never negative.
pub fn whole_seconds_between(start: DateTime<Local>, end: DateTime<Local>) -> i64 {
    end.signed_duration_since(start).num_seconds().max(0)
}

/// Calendar difference in whole seconds, formatted like every other duration.
pub fn format_calendar_duration(start: DateTime<Local>, end: DateTime<Local>) -> String {
    format_millis(whole_seconds_between(start, end) as u64 * 1000)
}
