//! Wall-clock helpers
//!
//! Dose times are plain times of day without a date. They are converted to
//! minutes since midnight for arithmetic, and converted back to `HH:MM` labels
//! (wrapping at 24 hours) for display.

use chrono::{NaiveTime, Timelike};

/// Parse a `HH:MM` wall-clock value
///
/// Surrounding whitespace is ignored. Both fields must be two digits, so
/// `"9:05"` is rejected. Returns `None` for anything that is not a valid time
/// of day, including seconds or out-of-range fields.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    let well_formed = text.len() == 5
        && text.bytes().enumerate().all(|(i, b)| match i {
            2 => b == b':',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

/// Minutes since midnight, `hours * 60 + minutes`
///
/// Seconds are ignored.
pub fn time_to_minutes(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Convert a minute count back into a zero-padded `HH:MM` label
///
/// Values past midnight wrap around, so `1500.0` (25 hours) becomes `"01:00"`.
/// Fractional minutes are truncated.
pub fn minutes_to_label(minutes: f64) -> String {
    let total = minutes.floor() as i64;
    let hours = total.div_euclid(60).rem_euclid(24);
    let mins = total.rem_euclid(60);
    format!("{:02}:{:02}", hours, mins)
}
