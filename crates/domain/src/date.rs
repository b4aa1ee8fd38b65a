use chrono::prelude::*;
use chrono_tz::Tz;

pub const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Millis covered by the given number of whole days
pub fn days_to_millis(days: u32) -> i64 {
    i64::from(days) * MILLIS_PER_DAY
}

/// Number of days from `now` until `timestamp`, rounded to the closest day.
/// Negative if `timestamp` is in the past.
pub fn days_until(timestamp: i64, now: i64) -> i64 {
    ((timestamp - now) as f64 / MILLIS_PER_DAY as f64).round() as i64
}

/// Formats a timestamp as date and time in the given timezone, e.g. `2021-02-21 09:00`.
/// Returns an empty string for timestamps chrono cannot represent.
pub fn format_date(timestamp: i64, tz: &Tz) -> String {
    match tz.timestamp_millis_opt(timestamp).single() {
        Some(date) => date.format("%Y-%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}
