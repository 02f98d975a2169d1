//! Time and duration formatting for chat replies.
//!
//! ## Format Specifications
//!
//! - Durations: `H:MM:SS`, hours unpadded, e.g. `0:00:00`, `2:30:00`.
//!   Spans of a day or more are prefixed with the day count:
//!   `1 day, 2:00:00`, `3 days, 0:15:00`. Negative spans borrow a whole
//!   day, so minus one hour reads `-1 day, 23:00:00`. Sub-second parts are
//!   dropped.
//! - Clock: `HH:MM` (24-hour, zero-padded).
//! - Time: `HH:MM:SS`.
//! - Date: `YYYY-MM-DD`.
//!
//! ```rust
//! use wlb::libs::formatter::format_duration;
//! use chrono::Duration;
//!
//! assert_eq!(format_duration(&Duration::minutes(90)), "1:30:00");
//! assert_eq!(format_duration(&Duration::hours(26)), "1 day, 2:00:00");
//! ```

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub fn format_duration(duration: &Duration) -> String {
    let total = duration.num_seconds();
    let days = total.div_euclid(SECONDS_PER_DAY);
    let rest = total.rem_euclid(SECONDS_PER_DAY);

    let clock = format!("{}:{:02}:{:02}", rest / 3600, (rest % 3600) / 60, rest % 60);
    match days {
        0 => clock,
        1 | -1 => format!("{} day, {}", days, clock),
        _ => format!("{} days, {}", days, clock),
    }
}

pub fn format_clock(instant: &DateTime<FixedOffset>) -> String {
    instant.format("%H:%M").to_string()
}

pub fn format_time(instant: &DateTime<FixedOffset>) -> String {
    instant.format("%H:%M:%S").to_string()
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
