//! Time windows queried from the calendar: a single day or the week around a date.
//!
//! Window boundaries are local midnights of the reporting zone, each with the
//! UTC offset valid on its own date, so a week that spans a daylight-saving
//! change still starts and ends exactly at midnight.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

/// Zone of the reporting clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportZone {
    /// The system zone.
    #[default]
    Local,
    Named(Tz),
    Fixed(FixedOffset),
}

impl From<Option<Tz>> for ReportZone {
    fn from(timezone: Option<Tz>) -> Self {
        timezone.map_or(ReportZone::Local, ReportZone::Named)
    }
}

impl From<Tz> for ReportZone {
    fn from(tz: Tz) -> Self {
        ReportZone::Named(tz)
    }
}

impl From<FixedOffset> for ReportZone {
    fn from(offset: FixedOffset) -> Self {
        ReportZone::Fixed(offset)
    }
}

impl ReportZone {
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.localize(&Utc::now().fixed_offset())
    }

    /// Same instant, with the offset this zone has at that instant.
    pub fn localize(&self, instant: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        match self {
            ReportZone::Local => instant.with_timezone(&Local).fixed_offset(),
            ReportZone::Named(tz) => instant.with_timezone(tz).fixed_offset(),
            ReportZone::Fixed(offset) => instant.with_timezone(offset),
        }
    }

    /// Interprets a wall-clock time in this zone.
    ///
    /// An ambiguous time resolves to its earlier instant; a time skipped by a
    /// daylight-saving jump moves forward one hour.
    pub fn resolve(&self, local: NaiveDateTime) -> DateTime<FixedOffset> {
        match self {
            ReportZone::Local => resolve_in(&Local, local),
            ReportZone::Named(tz) => resolve_in(tz, local),
            ReportZone::Fixed(offset) => resolve_in(offset, local),
        }
    }

    pub fn midnight(&self, date: NaiveDate) -> DateTime<FixedOffset> {
        self.resolve(date.and_time(NaiveTime::MIN))
    }
}

fn resolve_in<Z: TimeZone>(zone: &Z, local: NaiveDateTime) -> DateTime<FixedOffset> {
    zone.from_local_datetime(&local)
        .earliest()
        .or_else(|| zone.from_local_datetime(&(local + Duration::hours(1))).earliest())
        .unwrap_or_else(|| zone.from_utc_datetime(&local))
        .fixed_offset()
}

/// Inclusive range of instants in the reporting zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub zone: ReportZone,
}

impl TimeWindow {
    /// From 00:00:00 of `date` to the last microsecond before the next midnight.
    pub fn day(date: NaiveDate, zone: impl Into<ReportZone>) -> Self {
        Self::days(date, 1, zone.into())
    }

    /// The seven days starting at the most recent `week_start` on or before `date`.
    pub fn week(date: NaiveDate, week_start: Weekday, zone: impl Into<ReportZone>) -> Self {
        Self::days(start_of_week(date, week_start), 7, zone.into())
    }

    fn days(first: NaiveDate, count: i64, zone: ReportZone) -> Self {
        let start = zone.midnight(first);
        let end = zone.midnight(first + Duration::days(count)) - Duration::microseconds(1);
        Self { start, end, zone }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date_naive()
    }

    pub fn contains(&self, instant: &DateTime<FixedOffset>) -> bool {
        self.start <= *instant && *instant <= self.end
    }
}

pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let back = (date.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    date - Duration::days(back as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starting_monday() {
        // 1900-12-31 is a Monday.
        let window = TimeWindow::week(date(1900, 12, 31), Weekday::Mon, FixedOffset::east_opt(0).unwrap());
        assert_eq!(window.first_day(), date(1900, 12, 31));
        assert_eq!(window.last_day(), date(1901, 1, 6));
        assert_eq!(window.end.format("%H:%M:%S%.6f").to_string(), "23:59:59.999999");
    }

    #[test]
    fn week_from_midweek_and_sunday() {
        let utc = FixedOffset::east_opt(0).unwrap();
        // 2024-03-07 is a Thursday, 2024-03-10 a Sunday.
        assert_eq!(TimeWindow::week(date(2024, 3, 7), Weekday::Mon, utc).first_day(), date(2024, 3, 4));
        assert_eq!(TimeWindow::week(date(2024, 3, 10), Weekday::Mon, utc).first_day(), date(2024, 3, 4));
        assert_eq!(TimeWindow::week(date(2024, 3, 10), Weekday::Sun, utc).first_day(), date(2024, 3, 10));
        assert_eq!(TimeWindow::week(date(2024, 3, 7), Weekday::Sun, utc).last_day(), date(2024, 3, 9));
    }

    #[test]
    fn named_zone_now_uses_zone_offset() {
        let now = ReportZone::Named(chrono_tz::Asia::Kolkata).now();
        assert_eq!(now.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn day_window_respects_offset() {
        let plus3 = FixedOffset::east_opt(3 * 3600).unwrap();
        let window = TimeWindow::day(date(2024, 3, 4), plus3);
        assert_eq!(window.start.to_rfc3339(), "2024-03-04T00:00:00+03:00");
        assert_eq!(window.start.naive_utc().to_string(), "2024-03-03 21:00:00");
        assert!(window.contains(&window.end));
        assert!(!window.contains(&(window.end + Duration::microseconds(1))));
    }

    #[test]
    fn week_window_follows_zone_offsets() {
        // Berlin leaves summer time on Sunday 2024-10-27.
        let window = TimeWindow::week(date(2024, 10, 23), Weekday::Mon, chrono_tz::Europe::Berlin);
        assert_eq!(window.start.to_rfc3339(), "2024-10-21T00:00:00+02:00");
        assert_eq!(window.end.to_rfc3339(), "2024-10-27T23:59:59.999999+01:00");
        assert_eq!(window.end - window.start, Duration::hours(7 * 24 + 1) - Duration::microseconds(1));
    }

    #[test]
    fn skipped_wall_clock_moves_forward() {
        // Berlin clocks jump from 02:00 to 03:00 on 2024-03-31.
        let berlin = ReportZone::Named(chrono_tz::Europe::Berlin);
        let resolved = berlin.resolve(date(2024, 3, 31).and_hms_opt(2, 30, 0).unwrap());
        assert_eq!(resolved.to_rfc3339(), "2024-03-31T03:30:00+02:00");
    }

    #[test]
    fn ambiguous_wall_clock_takes_earlier_instant() {
        // Berlin clocks fall back from 03:00 to 02:00 on 2024-10-27.
        let berlin = ReportZone::Named(chrono_tz::Europe::Berlin);
        let resolved = berlin.resolve(date(2024, 10, 27).and_hms_opt(2, 30, 0).unwrap());
        assert_eq!(resolved.to_rfc3339(), "2024-10-27T02:30:00+02:00");
    }
}
