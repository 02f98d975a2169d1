//! Report handlers shared by the chat dispatcher and the one-shot CLI commands.
//!
//! Each handler queries the calendar for its window in the reporting zone,
//! converts the events to that zone and renders the reply text.
//! Calendar failures are returned untouched; there is no partial result.

use crate::api::{ApiError, CalendarSource};
use crate::libs::balance::{get_balance, weekly_report};
use crate::libs::config::Config;
use crate::libs::event::{Event, Labels};
use crate::libs::period::{ReportZone, TimeWindow};
use crate::libs::report::{render_week_details, DetailFilters};
use crate::libs::workday::resolve_day_end;
use chrono::{DateTime, FixedOffset, Weekday};

/// The report-related part of the configuration.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub labels: Labels,
    pub detail_filters: DetailFilters,
    pub week_start: Weekday,
    pub zone: ReportZone,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            detail_filters: DetailFilters::default(),
            week_start: Weekday::Mon,
            zone: ReportZone::Local,
        }
    }
}

impl ReportSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            labels: config.labels.clone(),
            detail_filters: config.detail_filters.clone(),
            week_start: config.week_start,
            zone: ReportZone::from(config.timezone),
        }
    }

    /// The week containing `now`, read on the reporting clock.
    pub fn week_of(&self, now: &DateTime<FixedOffset>) -> TimeWindow {
        TimeWindow::week(self.zone.localize(now).date_naive(), self.week_start, self.zone)
    }

    pub fn day_of(&self, now: &DateTime<FixedOffset>) -> TimeWindow {
        TimeWindow::day(self.zone.localize(now).date_naive(), self.zone)
    }
}

async fn fetch<S: CalendarSource>(calendar: &S, window: &TimeWindow) -> Result<Vec<Event>, ApiError> {
    let events = calendar.list_events(window).await?;
    Ok(events.iter().map(|event| event.in_zone(&window.zone)).collect())
}

/// `Week <first> - <last>:\n<Overworked|Underworked>: <H:MM:SS>`
pub async fn weekly_data<S: CalendarSource>(calendar: &S, settings: &ReportSettings, now: &DateTime<FixedOffset>) -> Result<String, ApiError> {
    let window = settings.week_of(now);
    let events = fetch(calendar, &window).await?;
    Ok(weekly_report(&window, &get_balance(&events, &settings.labels)))
}

/// Detailed entries of the week selected by the detail filters; may be empty.
pub async fn week_details<S: CalendarSource>(calendar: &S, settings: &ReportSettings, now: &DateTime<FixedOffset>) -> Result<String, ApiError> {
    let window = settings.week_of(now);
    let events = fetch(calendar, &window).await?;
    Ok(render_week_details(&events, &settings.detail_filters))
}

/// `Go home scheduled on HH:MM`, or `No data for today.`
pub async fn end_of_working_day<S: CalendarSource>(
    calendar: &S,
    settings: &ReportSettings,
    now: &DateTime<FixedOffset>,
) -> Result<String, ApiError> {
    let window = settings.day_of(now);
    let events = fetch(calendar, &window).await?;
    Ok(resolve_day_end(&events, &settings.labels).message().to_string())
}
