//! Calendar events and their work-balance classification.
//!
//! An [`Event`] is a single calendar entry reduced to what the reports need:
//! its label and its start/end timestamps. [`Labels`] holds the two configured
//! labels that mark time short of (underwork) or beyond (overwork) the nominal
//! schedule, and classifies events by exact, case-sensitive label equality.

use crate::libs::period::ReportZone;
use chrono::{DateTime, Duration, FixedOffset};

pub const DEFAULT_UNDERWORK_LABEL: &str = "underwork";
pub const DEFAULT_OVERWORK_LABEL: &str = "overwork";

/// A calendar entry fetched for one request.
///
/// `end >= start` is expected from the calendar but never validated; a
/// reversed entry simply has a negative [`duration`](Event::duration).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub summary: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl Event {
    pub fn new(summary: impl Into<String>, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self {
            summary: summary.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    /// Same instants, each expressed with the offset `zone` has at that
    /// instant. Dates and wall-clock times of the reports are read this way.
    pub fn in_zone(&self, zone: &ReportZone) -> Self {
        Self {
            summary: self.summary.clone(),
            start: zone.localize(&self.start),
            end: zone.localize(&self.end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Underwork,
    Overwork,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub underwork: String,
    pub overwork: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self::new(DEFAULT_UNDERWORK_LABEL, DEFAULT_OVERWORK_LABEL)
    }
}

impl Labels {
    pub fn new(underwork: impl Into<String>, overwork: impl Into<String>) -> Self {
        Self {
            underwork: underwork.into(),
            overwork: overwork.into(),
        }
    }

    /// Exact label match; no trimming, no case folding. When both labels are
    /// configured to the same string the event counts as underwork.
    pub fn classify(&self, event: &Event) -> EventKind {
        if event.summary == self.underwork {
            EventKind::Underwork
        } else if event.summary == self.overwork {
            EventKind::Overwork
        } else {
            EventKind::Other
        }
    }
}
