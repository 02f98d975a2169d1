//! Resolves when today's working day ends.
//!
//! The last overwork entry of the day marks departure. A zero-length overwork
//! entry is a placeholder: in that case the day ends at the *start* of the
//! last underwork entry, not at its end.

use crate::libs::event::{Event, EventKind, Labels};
use crate::libs::formatter::format_clock;
use crate::libs::messages::Message;
use chrono::{DateTime, Duration, FixedOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayEnd {
    Found(DateTime<FixedOffset>),
    NoDataForToday,
}

fn last_of_kind<'a>(events: &'a [Event], labels: &Labels, kind: EventKind) -> Option<&'a Event> {
    // max_by_key keeps the later element on ties, so input order breaks them
    events.iter().filter(|event| labels.classify(event) == kind).max_by_key(|event| event.start)
}

/// Both an underwork and an overwork entry are required, otherwise the
/// outcome is [`DayEnd::NoDataForToday`].
pub fn resolve_day_end(events: &[Event], labels: &Labels) -> DayEnd {
    let underwork = last_of_kind(events, labels, EventKind::Underwork);
    let overwork = last_of_kind(events, labels, EventKind::Overwork);

    match (underwork, overwork) {
        (Some(underwork), Some(overwork)) if overwork.duration() == Duration::zero() => DayEnd::Found(underwork.start),
        (Some(_), Some(overwork)) => DayEnd::Found(overwork.end),
        _ => DayEnd::NoDataForToday,
    }
}

impl DayEnd {
    pub fn message(&self) -> Message {
        match self {
            DayEnd::Found(instant) => Message::GoHomeScheduled(format_clock(instant)),
            DayEnd::NoDataForToday => Message::NoDataForToday,
        }
    }
}
