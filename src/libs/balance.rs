//! Weekly over/underwork balance.
//!
//! The calculator partitions the week's events by [`Labels::classify`] and
//! sums their durations. The comparison favours the overwork side: equal
//! totals read as `Overworked: 0:00:00`.

use crate::libs::event::{Event, EventKind, Labels};
use crate::libs::formatter::{format_date, format_duration};
use crate::libs::messages::Message;
use crate::libs::period::TimeWindow;
use chrono::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub underwork: Duration,
    pub overwork: Duration,
}

impl Default for Balance {
    fn default() -> Self {
        Self {
            underwork: Duration::zero(),
            overwork: Duration::zero(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Overworked(Duration),
    Underworked(Duration),
}

/// Sums `end - start` of underwork and overwork events.
///
/// Input is expected to be restricted to the week window already. Zero-length
/// events add nothing and reversed events subtract; neither is an error.
pub fn get_balance(events: &[Event], labels: &Labels) -> Balance {
    events.iter().fold(Balance::default(), |mut balance, event| {
        match labels.classify(event) {
            EventKind::Underwork => balance.underwork = balance.underwork + event.duration(),
            EventKind::Overwork => balance.overwork = balance.overwork + event.duration(),
            EventKind::Other => {}
        }
        balance
    })
}

impl Balance {
    pub fn verdict(&self) -> Verdict {
        if self.overwork >= self.underwork {
            Verdict::Overworked(self.overwork - self.underwork)
        } else {
            Verdict::Underworked(self.underwork - self.overwork)
        }
    }
}

impl Verdict {
    pub fn message(&self) -> Message {
        match self {
            Verdict::Overworked(duration) => Message::Overworked(format_duration(duration)),
            Verdict::Underworked(duration) => Message::Underworked(format_duration(duration)),
        }
    }
}

/// `Week <first day> - <last day>:\n<verdict>`
pub fn weekly_report(window: &TimeWindow, balance: &Balance) -> String {
    Message::WeeklyBalance {
        first_day: format_date(&window.first_day()),
        last_day: format_date(&window.last_day()),
        verdict: balance.verdict().message().to_string(),
    }
    .to_string()
}
