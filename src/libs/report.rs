//! Detailed week report: selected entries grouped under date headers.
//!
//! ```text
//!
//!
//!  --- 2024-03-04 ---
//! 	Standup
//! 		09:00:00		09:15:00
//! ```

use crate::libs::event::Event;
use crate::libs::formatter::{format_date, format_time};
use regex::Regex;
use std::fmt::Write;

/// Ordered set of precompiled patterns selecting entries for the report.
///
/// A summary is selected when any pattern matches at its very start; the rest
/// of the summary may hold anything.
#[derive(Debug, Clone, Default)]
pub struct DetailFilters {
    patterns: Vec<Regex>,
}

impl DetailFilters {
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    pub fn compile<I, S>(sources: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = sources.into_iter().map(|source| Regex::new(source.as_ref())).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(patterns))
    }

    pub fn matches(&self, summary: &str) -> bool {
        // The leftmost match starts at 0 whenever any match does.
        self.patterns.iter().any(|pattern| pattern.find(summary).is_some_and(|m| m.start() == 0))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// Renders the selected events sorted by start; an empty selection renders as "".
pub fn render_week_details(events: &[Event], filters: &DetailFilters) -> String {
    if filters.is_empty() {
        return String::new();
    }
    let mut selected: Vec<&Event> = events.iter().filter(|event| filters.matches(&event.summary)).collect();
    selected.sort_by_key(|event| event.start);

    let mut out = String::new();
    let mut current_date = None;
    for event in selected {
        let date = event.start.date_naive();
        if current_date != Some(date) {
            let _ = write!(out, "\n\n --- {} ---\n", format_date(&date));
            current_date = Some(date);
        }
        let _ = write!(out, "\t{}\n\t\t{}\t\t{}\n", event.summary, format_time(&event.start), format_time(&event.end));
    }
    out
}
