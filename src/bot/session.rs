/// Per-process bot state, owned by the dispatcher.
///
/// Holds the calendar handle created by `/start`. Until then every data
/// command answers that the bot has not been started.
#[derive(Debug)]
pub struct Session<S> {
    calendar: Option<S>,
}

impl<S> Default for Session<S> {
    fn default() -> Self {
        Self { calendar: None }
    }
}

impl<S> Session<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous handle; a repeated `/start` reconnects.
    pub fn connect(&mut self, calendar: S) {
        self.calendar = Some(calendar);
    }

    pub fn calendar(&self) -> Option<&S> {
        self.calendar.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.calendar.is_some()
    }
}
