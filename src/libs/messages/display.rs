//! Display implementation for wlb messages.
//!
//! Every user-facing string lives here: chat replies, console output of the
//! CLI commands and the log lines routed through the `msg_*!` macros. Chat
//! replies must stay byte-stable because users (and tests) match on them.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let s = match self {
            // === BOT REPLIES ===
            Message::CalendarRegistering => "Registering your calendar".to_string(),
            Message::BotNotStarted => "Bot has not been started.".to_string(),
            Message::AccessDenied => "Access denied.".to_string(),
            Message::Help => [
                "Available commands:",
                "/start - connect to the calendar",
                "/get_weekly_data - over/underwork balance for this week",
                "/get_week_details - detailed entries for this week",
                "/get_end_of_working_day - when to go home today",
            ]
            .join("\n"),
            Message::NoDataForToday => "No data for today.".to_string(),
            Message::GoHomeScheduled(time) => format!("Go home scheduled on {}", time),
            Message::WeeklyBalance {
                first_day,
                last_day,
                verdict,
            } => format!("Week {} - {}:\n{}", first_day, last_day, verdict),
            Message::Overworked(duration) => format!("Overworked: {}", duration),
            Message::Underworked(duration) => format!("Underworked: {}", duration),
            Message::EmptyWeekDetails => "Nothing to show for this week.".to_string(),

            // === KEYBOARD ===
            Message::KeyboardPlaceholder => "Choose a report".to_string(),

            // === BOT LIFECYCLE ===
            Message::BotPolling(username) => format!("Bot @{} is polling for updates", username),
            Message::BotStopping => "Shutting down the bot".to_string(),
            Message::CalendarConnected(calendar_id) => format!("Connected to calendar {}", calendar_id),
            Message::CommandReceived { command, username } => format!("Command {} from @{}", command, username),
            Message::UpdateHandlingFailed(e) => format!("Failed to handle update: {}", e),
            Message::PollingFailed(e) => format!("Failed to poll for updates: {}", e),
            Message::ReplyFailed(e) => format!("Failed to send reply: {}", e),

            // === CONFIGURATION ===
            Message::ConfigLoaded => "Configuration loaded".to_string(),
            Message::EnvFileLoaded(path) => format!("Loaded settings from {}", path),
            Message::EnvFileNotLoaded => "No .env file loaded".to_string(),

            // === CALENDAR ===
            Message::CalendarConnectFailed(calendar_id) => format!("Cannot connect to calendar {}", calendar_id),
            Message::CalendarEventsFetched { count, from, to } => {
                format!("Fetched {} calendar events between {} and {}", count, from, to)
            }
            Message::TokenRefreshed => "Calendar access token refreshed".to_string(),
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_failure_names_the_calendar() {
        let text = Message::CalendarConnectFailed("team@group.calendar.google.com".to_string()).to_string();
        assert_eq!(text, "Cannot connect to calendar team@group.calendar.google.com");
    }
}
