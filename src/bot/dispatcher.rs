//! Routes chat commands to report handlers.
//!
//! The dispatcher owns the [`Session`] and answers one message at a time.
//! It never talks to Telegram itself; the runner sends whatever [`Reply`]
//! comes back, which keeps the command logic testable with a fake calendar.

use super::command::BotCommand;
use super::handlers::{end_of_working_day, week_details, weekly_data, ReportSettings};
use super::reply::{Keyboard, Reply};
use super::session::Session;
use crate::api::{ApiError, CalendarConnector};
use crate::libs::messages::Message;
use chrono::{DateTime, FixedOffset};

pub struct Dispatcher<C: CalendarConnector> {
    connector: C,
    session: Session<C::Source>,
    settings: ReportSettings,
    admin_username: String,
    bot_username: Option<String>,
}

impl<C: CalendarConnector> Dispatcher<C> {
    pub fn new(connector: C, settings: ReportSettings, admin_username: impl Into<String>) -> Self {
        Self {
            connector,
            session: Session::new(),
            settings,
            admin_username: admin_username.into(),
            bot_username: None,
        }
    }

    /// Restricts `/cmd@name` mentions to this bot's own username.
    pub fn with_bot_username(mut self, bot_username: impl Into<String>) -> Self {
        self.bot_username = Some(bot_username.into());
        self
    }

    pub fn is_started(&self) -> bool {
        self.session.is_started()
    }

    fn is_admin(&self, sender: Option<&str>) -> bool {
        sender.is_some_and(|username| username.trim_start_matches('@').eq_ignore_ascii_case(&self.admin_username))
    }

    /// Answers one incoming text.
    ///
    /// Messages from anyone but the admin get `Access denied.`. A failed
    /// calendar call is returned as an error and produces no reply.
    pub async fn handle(&mut self, sender: Option<&str>, text: &str, now: &DateTime<FixedOffset>) -> Result<Reply, ApiError> {
        if !self.is_admin(sender) {
            return Ok(Reply::text(Message::AccessDenied.to_string()));
        }

        let command = BotCommand::parse(text, self.bot_username.as_deref()).unwrap_or(BotCommand::Help);
        let received = Message::CommandReceived {
            command: command.to_string(),
            username: sender.unwrap_or_default().to_string(),
        };
        tracing::debug!("{}", received);

        match command {
            BotCommand::Start => self.start().await,
            BotCommand::Help => Ok(Reply::text(Message::Help.to_string())),
            data_command => {
                let Some(calendar) = self.session.calendar() else {
                    return Ok(Reply::text(Message::BotNotStarted.to_string()));
                };
                let text = match data_command {
                    BotCommand::WeeklyData => weekly_data(calendar, &self.settings, now).await?,
                    BotCommand::WeekDetails => week_details(calendar, &self.settings, now).await?,
                    _ => end_of_working_day(calendar, &self.settings, now).await?,
                };
                Ok(Reply::text(text))
            }
        }
    }

    async fn start(&mut self) -> Result<Reply, ApiError> {
        let calendar = self.connector.connect().await?;
        self.session.connect(calendar);
        Ok(Reply::text(Message::CalendarRegistering.to_string()).with_keyboard(report_keyboard()))
    }
}

/// One button per data command.
pub fn report_keyboard() -> Keyboard {
    Keyboard {
        rows: BotCommand::DATA_COMMANDS.iter().map(|command| vec![command.as_str().to_string()]).collect(),
        placeholder: Some(Message::KeyboardPlaceholder.to_string()),
    }
}
