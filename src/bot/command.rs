use std::fmt;

/// Commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    WeeklyData,
    WeekDetails,
    EndOfWorkingDay,
    Help,
}

impl BotCommand {
    pub const DATA_COMMANDS: [BotCommand; 3] = [BotCommand::WeeklyData, BotCommand::WeekDetails, BotCommand::EndOfWorkingDay];

    pub fn as_str(&self) -> &'static str {
        match self {
            BotCommand::Start => "/start",
            BotCommand::WeeklyData => "/get_weekly_data",
            BotCommand::WeekDetails => "/get_week_details",
            BotCommand::EndOfWorkingDay => "/get_end_of_working_day",
            BotCommand::Help => "/help",
        }
    }

    /// Parses the first word of a message.
    ///
    /// `/cmd@botname` is accepted when `botname` matches `bot_username`
    /// (case-insensitive) or when the bot's username is unknown. Anything that
    /// is not a slash command yields `None`.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        if !word.starts_with('/') {
            return None;
        }
        let (name, mention) = match word.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (word, None),
        };
        if let (Some(mention), Some(bot_username)) = (mention, bot_username) {
            if !mention.eq_ignore_ascii_case(bot_username) {
                return None;
            }
        }

        [
            BotCommand::Start,
            BotCommand::WeeklyData,
            BotCommand::WeekDetails,
            BotCommand::EndOfWorkingDay,
            BotCommand::Help,
        ]
        .into_iter()
        .find(|command| command.as_str() == name)
    }
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
