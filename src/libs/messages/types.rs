#[derive(Debug, Clone)]
pub enum Message {
    // === BOT REPLIES ===
    CalendarRegistering,
    BotNotStarted,
    AccessDenied,
    Help,
    NoDataForToday,
    GoHomeScheduled(String), // HH:MM
    WeeklyBalance {
        first_day: String,
        last_day: String,
        verdict: String,
    },
    Overworked(String),  // formatted duration
    Underworked(String), // formatted duration
    EmptyWeekDetails,

    // === KEYBOARD ===
    KeyboardPlaceholder,

    // === BOT LIFECYCLE ===
    BotPolling(String), // bot username
    BotStopping,
    CalendarConnected(String), // calendar id
    CommandReceived {
        command: String,
        username: String,
    },
    UpdateHandlingFailed(String), // error
    PollingFailed(String),        // error
    ReplyFailed(String),          // error

    // === CONFIGURATION ===
    ConfigLoaded,
    EnvFileLoaded(String), // path
    EnvFileNotLoaded,

    // === CALENDAR ===
    CalendarConnectFailed(String), // calendar id
    CalendarEventsFetched {
        count: usize,
        from: String,
        to: String,
    },
    TokenRefreshed,
}
