//! Clients for the external services wlb talks to.
//!
//! - **Google Calendar**: service-account authentication and event listing
//! - **Telegram**: Bot API long polling and replies
//!
//! Calendar access goes through two small traits so the command dispatcher
//! can be driven by any event source. [`CalendarConnector`] performs the
//! authentication step triggered by `/start`; the [`CalendarSource`] it
//! yields answers event queries for the rest of the process lifetime.

use crate::libs::event::Event;
use crate::libs::period::TimeWindow;
use thiserror::Error;

pub mod google;
pub mod telegram;

pub use google::{GoogleCalendar, GoogleConnector};
pub use telegram::Telegram;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{service} api error: http {status}; body={body}")]
    Status { service: &'static str, status: u16, body: String },
    #[error("invalid {service} payload: {source}")]
    Payload {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("invalid calendar entry: {0}")]
    InvalidEvent(String),
    #[error("invalid api url: {0}")]
    Url(String),
    #[error("telegram api error: {0}")]
    Telegram(String),
}

/// Read access to calendar events.
#[allow(async_fn_in_trait)]
pub trait CalendarSource {
    /// Events overlapping `window`, ordered by start time.
    ///
    /// Timestamps may carry any offset; callers convert them to the
    /// reporting offset themselves.
    async fn list_events(&self, window: &TimeWindow) -> Result<Vec<Event>, ApiError>;
}

/// Establishes an authenticated [`CalendarSource`].
#[allow(async_fn_in_trait)]
pub trait CalendarConnector {
    type Source: CalendarSource;

    async fn connect(&self) -> Result<Self::Source, ApiError>;
}
