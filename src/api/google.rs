//! Google Calendar API client.
//!
//! Authenticates as a service account: a JWT signed with the account's RSA
//! key is exchanged at the token endpoint for a short-lived bearer token
//! (OAuth 2.0 JWT bearer grant). The token is cached and renewed shortly
//! before it expires. Events are read from the v3 `events.list` endpoint,
//! expanded to single instances and ordered by start time.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wlb::api::{CalendarConnector, CalendarSource, GoogleConnector};
//! use wlb::libs::config::Config;
//! use wlb::libs::period::{ReportZone, TimeWindow};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let calendar = GoogleConnector::from_config(&config).connect().await?;
//! let zone = ReportZone::from(config.timezone);
//! let events = calendar.list_events(&TimeWindow::day(zone.now().date_naive(), zone)).await?;
//! # Ok(())
//! # }
//! ```

use super::{ApiError, CalendarConnector, CalendarSource};
use crate::libs::config::{Config, ServiceAccountKey};
use crate::libs::event::Event;
use crate::libs::messages::Message;
use crate::libs::metadata::user_agent;
use crate::libs::period::{ReportZone, TimeWindow};
use crate::msg_debug;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3/";
pub const CALENDAR_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are renewed this long before their reported expiry.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;
const MAX_RESULTS: &str = "2500";
const SERVICE: &str = "google calendar";

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct EventsPage {
    items: Option<Vec<CalendarEvent>>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CalendarEvent {
    summary: Option<String>,
    status: Option<String>,
    start: Option<EventDateTime>,
    end: Option<EventDateTime>,
}

#[derive(Debug, Deserialize)]
struct EventDateTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    date: Option<String>,
}

impl EventDateTime {
    /// Timed entries carry an RFC 3339 `dateTime`; all-day entries only a
    /// `date`, which is read as midnight in `zone`.
    fn resolve(&self, zone: &ReportZone) -> Result<DateTime<FixedOffset>, ApiError> {
        if let Some(date_time) = &self.date_time {
            return DateTime::parse_from_rfc3339(date_time).map_err(|e| ApiError::InvalidEvent(format!("{date_time}: {e}")));
        }
        if let Some(date) = &self.date {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| ApiError::InvalidEvent(format!("{date}: {e}")))?;
            return Ok(zone.midnight(date));
        }
        Err(ApiError::InvalidEvent("entry has neither dateTime nor date".to_string()))
    }
}

impl CalendarEvent {
    fn into_event(self, zone: &ReportZone) -> Result<Option<Event>, ApiError> {
        if self.status.as_deref() == Some("cancelled") {
            return Ok(None);
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Ok(None);
        };
        Ok(Some(Event::new(self.summary.unwrap_or_default(), start.resolve(zone)?, end.resolve(zone)?)))
    }
}

/// Signs assertions with the service-account key and caches the bearer token.
struct ServiceAccountAuth {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    token: Mutex<Option<AccessToken>>,
}

impl ServiceAccountAuth {
    fn new(key: &ServiceAccountKey) -> Result<Self, ApiError> {
        let encoding_key =
            EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| ApiError::Auth(format!("invalid private key: {e}")))?;
        Ok(Self {
            key: key.clone(),
            encoding_key,
            token: Mutex::new(None),
        })
    }

    fn assertion(&self, now: DateTime<Utc>) -> Result<String, ApiError> {
        let mut header = Header::new(Algorithm::RS256);
        if !self.key.private_key_id.is_empty() {
            header.kid = Some(self.key.private_key_id.clone());
        }
        let claims = Claims {
            iss: &self.key.client_email,
            scope: CALENDAR_READONLY_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| ApiError::Auth(format!("cannot sign assertion: {e}")))
    }

    async fn bearer(&self, client: &Client) -> Result<String, ApiError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref() {
            if token.expires_at > now {
                return Ok(token.value.clone());
            }
        }

        let assertion = self.assertion(now)?;
        let response = client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Auth(format!("token endpoint returned http {}; body={body}", status.as_u16())));
        }

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|source| ApiError::Payload { service: SERVICE, source })?;
        let lifetime = parsed.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        let token = AccessToken {
            value: parsed.access_token,
            expires_at: now + Duration::seconds((lifetime - TOKEN_EXPIRY_MARGIN_SECS).max(0)),
        };
        msg_debug!(Message::TokenRefreshed);

        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}

/// Authenticated handle on one calendar.
pub struct GoogleCalendar {
    client: Client,
    api_base: Url,
    calendar_id: String,
    auth: ServiceAccountAuth,
}

impl GoogleCalendar {
    pub fn new(calendar_id: &str, key: &ServiceAccountKey) -> Result<Self, ApiError> {
        Self::with_api_base(calendar_id, key, CALENDAR_API_BASE)
    }

    /// Like [`GoogleCalendar::new`] against a different API root.
    pub fn with_api_base(calendar_id: &str, key: &ServiceAccountKey, api_base: &str) -> Result<Self, ApiError> {
        if calendar_id.trim().is_empty() {
            return Err(ApiError::Url("calendar id must not be empty".to_string()));
        }
        let mut api_base = Url::parse(api_base).map_err(|e| ApiError::Url(format!("{api_base}: {e}")))?;
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }
        let client = Client::builder().user_agent(user_agent()).build()?;

        Ok(Self {
            client,
            api_base,
            calendar_id: calendar_id.trim().to_string(),
            auth: ServiceAccountAuth::new(key)?,
        })
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    /// Obtains a bearer token, proving the credentials work.
    pub async fn authorize(&self) -> Result<(), ApiError> {
        self.auth.bearer(&self.client).await.map(|_| ())
    }

    fn events_endpoint(&self) -> Result<Url, ApiError> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| ApiError::Url("calendar api base URL cannot be a base".to_string()))?;
            segments.pop_if_empty();
            segments.push("calendars");
            segments.push(&self.calendar_id);
            segments.push("events");
        }
        Ok(url)
    }
}

impl CalendarSource for GoogleCalendar {
    async fn list_events(&self, window: &TimeWindow) -> Result<Vec<Event>, ApiError> {
        let endpoint = self.events_endpoint()?;
        let time_min = window.start.to_rfc3339();
        let time_max = window.end.to_rfc3339();
        let mut page_token: Option<String> = None;
        let mut events = Vec::new();

        loop {
            let bearer = self.auth.bearer(&self.client).await?;
            let mut request = self.client.get(endpoint.clone()).bearer_auth(bearer).query(&[
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("maxResults", MAX_RESULTS),
            ]);
            if let Some(page_token) = page_token.as_deref() {
                request = request.query(&[("pageToken", page_token)]);
            }

            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(ApiError::Status {
                    service: SERVICE,
                    status: status.as_u16(),
                    body,
                });
            }

            let page: EventsPage = serde_json::from_str(&body).map_err(|source| ApiError::Payload { service: SERVICE, source })?;
            for item in page.items.unwrap_or_default() {
                if let Some(event) = item.into_event(&window.zone)? {
                    events.push(event);
                }
            }

            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        msg_debug!(Message::CalendarEventsFetched {
            count: events.len(),
            from: time_min,
            to: time_max,
        });
        Ok(events)
    }
}

/// Builds a [`GoogleCalendar`] from configuration when the bot is started.
#[derive(Debug, Clone)]
pub struct GoogleConnector {
    calendar_id: String,
    key: ServiceAccountKey,
    api_base: String,
}

impl GoogleConnector {
    pub fn new(calendar_id: impl Into<String>, key: ServiceAccountKey) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            key,
            api_base: CALENDAR_API_BASE.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.calendar_id.clone(), config.credentials.clone())
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl CalendarConnector for GoogleConnector {
    type Source = GoogleCalendar;

    async fn connect(&self) -> Result<GoogleCalendar, ApiError> {
        let calendar = GoogleCalendar::with_api_base(&self.calendar_id, &self.key, &self.api_base)?;
        calendar.authorize().await?;
        tracing::info!("{}", Message::CalendarConnected(calendar.calendar_id().to_string()));
        Ok(calendar)
    }
}
