//! Telegram Bot API client.
//!
//! Only the three methods the bot needs are implemented: `getMe` to learn the
//! bot's own username, `getUpdates` for long polling and `sendMessage` for
//! replies. The bot token is part of every method URL, so request errors are
//! stripped of their URL before they can reach a log line.

use super::ApiError;
use crate::bot::reply::{Keyboard, Reply};
use crate::libs::messages::Message;
use crate::libs::metadata::user_agent;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
/// Server-side long-poll timeout passed to `getUpdates`.
pub const LONG_POLL_TIMEOUT_SECS: u64 = 30;
/// Client-side request timeout; must exceed the long-poll timeout.
const REQUEST_TIMEOUT_SECS: u64 = LONG_POLL_TIMEOUT_SECS + 15;

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

impl IncomingMessage {
    pub fn username(&self) -> Option<&str> {
        self.from.as_ref().and_then(|user| user.username.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: [&'static str; 1],
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
struct ReplyKeyboardMarkup {
    keyboard: Vec<Vec<KeyboardButton>>,
    resize_keyboard: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_field_placeholder: Option<String>,
}

#[derive(Debug, Serialize)]
struct KeyboardButton {
    text: String,
}

impl From<&Keyboard> for ReplyKeyboardMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        Self {
            keyboard: keyboard
                .rows
                .iter()
                .map(|row| row.iter().map(|label| KeyboardButton { text: label.clone() }).collect())
                .collect(),
            resize_keyboard: true,
            input_field_placeholder: keyboard.placeholder.clone(),
        }
    }
}

pub struct Telegram {
    client: Client,
    api_base: String,
    token: String,
}

impl Telegram {
    pub fn new(token: &str) -> Result<Self, ApiError> {
        Self::with_api_base(token, TELEGRAM_API_BASE)
    }

    pub fn with_api_base(token: &str, api_base: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(user_agent())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn call<P, T>(&self, method: &str, payload: &P) -> Result<T, ApiError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/bot{}/{}", self.api_base, self.token, method);
        let response = self.client.post(url).json(payload).send().await.map_err(|e| ApiError::Http(e.without_url()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Http(e.without_url()))?;

        // Telegram answers errors with a JSON body too, so parse before checking the status
        let parsed: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(ApiError::Status {
                    service: "telegram",
                    status: status.as_u16(),
                    body,
                })
            }
            Err(source) => return Err(ApiError::Payload { service: "telegram", source }),
        };

        match (parsed.ok, parsed.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(ApiError::Telegram(
                parsed.description.unwrap_or_else(|| format!("{} failed with http {}", method, status.as_u16())),
            )),
        }
    }

    /// The bot's own account.
    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-polls for message updates with an id of at least `offset`.
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>, ApiError> {
        let payload = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: ["message"],
        };
        self.call("getUpdates", &payload).await
    }

    /// Sends `reply` to `chat_id`.
    ///
    /// The Bot API rejects empty texts, so an empty reply is sent as a short
    /// placeholder instead.
    pub async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<(), ApiError> {
        let placeholder = Message::EmptyWeekDetails.to_string();
        let text = if reply.text.trim().is_empty() { placeholder.as_str() } else { reply.text.as_str() };
        let payload = SendMessage {
            chat_id,
            text,
            reply_markup: reply.keyboard.as_ref().map(ReplyKeyboardMarkup::from),
        };
        let _: serde_json::Value = self.call("sendMessage", &payload).await?;
        Ok(())
    }
}
