//! Configuration for the wlb bot.
//!
//! Every setting comes from a `WLB_*` environment variable. A `.env` file in
//! the working directory is loaded first with `dotenv`; variables already
//! present in the process environment take precedence over the file.
//! The configuration is read once at startup and never changes afterwards.
//!
//! ## Keys
//!
//! - **Telegram**: `WLB_BOT_API_TOKEN`, `WLB_ADMIN_USERNAME`
//! - **Calendar**: `WLB_CALENDAR_ID`
//! - **Service account**: either `WLB_CREDENTIALS_FILE` (a JSON key as
//!   downloaded from the cloud console) or the individual fields `WLB_TYPE`,
//!   `WLB_PROJECT_ID`, `WLB_PRIVATE_KEY_ID`, `WLB_PRIVATE_KEY`,
//!   `WLB_CLIENT_EMAIL`, `WLB_CLIENT_ID`, `WLB_AUTH_URI`, `WLB_TOKEN_URI`,
//!   `WLB_AUTH_PROVIDER_X509_CERT_URL`, `WLB_CLIENT_X509_CERT_URL`
//! - **Reports**: `WLB_UNDERWORK_LABEL`, `WLB_OVERWORK_LABEL`,
//!   `WLB_DETAIL_PATTERNS` (JSON array of regular expressions),
//!   `WLB_WEEK_START`, `WLB_TIMEZONE`
//! - **Logging**: `WLB_DEBUG`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wlb::libs::config::Config;
//!
//! let config = Config::from_env()?;
//! println!("Calendar: {}", config.calendar_id);
//! # Ok::<(), wlb::libs::config::ConfigError>(())
//! ```

use crate::libs::event::{Labels, DEFAULT_OVERWORK_LABEL, DEFAULT_UNDERWORK_LABEL};
use crate::libs::report::DetailFilters;
use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

pub const KEY_BOT_API_TOKEN: &str = "WLB_BOT_API_TOKEN";
pub const KEY_ADMIN_USERNAME: &str = "WLB_ADMIN_USERNAME";
pub const KEY_CALENDAR_ID: &str = "WLB_CALENDAR_ID";
pub const KEY_CREDENTIALS_FILE: &str = "WLB_CREDENTIALS_FILE";
pub const KEY_PRIVATE_KEY: &str = "WLB_PRIVATE_KEY";
pub const KEY_CLIENT_EMAIL: &str = "WLB_CLIENT_EMAIL";
pub const KEY_UNDERWORK_LABEL: &str = "WLB_UNDERWORK_LABEL";
pub const KEY_OVERWORK_LABEL: &str = "WLB_OVERWORK_LABEL";
pub const KEY_DETAIL_PATTERNS: &str = "WLB_DETAIL_PATTERNS";
pub const KEY_WEEK_START: &str = "WLB_WEEK_START";
pub const KEY_TIMEZONE: &str = "WLB_TIMEZONE";
pub const KEY_DEBUG: &str = "WLB_DEBUG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration value {0}")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("Cannot read credentials file {}: {source}", .path.display())]
    CredentialsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Service-account credentials bundle.
///
/// Only `private_key`, `client_email`, `private_key_id` and `token_uri` take
/// part in authentication; the remaining fields are carried so a bundle read
/// from the environment has the same shape as a downloaded key file.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub auth_provider_x509_cert_url: String,
    #[serde(default)]
    pub client_x509_cert_url: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Telegram connection settings, needed only when the bot itself runs.
#[derive(Clone)]
pub struct TelegramSettings {
    pub token: String,
    pub admin_username: String,
}

impl fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("token", &"<redacted>")
            .field("admin_username", &self.admin_username)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram settings, or the first missing key.
    pub telegram: Result<TelegramSettings, &'static str>,
    pub calendar_id: String,
    pub credentials: ServiceAccountKey,
    pub labels: Labels,
    pub detail_filters: DetailFilters,
    pub week_start: Weekday,
    /// Zone of the reporting clock; the system local zone when unset.
    pub timezone: Option<Tz>,
    pub debug: bool,
    /// The `.env` file that was loaded, if any.
    pub env_file: Option<PathBuf>,
}

/// Accepts `1`, `true`, `yes` and `on` in any case.
pub fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl Config {
    /// Loads `.env` from the working directory or its parents (if any) and
    /// reads the configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_file = dotenv::dotenv().ok();
        Self::from_process_env(env_file)
    }

    /// Like [`Config::from_env`] with an explicit env file.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        let env_file = dotenv::from_path(path).ok().map(|_| path.to_path_buf());
        Self::from_process_env(env_file)
    }

    fn from_process_env(env_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::from_lookup(|key| env::var(key).ok())?;
        config.env_file = env_file;
        Ok(config)
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let telegram = match (get(KEY_BOT_API_TOKEN), get(KEY_ADMIN_USERNAME)) {
            (Some(token), Some(admin)) => Ok(TelegramSettings {
                token,
                admin_username: admin.trim().trim_start_matches('@').to_string(),
            }),
            (None, _) => Err(KEY_BOT_API_TOKEN),
            (Some(_), None) => Err(KEY_ADMIN_USERNAME),
        };

        let calendar_id = get(KEY_CALENDAR_ID).ok_or(ConfigError::Missing(KEY_CALENDAR_ID))?;
        let credentials = match get(KEY_CREDENTIALS_FILE) {
            Some(path) => read_credentials_file(PathBuf::from(path))?,
            None => credentials_from_fields(&get)?,
        };

        let labels = Labels::new(
            get(KEY_UNDERWORK_LABEL).unwrap_or_else(|| DEFAULT_UNDERWORK_LABEL.to_string()),
            get(KEY_OVERWORK_LABEL).unwrap_or_else(|| DEFAULT_OVERWORK_LABEL.to_string()),
        );

        let detail_filters = match get(KEY_DETAIL_PATTERNS) {
            Some(raw) => parse_detail_patterns(&raw)?,
            None => DetailFilters::default(),
        };

        let week_start = match get(KEY_WEEK_START) {
            Some(raw) => raw.trim().parse::<Weekday>().map_err(|_| ConfigError::Invalid {
                key: KEY_WEEK_START,
                reason: format!("'{}' is not a weekday", raw),
            })?,
            None => Weekday::Mon,
        };

        let timezone = match get(KEY_TIMEZONE) {
            Some(raw) => Some(raw.trim().parse::<Tz>().map_err(|e| ConfigError::Invalid {
                key: KEY_TIMEZONE,
                reason: e.to_string(),
            })?),
            None => None,
        };

        let debug = get(KEY_DEBUG).map(|value| is_truthy(&value)).unwrap_or(false);

        Ok(Self {
            telegram,
            calendar_id,
            credentials,
            labels,
            detail_filters,
            week_start,
            timezone,
            debug,
            env_file: None,
        })
    }

    pub fn telegram(&self) -> Result<&TelegramSettings, ConfigError> {
        self.telegram.as_ref().map_err(|key| ConfigError::Missing(*key))
    }
}

fn read_credentials_file(path: PathBuf) -> Result<ServiceAccountKey, ConfigError> {
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::CredentialsFile { path, source })?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Invalid {
        key: KEY_CREDENTIALS_FILE,
        reason: e.to_string(),
    })
}

fn credentials_from_fields<G>(get: &G) -> Result<ServiceAccountKey, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let field = |key: &str| get(key).unwrap_or_default();
    let private_key = get(KEY_PRIVATE_KEY).ok_or(ConfigError::Missing(KEY_PRIVATE_KEY))?;
    let client_email = get(KEY_CLIENT_EMAIL).ok_or(ConfigError::Missing(KEY_CLIENT_EMAIL))?;

    Ok(ServiceAccountKey {
        key_type: field("WLB_TYPE"),
        project_id: field("WLB_PROJECT_ID"),
        private_key_id: field("WLB_PRIVATE_KEY_ID"),
        // .env files usually carry the PEM on one line with escaped newlines
        private_key: private_key.replace("\\n", "\n"),
        client_email,
        client_id: field("WLB_CLIENT_ID"),
        auth_uri: field("WLB_AUTH_URI"),
        token_uri: get("WLB_TOKEN_URI").unwrap_or_else(default_token_uri),
        auth_provider_x509_cert_url: field("WLB_AUTH_PROVIDER_X509_CERT_URL"),
        client_x509_cert_url: field("WLB_CLIENT_X509_CERT_URL"),
    })
}

fn parse_detail_patterns(raw: &str) -> Result<DetailFilters, ConfigError> {
    let sources: Vec<String> = serde_json::from_str(raw).map_err(|e| ConfigError::Invalid {
        key: KEY_DETAIL_PATTERNS,
        reason: format!("expected a JSON array of strings: {}", e),
    })?;
    DetailFilters::compile(&sources).map_err(|e| ConfigError::Invalid {
        key: KEY_DETAIL_PATTERNS,
        reason: e.to_string(),
    })
}
