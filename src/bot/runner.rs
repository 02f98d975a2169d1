//! Long-polling loop of the chat bot.

use super::dispatcher::Dispatcher;
use super::handlers::ReportSettings;
use crate::api::telegram::{IncomingMessage, LONG_POLL_TIMEOUT_SECS};
use crate::api::{CalendarConnector, GoogleConnector, Telegram};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::period::ReportZone;
use crate::msg_info;
use anyhow::{Context, Result};
use std::time::Duration;

/// Pause after a failed `getUpdates` call.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Runs the bot until Ctrl-C.
///
/// Failures of a single update are logged and the loop continues with the
/// next one; the user who sent the failing command gets no reply.
pub async fn run(config: &Config) -> Result<()> {
    let telegram_settings = config.telegram()?;
    let telegram = Telegram::new(&telegram_settings.token)?;
    let me = telegram.get_me().await.context("Failed to reach the Telegram Bot API")?;
    let bot_username = me.username.unwrap_or_default();

    let settings = ReportSettings::from_config(config);
    let zone = settings.zone;
    let mut dispatcher = Dispatcher::new(
        GoogleConnector::from_config(config),
        settings,
        telegram_settings.admin_username.clone(),
    )
    .with_bot_username(bot_username.clone());

    msg_info!(Message::BotPolling(bot_username));

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut offset: Option<i64> = None;

    loop {
        let updates = tokio::select! {
            _ = &mut shutdown => {
                msg_info!(Message::BotStopping);
                return Ok(());
            }
            updates = telegram.get_updates(offset, LONG_POLL_TIMEOUT_SECS) => updates,
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(e) => {
                tracing::error!("{}", Message::PollingFailed(e.to_string()));
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            if let Some(message) = update.message {
                process(&telegram, &mut dispatcher, &message, &zone).await;
            }
        }
    }
}

async fn process<C: CalendarConnector>(telegram: &Telegram, dispatcher: &mut Dispatcher<C>, message: &IncomingMessage, zone: &ReportZone) {
    let Some(text) = message.text.as_deref() else {
        return;
    };

    let reply = match dispatcher.handle(message.username(), text, &zone.now()).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!("{}", Message::UpdateHandlingFailed(e.to_string()));
            return;
        }
    };

    if let Err(e) = telegram.send_reply(message.chat.id, &reply).await {
        tracing::error!("{}", Message::ReplyFailed(e.to_string()));
    }
}
