use super::DateArgs;
use crate::api::{CalendarConnector, GoogleConnector};
use crate::bot::handlers::{weekly_data, ReportSettings};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::{Context, Result};

pub async fn cmd(config: &Config, args: DateArgs) -> Result<()> {
    let calendar = GoogleConnector::from_config(config).connect().await.context(Message::CalendarConnectFailed(config.calendar_id.clone()))?;
    let report = weekly_data(&calendar, &ReportSettings::from_config(config), &args.now(config)).await?;
    msg_print!(report);
    Ok(())
}
