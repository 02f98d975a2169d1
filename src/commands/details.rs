use super::DateArgs;
use crate::api::{CalendarConnector, GoogleConnector};
use crate::bot::handlers::{week_details, ReportSettings};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_info, msg_print};
use anyhow::{Context, Result};

pub async fn cmd(config: &Config, args: DateArgs) -> Result<()> {
    let calendar = GoogleConnector::from_config(config).connect().await.context(Message::CalendarConnectFailed(config.calendar_id.clone()))?;
    let report = week_details(&calendar, &ReportSettings::from_config(config), &args.now(config)).await?;
    if report.is_empty() {
        msg_info!(Message::EmptyWeekDetails);
    } else {
        msg_print!(report);
    }
    Ok(())
}
