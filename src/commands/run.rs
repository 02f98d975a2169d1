use crate::bot::runner;
use crate::libs::config::Config;
use anyhow::Result;

pub async fn cmd(config: &Config) -> Result<()> {
    runner::run(config).await
}
