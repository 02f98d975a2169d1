pub mod balance;
pub mod day_end;
pub mod details;
pub mod run;

use crate::libs::config::Config;
use crate::libs::logging;
use crate::libs::messages::macros::is_debug_mode;
use crate::libs::messages::Message;
use crate::libs::period::ReportZone;
use crate::msg_debug;
use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Start the chat bot and poll for commands")]
    Run,
    #[command(about = "Show the weekly over/underwork balance")]
    Balance(DateArgs),
    #[command(about = "Show when the working day ends")]
    DayEnd(DateArgs),
    #[command(about = "Show the detailed week report")]
    Details(DateArgs),
}

/// Reference date for the one-shot reports.
#[derive(Debug, Args)]
pub struct DateArgs {
    #[arg(long, help = "Report for this date (YYYY-MM-DD) instead of today")]
    date: Option<NaiveDate>,
}

impl DateArgs {
    /// The reporting clock, moved to `--date` when given.
    pub fn now(&self, config: &Config) -> DateTime<FixedOffset> {
        let zone = ReportZone::from(config.timezone);
        let now = zone.now();
        match self.date {
            Some(date) => zone.resolve(date.and_time(now.time())),
            None => now,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[arg(long, global = true, help = "Read settings from this file instead of .env")]
    env_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        let config = match &cli.env_file {
            Some(path) => Config::from_env_file(path)?,
            None => Config::from_env()?,
        };
        logging::init(config.debug || is_debug_mode());
        match &config.env_file {
            Some(path) => msg_debug!(Message::EnvFileLoaded(path.display().to_string())),
            None => msg_debug!(Message::EnvFileNotLoaded),
        }
        msg_debug!(Message::ConfigLoaded);

        match cli.command {
            Commands::Run => run::cmd(&config).await,
            Commands::Balance(args) => balance::cmd(&config, args).await,
            Commands::DayEnd(args) => day_end::cmd(&config, args).await,
            Commands::Details(args) => details::cmd(&config, args).await,
        }
    }
}
