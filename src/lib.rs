//! # wlb - Work/Life Balance bot
//!
//! A Telegram bot that reads work-time markers from a Google Calendar and
//! answers three questions for its single admin user:
//!
//! - **Weekly balance**: how much the week was over- or underworked
//! - **Day end**: when today's working day is scheduled to end
//! - **Week details**: the calendar entries of interest, grouped by day
//!
//! The same reports are available as one-shot CLI subcommands.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wlb::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod bot;
pub mod commands;
pub mod libs;
