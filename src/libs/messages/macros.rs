//! Convenient macros for console messaging and logging.
//!
//! The macros route a [`Message`](crate::libs::messages::Message) either to the
//! `tracing` subscriber (debug mode) or to plain stdout/stderr (normal mode),
//! so the CLI commands print clean output while the bot, started with
//! `WLB_DEBUG` or `RUST_LOG`, produces structured logs.
//!
//! ## Macro Categories
//!
//! - **`msg_print!`**: General message display
//! - **`msg_info!`**: Informational messages with ℹ️ prefix
//! - **`msg_debug!`**: Debug-only messages with 🔍 prefix
//!
//! ```rust
//! use wlb::{msg_debug, msg_info};
//! use wlb::libs::messages::Message;
//!
//! msg_info!(Message::ConfigLoaded);
//! msg_debug!(Message::TokenRefreshed);
//! ```

use crate::libs::config::is_truthy;
use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Checks if debug mode is enabled, caching the answer for the process lifetime.
///
/// Debug mode is on when `WLB_DEBUG` is truthy or `RUST_LOG` is set.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| {
        std::env::var("WLB_DEBUG").map(|v| is_truthy(&v)).unwrap_or(false) || std::env::var("RUST_LOG").is_ok()
    })
}

/// Prints a general message with automatic debug mode routing.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
}

/// Debug-only output; silent outside debug mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}
