//! The chat bot: command parsing, per-process session, report handlers and
//! the Telegram polling loop.

pub mod command;
pub mod dispatcher;
pub mod handlers;
pub mod reply;
pub mod runner;
pub mod session;

pub use command::BotCommand;
pub use dispatcher::Dispatcher;
pub use handlers::ReportSettings;
pub use reply::{Keyboard, Reply};
pub use session::Session;
