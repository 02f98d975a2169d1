//! Core library modules for wlb.
//!
//! - **Domain**: calendar events, time windows, balance, day end, week details
//! - **Infrastructure**: configuration, logging, build metadata
//! - **Output**: message catalogue and duration/time formatting
//!
//! ```rust
//! use chrono::{DateTime, Duration};
//! use wlb::libs::balance::get_balance;
//! use wlb::libs::event::{Event, Labels};
//!
//! let start = DateTime::parse_from_rfc3339("2024-03-04T17:00:00+00:00").unwrap();
//! let events = [Event::new("overwork", start, start + Duration::hours(1))];
//! let balance = get_balance(&events, &Labels::default());
//! assert_eq!(balance.overwork, Duration::hours(1));
//! ```

pub mod balance;
pub mod config;
pub mod event;
pub mod formatter;
pub mod logging;
pub mod messages;
pub mod metadata;
pub mod period;
pub mod report;
pub mod workday;
