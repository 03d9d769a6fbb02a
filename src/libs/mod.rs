//! Core library modules for the jtl application.
//!
//! ## Features
//!
//! - **Time Values**: normalized elapsed time, Jira phrases, clock formatting
//! - **Tracking**: tick-driven stopwatch, logged and grand totals, reminders
//! - **Orchestration**: the tracker, its event bus and the service loop
//! - **Infrastructure**: configuration, data storage, secrets, messaging
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jtl::libs::phrase::from_phrase;
//! use jtl::libs::stopwatch::Stopwatch;
//!
//! let mut stopwatch = Stopwatch::new();
//! stopwatch.add_min_listener(|time| println!("{} elapsed", time));
//! stopwatch.start();
//! stopwatch.deduct_time(&from_phrase("5m")?);
//! # Ok::<(), jtl::libs::error::TrackerError>(())
//! ```

pub mod activity_log;
pub mod config;
pub mod data_storage;
pub mod elapsed;
pub mod error;
pub mod events;
pub mod formatter;
pub mod issue;
pub mod messages;
pub mod phrase;
pub mod reminder;
pub mod secret;
pub mod service;
pub mod stopwatch;
pub mod ticker;
pub mod totals;
pub mod tracker;
pub mod view;
