//! # jtl - Jira Time Logger
//!
//! A command-line companion that keeps a stopwatch running while you work
//! and logs the accrued time to Jira issues as worklogs.
//!
//! ## Features
//!
//! - **Stopwatch**: pause, resume, deduct and round the unlogged time
//! - **Time Phrases**: Jira's `1d 2h 30m` notation in both directions
//! - **Totals**: time logged this session and the day's grand total
//! - **Reminders**: a nudge whenever time has gone unlogged for a while
//! - **Jira Worklogs**: log stopwatch or manual time against an issue
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jtl::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
