//! Clients for external issue trackers.
//!
//! The tracker core only needs three capabilities from an issue tracker:
//! checking the connection, looking up an issue's summary, and logging a
//! time phrase against an issue. [`IssueTracker`] captures exactly that so
//! the orchestrator can be exercised against an in-memory fake.

use crate::libs::issue::IssueKey;
use anyhow::Result;

pub mod jira;

pub use jira::{Jira, JiraConfig};

#[allow(async_fn_in_trait)]
pub trait IssueTracker {
    /// Checks that the configured instance is reachable with the stored
    /// credentials.
    async fn test_connection(&mut self) -> Result<bool>;

    /// Returns the summary line of `issue`, or `None` if it cannot be read.
    async fn issue_summary(&mut self, issue: &IssueKey) -> Result<Option<String>>;

    /// Logs `time` (a Jira phrase such as `1h 30m`) against `issue`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(id))` - the identifier of the created worklog
    /// * `Ok(None)` - the request went through but no worklog was returned
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Jira rejects it.
    async fn log_time(&mut self, issue: &IssueKey, time: &str, description: &str) -> Result<Option<String>>;
}
