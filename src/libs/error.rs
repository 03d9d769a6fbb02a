//! Domain error types for the time tracking core.
//!
//! The core performs no I/O, so every failure here is local and synchronous.
//! Callers in the command layer convert these into `anyhow::Error` with `?`
//! and decide how to present them to the user.
//!
//! Deducting more time than the stopwatch holds is deliberately absent from
//! this list: it clamps to zero and is not a failure.

use thiserror::Error;

/// Errors raised by the duration, phrase and stopwatch components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// A time phrase did not match the accepted `1d 2h 3m` shape.
    #[error("Malformed time phrase '{0}', expected something like '1h 30m'")]
    MalformedPhrase(String),

    /// A value passed to a core operation violates its precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An issue key that does not look like `PROJ-123`.
    #[error("Invalid issue key '{0}', expected something like 'PROJ-123'")]
    InvalidIssueKey(String),

    /// The background service stopped before answering a request.
    #[error("The tracker service is not running")]
    ServiceUnavailable,
}
