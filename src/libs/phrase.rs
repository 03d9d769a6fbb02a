//! Conversion between [`ElapsedTime`] and Jira's compact time phrase.
//!
//! Jira accepts durations such as `2d 3h 4m`. This module renders the
//! phrase sent with a worklog and parses phrases typed by the user.
//!
//! ## Output format
//!
//! `^(\d+h )?\d+m$`. The hour segment is omitted when there are no whole
//! hours, the minute segment is always present, and seconds are never
//! rendered because Jira has no seconds unit.
//!
//! ## Input format
//!
//! `^([0-9]+[dD] ?)?([0-9]+[hH] ?)?([0-9]+[mM])?$`, segments in that fixed
//! order. A day counts as 24 hours. Surrounding whitespace is ignored and an
//! empty phrase is rejected.
//!
//! ## Examples
//!
//! ```rust
//! use jtl::libs::elapsed::ElapsedTime;
//! use jtl::libs::phrase::{from_phrase, to_phrase};
//!
//! assert_eq!(to_phrase(&ElapsedTime::new(1, 2, 45)), "1h 2m");
//! assert_eq!(from_phrase("1d 2h 3m").unwrap(), ElapsedTime::new(26, 3, 0));
//! assert!(from_phrase("an hour").is_err());
//! ```

use super::elapsed::ElapsedTime;
use super::error::TrackerError;
use regex::Regex;
use std::sync::LazyLock;

/// Pattern accepted for user-entered time phrases.
pub const TIME_REGEX: &str = "^([0-9]+[dD] ?)?([0-9]+[hH] ?)?([0-9]+[mM])?$";

const HOURS_IN_DAY: u64 = 24;
const SEC_IN_HOUR: u64 = 3600;
const SEC_IN_MIN: u64 = 60;

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(TIME_REGEX).expect("time phrase pattern is valid"));

/// Renders a time as a Jira phrase, e.g. `"1h 2m"` or `"5m"`.
pub fn to_phrase(time: &ElapsedTime) -> String {
    if time.hours() > 0 {
        format!("{}h {}m", time.hours(), time.minutes())
    } else {
        format!("{}m", time.minutes())
    }
}

/// Parses a Jira phrase into a normalized [`ElapsedTime`].
///
/// Minutes of 60 or more are carried into hours, so `"90m"` parses as
/// `1h 30m`.
///
/// # Errors
///
/// Returns [`TrackerError::MalformedPhrase`] when the phrase is empty, does
/// not match [`TIME_REGEX`], or holds a number too large to represent.
pub fn from_phrase(phrase: &str) -> Result<ElapsedTime, TrackerError> {
    let trimmed = phrase.trim();
    let malformed = || TrackerError::MalformedPhrase(phrase.to_string());

    if trimmed.is_empty() {
        return Err(malformed());
    }
    let captures = TIME_PATTERN.captures(trimmed).ok_or_else(|| {
        tracing::warn!(phrase, "rejected time phrase");
        malformed()
    })?;

    let segment = |index: usize| -> Result<u64, TrackerError> {
        match captures.get(index) {
            Some(group) => group
                .as_str()
                .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == ' ')
                .parse::<u64>()
                .map_err(|_| malformed()),
            None => Ok(0),
        }
    };

    let days = segment(1)?;
    let hours = segment(2)?;
    let minutes = segment(3)?;

    // Every segment must fit once summed as seconds
    let total = days
        .checked_mul(HOURS_IN_DAY)
        .and_then(|h| h.checked_add(hours))
        .and_then(|h| h.checked_mul(SEC_IN_HOUR))
        .and_then(|s| minutes.checked_mul(SEC_IN_MIN).and_then(|m| s.checked_add(m)))
        .ok_or_else(|| {
            tracing::warn!(phrase, "time phrase out of range");
            malformed()
        })?;
    Ok(ElapsedTime::from_seconds(total))
}

/// Returns `true` if `phrase` would be accepted by [`from_phrase`].
pub fn is_valid_phrase(phrase: &str) -> bool {
    from_phrase(phrase).is_ok()
}
