//! Validated Jira issue keys.

use super::error::TrackerError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const ISSUE_KEY_REGEX: &str = "^[A-Za-z]{1,10}-[0-9]+$";

static ISSUE_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(ISSUE_KEY_REGEX).expect("issue key pattern is valid"));

/// An issue key such as `PROJ-123`, always stored uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey(String);

impl IssueKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for IssueKey {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !ISSUE_KEY_PATTERN.is_match(trimmed) {
            return Err(TrackerError::InvalidIssueKey(s.to_string()));
        }
        Ok(Self(trimmed.to_uppercase()))
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
