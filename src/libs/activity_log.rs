//! Bounded log of user-facing activity (successes, warnings, failures).

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(level)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityLog {
    pub message: String,
    pub level: LogLevel,
    pub logged_at: DateTime<Local>,
}

impl ActivityLog {
    pub fn new(message: impl Into<String>, level: LogLevel) -> Self {
        Self {
            message: message.into(),
            level,
            logged_at: Local::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, LogLevel::Info)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(message, LogLevel::Warn)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, LogLevel::Error)
    }
}

/// FIFO of the most recent entries, oldest first.
#[derive(Debug, Clone)]
pub struct ActivityLogs {
    max_logs: usize,
    entries: VecDeque<ActivityLog>,
}

impl ActivityLogs {
    pub fn new(max_logs: usize) -> Self {
        Self {
            max_logs,
            entries: VecDeque::new(),
        }
    }

    /// Appends an entry and returns the one evicted to stay within the limit.
    pub fn push(&mut self, log: ActivityLog) -> Option<ActivityLog> {
        self.entries.push_back(log);
        if self.entries.len() > self.max_logs {
            return self.entries.pop_front();
        }
        None
    }

    /// Removes every entry, newest first.
    pub fn clear(&mut self) -> Vec<ActivityLog> {
        let mut removed: Vec<ActivityLog> = self.entries.drain(..).collect();
        removed.reverse();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityLog> {
        self.entries.iter()
    }

    pub fn max_logs(&self) -> usize {
        self.max_logs
    }
}
