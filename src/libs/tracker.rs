//! Orchestration of the stopwatch, totals and issue tracker.
//!
//! [`Tracker`] is the one writer of all tracking state. It owns the
//! [`Stopwatch`], holds the [`Totals`] handle, keeps the activity log and
//! forwards every user-visible change to the [`Dispatcher`]. All of its
//! dependencies are passed in at construction; there is no global instance.
//!
//! ## Event flow
//!
//! ```text
//!  Stopwatch tick ──▶ minute listener ──▶ time-changed
//!                                    ├──▶ day-grand-total-changed
//!                                    └──▶ reminder (when due)
//!
//!  log_time ──▶ IssueTracker ──▶ Totals ──▶ logged-total-changed
//!                                      └──▶ time-logged
//! ```
//!
//! ## Logging time
//!
//! [`Tracker::submit`] mirrors what a user does at the end of a piece of
//! work: log either a manually entered phrase (which is then deducted from
//! the stopwatch) or the stopwatch's own time rounded to the minute (after
//! which the stopwatch starts over).

use super::activity_log::{ActivityLog, ActivityLogs};
use super::config::TrackerConfig;
use super::elapsed::{ElapsedTime, Rounding};
use super::error::TrackerError;
use super::events::Dispatcher;
use super::issue::IssueKey;
use super::messages::Message;
use super::phrase::{from_phrase, to_phrase};
use super::reminder::Reminder;
use super::stopwatch::{ListenerId, Stopwatch};
use super::totals::Totals;
use crate::api::IssueTracker;
use crate::msg_error_anyhow;
use anyhow::Result;

/// Hours of unlogged time after which the timer has probably been running
/// overnight.
pub const TIME_HOUR_LIMIT: u64 = 10;

/// Whether `time` looks like a timer left running overnight.
pub fn looks_overnight(time: &ElapsedTime) -> bool {
    time.hours() >= TIME_HOUR_LIMIT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSettings {
    pub reminder_frequency: u64,
    pub max_logs: usize,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self::from(&TrackerConfig::default())
    }
}

impl From<&TrackerConfig> for TrackerSettings {
    fn from(config: &TrackerConfig) -> Self {
        Self {
            reminder_frequency: config.reminder_frequency,
            max_logs: config.max_logs,
        }
    }
}

pub struct Tracker<T> {
    issue_tracker: T,
    stopwatch: Stopwatch,
    totals: Totals,
    dispatcher: Dispatcher,
    reminder: Reminder,
    activity_logs: ActivityLogs,
    time_listener: Option<ListenerId>,
}

impl<T: IssueTracker> Tracker<T> {
    pub fn new(settings: TrackerSettings, issue_tracker: T, dispatcher: Dispatcher) -> Self {
        Self {
            issue_tracker,
            stopwatch: Stopwatch::new(),
            totals: Totals::new(dispatcher.clone()),
            dispatcher,
            reminder: Reminder::new(settings.reminder_frequency),
            activity_logs: ActivityLogs::new(settings.max_logs),
            time_listener: None,
        }
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    /// Mutable access for the event loop that drives the ticks.
    pub fn stopwatch_mut(&mut self) -> &mut Stopwatch {
        &mut self.stopwatch
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn activity_logs(&self) -> &ActivityLogs {
        &self.activity_logs
    }

    pub fn issue_tracker(&self) -> &T {
        &self.issue_tracker
    }

    /// Begins a tracking session: zero totals, subscribe to minute changes
    /// and start the stopwatch from zero.
    pub fn start(&mut self) {
        self.reset_logged_total(false);

        if let Some(id) = self.time_listener.take() {
            self.stopwatch.remove_listener(id);
        }
        let dispatcher = self.dispatcher.clone();
        let totals = self.totals.clone();
        let reminder = self.reminder;
        let id = self.stopwatch.add_min_listener(move |time| {
            dispatcher.time_changed(to_phrase(&time));
            dispatcher.day_grand_total_changed(to_phrase(&totals.grand_total(&time)));
            if reminder.is_required(&time) {
                dispatcher.reminder_due(reminder.message(&time));
            }
        });
        self.time_listener = Some(id);

        self.reset_time(false);
    }

    /// Publishes the current unlogged time and the grand total.
    pub fn update_time(&self) {
        self.dispatcher.time_changed(to_phrase(&self.stopwatch.time(None)));
        self.update_day_grand_total();
    }

    pub fn update_day_grand_total(&self) {
        self.dispatcher.day_grand_total_changed(self.day_grand_total_as_string());
    }

    /// Restarts the stopwatch from zero and returns the time that was dropped.
    ///
    /// With `log` set, a non-trivial drop is recorded in the activity log.
    pub fn reset_time(&mut self, log: bool) -> ElapsedTime {
        let dropped = self.stopwatch.time(None);
        self.stopwatch.restart();
        self.update_time();
        if log && dropped.to_whole_minutes() > 0 {
            self.notify_user(Message::AccruedTimeReset(to_phrase(&dropped)).to_string());
        }
        dropped
    }

    pub fn pause(&mut self) {
        self.stopwatch.stop(false);
    }

    pub fn resume(&mut self) {
        self.stopwatch.start();
        self.update_time();
    }

    /// Removes the time described by `phrase` from the stopwatch.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::MalformedPhrase`] and leaves the stopwatch
    /// untouched if the phrase cannot be parsed.
    pub fn deduct_time(&mut self, phrase: &str) -> Result<ElapsedTime, TrackerError> {
        let time = from_phrase(phrase)?;
        self.stopwatch.deduct_time(&time);
        self.update_time();
        Ok(self.stopwatch.time(None))
    }

    pub fn time_auto(&self, round: Option<Rounding>) -> ElapsedTime {
        self.stopwatch.time(round)
    }

    pub fn time_auto_as_string(&self, round: Option<Rounding>) -> String {
        to_phrase(&self.time_auto(round))
    }

    pub fn logged_total(&self) -> ElapsedTime {
        self.totals.logged_total()
    }

    pub fn logged_total_as_string(&self) -> String {
        self.totals.logged_total_as_string()
    }

    pub fn add_to_logged_total(&mut self, time: &ElapsedTime) {
        self.totals.add_to_logged_total(time);
        self.update_day_grand_total();
    }

    /// Zeroes the logged total, recording the dropped amount when `log` is set.
    pub fn reset_logged_total(&mut self, log: bool) {
        let dropped = self.totals.reset_logged_total(log);
        self.update_day_grand_total();
        if let Some(dropped) = dropped {
            self.notify_user(Message::LoggedTotalReset(dropped).to_string());
        }
    }

    pub fn day_grand_total(&self) -> ElapsedTime {
        self.totals.grand_total_of(&self.stopwatch)
    }

    pub fn day_grand_total_as_string(&self) -> String {
        self.totals.grand_total_as_string(&self.stopwatch)
    }

    /// Records an error entry.
    pub fn alert_user(&mut self, message: String) {
        self.add_activity_log(ActivityLog::error(message));
    }

    /// Records a warning entry.
    pub fn warn_user(&mut self, message: String) {
        self.add_activity_log(ActivityLog::warn(message));
    }

    /// Records an informational entry.
    pub fn notify_user(&mut self, message: String) {
        self.add_activity_log(ActivityLog::info(message));
    }

    pub fn add_activity_log(&mut self, log: ActivityLog) {
        self.dispatcher.activity_log_added(log.clone());
        if let Some(oldest) = self.activity_logs.push(log) {
            self.dispatcher.activity_log_removed(oldest);
        }
    }

    pub fn clear_activity_logs(&mut self) {
        for log in self.activity_logs.clear() {
            self.dispatcher.activity_log_removed(log);
        }
    }

    /// Checks the issue tracker connection and records the outcome.
    pub async fn test_connection(&mut self) -> bool {
        match self.issue_tracker.test_connection().await {
            Ok(true) => {
                self.notify_user(Message::JiraConnected.to_string());
                true
            }
            Ok(false) => {
                self.alert_user(Message::JiraConnectionFailed.to_string());
                false
            }
            Err(err) => {
                tracing::error!(error = %err, "Jira connection test failed");
                self.alert_user(Message::JiraConnectionFailed.to_string());
                false
            }
        }
    }

    /// Logs `phrase` against `issue` and adds it to the logged total.
    ///
    /// The phrase is validated before anything is sent and is submitted in
    /// its canonical `Xh Ym` form, so Jira and the logged total always agree.
    ///
    /// # Returns
    ///
    /// The identifier of the created worklog.
    ///
    /// # Errors
    ///
    /// Returns an error if the phrase is malformed, the request fails, or no
    /// worklog was returned. Failures are also recorded in the activity log.
    pub async fn log_time(&mut self, phrase: &str, issue: &IssueKey, description: &str, additional: Option<&str>) -> Result<String> {
        let time = from_phrase(phrase)?;
        let phrase = to_phrase(&time);

        let worklog_id = match self.issue_tracker.log_time(issue, &phrase, description).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                let reason = Message::NoWorklogReturned.to_string();
                self.alert_user(Message::TimeLogFailed(phrase.clone(), issue.to_string(), reason.clone()).to_string());
                return Err(msg_error_anyhow!(Message::TimeLogFailed(phrase, issue.to_string(), reason)));
            }
            Err(err) => {
                let reason = err.to_string();
                self.alert_user(Message::TimeLogFailed(phrase.clone(), issue.to_string(), reason.clone()).to_string());
                return Err(err.context(Message::TimeLogFailed(phrase, issue.to_string(), reason).to_string()));
            }
        };

        self.notify_user(Message::TimeLogged(phrase.clone(), issue.to_string(), additional.map(str::to_string)).to_string());
        self.add_to_logged_total(&time);
        self.dispatcher.time_logged(phrase);
        tracing::debug!(issue = %issue, worklog_id = %worklog_id, "time logged");

        Ok(worklog_id)
    }

    /// Logs manual or stopwatch time against `issue`, then settles the
    /// stopwatch: manual time is deducted, stopwatch time is reset.
    pub async fn submit(&mut self, issue: &IssueKey, manual: Option<&str>, description: &str) -> Result<String> {
        let summary = match self.issue_tracker.issue_summary(issue).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(issue = %issue, error = %err, "could not fetch issue summary");
                None
            }
        };

        match manual {
            Some(phrase) => {
                // Validate before contacting Jira so a typo never reaches it.
                if let Err(err) = from_phrase(phrase) {
                    self.alert_user(err.to_string());
                    return Err(err.into());
                }
                let worklog_id = self.log_time(phrase, issue, description, summary.as_deref()).await?;
                self.deduct_time(phrase)?;
                Ok(worklog_id)
            }
            None => {
                let time = self.time_auto(Some(Rounding::Minute));
                if time.to_whole_minutes() == 0 {
                    self.warn_user(Message::NothingToLog.to_string());
                    return Err(msg_error_anyhow!(Message::NothingToLog));
                }
                let worklog_id = self.log_time(&to_phrase(&time), issue, description, summary.as_deref()).await?;
                self.reset_time(false);
                Ok(worklog_id)
            }
        }
    }
}
