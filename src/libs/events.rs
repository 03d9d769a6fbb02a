//! Named change notifications broadcast to every interested surface.
//!
//! The tracker core never talks to a terminal or a network directly; it
//! publishes [`TrackerEvent`]s on a [`Dispatcher`] and whoever is listening
//! (the REPL, a test) decides what to do with them. Each event carries a
//! stable kebab-case name and, for time changes, the Jira phrase.
//!
//! Publishing with no subscribers is not an error; the event is dropped.

use super::activity_log::ActivityLog;
use serde::Serialize;
use tokio::sync::broadcast;

/// Buffered events per subscriber before the slowest one starts lagging.
pub const EVENT_CAPACITY: usize = 256;

pub const EVENT_TIME_CHANGED: &str = "time-changed";
pub const EVENT_LOGGED_TOTAL_CHANGED: &str = "logged-total-changed";
pub const EVENT_DAY_GRAND_TOTAL_CHANGED: &str = "day-grand-total-changed";
pub const EVENT_TIME_LOGGED: &str = "time-logged";
pub const EVENT_ACTIVITY_LOG_ADDED: &str = "activity-log-added";
pub const EVENT_ACTIVITY_LOG_REMOVED: &str = "activity-log-removed";
pub const EVENT_REMINDER: &str = "reminder";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum TrackerEvent {
    /// Unlogged elapsed time changed.
    TimeChanged(String),
    LoggedTotalChanged(String),
    DayGrandTotalChanged(String),
    /// A worklog was accepted by Jira.
    TimeLogged(String),
    ActivityLogAdded(ActivityLog),
    ActivityLogRemoved(ActivityLog),
    /// Time has been running unlogged for a multiple of the reminder frequency.
    ReminderDue(String),
}

impl TrackerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TrackerEvent::TimeChanged(_) => EVENT_TIME_CHANGED,
            TrackerEvent::LoggedTotalChanged(_) => EVENT_LOGGED_TOTAL_CHANGED,
            TrackerEvent::DayGrandTotalChanged(_) => EVENT_DAY_GRAND_TOTAL_CHANGED,
            TrackerEvent::TimeLogged(_) => EVENT_TIME_LOGGED,
            TrackerEvent::ActivityLogAdded(_) => EVENT_ACTIVITY_LOG_ADDED,
            TrackerEvent::ActivityLogRemoved(_) => EVENT_ACTIVITY_LOG_REMOVED,
            TrackerEvent::ReminderDue(_) => EVENT_REMINDER,
        }
    }
}

/// Cheaply cloneable publisher side of the event bus.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    sender: broadcast::Sender<TrackerEvent>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.sender.subscribe()
    }

    pub fn dispatch(&self, event: TrackerEvent) {
        tracing::trace!(event = event.name(), "dispatching");
        // No receivers is fine, the event simply has no audience.
        let _ = self.sender.send(event);
    }

    pub fn time_changed(&self, phrase: String) {
        self.dispatch(TrackerEvent::TimeChanged(phrase));
    }

    pub fn logged_total_changed(&self, phrase: String) {
        self.dispatch(TrackerEvent::LoggedTotalChanged(phrase));
    }

    pub fn day_grand_total_changed(&self, phrase: String) {
        self.dispatch(TrackerEvent::DayGrandTotalChanged(phrase));
    }

    pub fn time_logged(&self, phrase: String) {
        self.dispatch(TrackerEvent::TimeLogged(phrase));
    }

    pub fn activity_log_added(&self, log: ActivityLog) {
        self.dispatch(TrackerEvent::ActivityLogAdded(log));
    }

    pub fn activity_log_removed(&self, log: ActivityLog) {
        self.dispatch(TrackerEvent::ActivityLogRemoved(log));
    }

    pub fn reminder_due(&self, message: String) {
        self.dispatch(TrackerEvent::ReminderDue(message));
    }
}
