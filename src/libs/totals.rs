//! Running totals of logged and unlogged time.
//!
//! The *logged total* is the time already submitted to Jira in the current
//! session. It only grows through [`Totals::add_to_logged_total`] or drops
//! back to zero through [`Totals::reset_logged_total`]; the stopwatch never
//! touches it.
//!
//! The *grand total* is the logged total plus whatever the stopwatch
//! currently holds. It is computed on demand and never stored.
//!
//! Totals are tracked at minute resolution: seconds of the added time and of
//! the stopwatch are ignored, matching the phrase format that is sent to
//! Jira.
//!
//! ## Sharing
//!
//! `Totals` is a cheap handle. Clones share the same logged total so a
//! stopwatch listener can compute grand totals while the tracker remains the
//! single writer.

use super::elapsed::ElapsedTime;
use super::events::Dispatcher;
use super::phrase::to_phrase;
use super::stopwatch::Stopwatch;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Totals {
    logged: Arc<Mutex<ElapsedTime>>,
    dispatcher: Dispatcher,
}

impl Totals {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            logged: Arc::new(Mutex::new(ElapsedTime::zero())),
            dispatcher,
        }
    }

    pub fn logged_total(&self) -> ElapsedTime {
        *self.logged.lock()
    }

    pub fn logged_total_as_string(&self) -> String {
        to_phrase(&self.logged_total())
    }

    /// Adds the hours and minutes of `time` to the logged total, carrying
    /// minutes into hours, and publishes the new total.
    pub fn add_to_logged_total(&self, time: &ElapsedTime) -> ElapsedTime {
        let total = {
            let mut logged = self.logged.lock();
            *logged = ElapsedTime::new(logged.hours() + time.hours(), logged.minutes() + time.minutes(), 0);
            *logged
        };
        tracing::debug!(added = %time, total = %total, "logged total increased");
        self.dispatcher.logged_total_changed(to_phrase(&total));
        total
    }

    /// Zeroes the logged total and publishes the change.
    ///
    /// When `notify_user` is set and at least a minute was dropped, returns
    /// the dropped amount as a phrase for the caller to report.
    pub fn reset_logged_total(&self, notify_user: bool) -> Option<String> {
        let previous = std::mem::take(&mut *self.logged.lock());
        tracing::debug!(dropped = %previous, "logged total reset");
        self.dispatcher.logged_total_changed(to_phrase(&ElapsedTime::zero()));

        if notify_user && previous.to_whole_minutes() > 0 {
            return Some(to_phrase(&previous));
        }
        None
    }

    /// Logged total plus `unlogged`, at minute resolution.
    pub fn grand_total(&self, unlogged: &ElapsedTime) -> ElapsedTime {
        let logged = self.logged_total();
        ElapsedTime::new(logged.hours() + unlogged.hours(), logged.minutes() + unlogged.minutes(), 0)
    }

    /// Logged total plus the stopwatch's current elapsed time.
    pub fn grand_total_of(&self, stopwatch: &Stopwatch) -> ElapsedTime {
        self.grand_total(&stopwatch.time(None))
    }

    pub fn grand_total_as_string(&self, stopwatch: &Stopwatch) -> String {
        to_phrase(&self.grand_total_of(stopwatch))
    }
}
