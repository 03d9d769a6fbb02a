//! Periodic nudge to log time that has been running unlogged.

use super::elapsed::ElapsedTime;
use super::messages::Message;
use super::phrase::to_phrase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    frequency_minutes: u64,
}

impl Reminder {
    /// A frequency of zero disables reminders.
    pub fn new(frequency_minutes: u64) -> Self {
        Self { frequency_minutes }
    }

    pub fn frequency(&self) -> u64 {
        self.frequency_minutes
    }

    /// True when the elapsed whole minutes are a non-zero multiple of the frequency.
    pub fn is_required(&self, elapsed: &ElapsedTime) -> bool {
        let minutes = elapsed.to_whole_minutes();
        if self.frequency_minutes == 0 || minutes == 0 {
            return false;
        }
        minutes % self.frequency_minutes == 0
    }

    pub fn message(&self, elapsed: &ElapsedTime) -> String {
        Message::ReminderDue(to_phrase(elapsed)).to_string()
    }
}
