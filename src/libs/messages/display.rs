//! Display implementation for jtl application messages.
//!
//! All message text is defined here so wording stays consistent between the
//! terminal, the activity log and error values. Messages that end up in the
//! activity log are plain sentences without emoji; the messaging macros add
//! their own prefixes when printing.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration and stored credentials deleted".to_string(),
            Message::ConfigModuleJira => "Jira settings".to_string(),
            Message::ConfigModuleTracker => "Tracker settings".to_string(),
            Message::JiraNotConfigured => "Jira is not configured yet, run `jtl init` first".to_string(),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure (space to select, enter to confirm)".to_string(),
            Message::PromptJiraLogin => "Enter your Jira login".to_string(),
            Message::PromptJiraUrl => "Enter the Jira URL".to_string(),
            Message::PromptJiraApiPath => "Enter the Jira REST API path".to_string(),
            Message::PromptJiraPassword => "Enter your Jira password".to_string(),
            Message::PromptReminderFrequency => "Remind to log time every N minutes (0 disables)".to_string(),
            Message::PromptMaxLogs => "Number of activity log entries to keep".to_string(),

            // === JIRA MESSAGES ===
            Message::JiraConnected => "Connected to JIRA successfully".to_string(),
            Message::JiraConnectionFailed => "Connection to JIRA failed, please check your settings are correct then try again".to_string(),
            Message::JiraRequestFailed(status) => format!("JIRA request failed with status {}", status),
            Message::WrongPassword(attempts) => format!("Wrong password, gave up after {} attempts", attempts),
            Message::JiraCredentialsRejected => {
                "JIRA rejected the stored password. It has been forgotten, restart the session to enter it again".to_string()
            }

            // === TRACKING MESSAGES ===
            Message::AccruedTimeReset(dropped) => format!("The accrued time has been reset ({} dropped)", dropped),
            Message::LoggedTotalReset(dropped) => format!("The total logged time has been reset ({} dropped)", dropped),
            Message::TimeLogged(phrase, issue, summary) => match summary {
                Some(summary) => format!("{} was successfully logged against {} ({})", phrase, issue, summary),
                None => format!("{} was successfully logged against {}", phrase, issue),
            },
            Message::TimeLogFailed(phrase, issue, reason) => format!("Failed to log {} against {}: {}", phrase, issue, reason),
            Message::NoWorklogReturned => "no work log was returned by JIRA!".to_string(),
            Message::NothingToLog => "Less than a minute has been tracked, there is nothing to log yet".to_string(),
            Message::ReminderDue(phrase) => format!("You've not logged any time for:\n{}", phrase),
            Message::OvernightWarning(phrase) => {
                format!(
                    "{} has accrued without being logged. Was the timer left running overnight? Use `reset` to drop it, then `reset-total` if the logged total is stale too",
                    phrase
                )
            }
            Message::ConfirmLoggedTotalReset(dropped) => format!("{} of unlogged time was dropped. Reset the logged total as well? [y/N]", dropped),
            Message::TimeDeducted(deducted, remaining) => format!("Deducted {}, {} left to log", deducted, remaining),
            Message::TrackerPaused => "Timer paused".to_string(),
            Message::TrackerResumed => "Timer resumed".to_string(),
            Message::TrackerAlreadyPaused => "Timer is already paused".to_string(),
            Message::TrackerAlreadyRunning => "Timer is already running".to_string(),

            // === SESSION MESSAGES ===
            Message::SessionStarted => "Tracking started. Type `help` for the list of commands".to_string(),
            Message::SessionStopped => "Tracking stopped".to_string(),
            Message::SessionHelp => [
                "Commands:",
                "  status [--round min|hour]              Show unlogged, logged and total time",
                "  log <ISSUE> [-t TIME] [-d DESCRIPTION]  Log time against an issue",
                "  deduct <TIME>                          Remove time from the timer",
                "  pause | resume                         Pause or resume the timer",
                "  reset                                  Drop the unlogged time",
                "  reset-total                            Drop the logged total",
                "  logs [--clear]                         Show the activity log",
                "  quit                                   Stop tracking",
            ]
            .join("\n"),
            Message::StatusHeader => "Time tracked today".to_string(),
            Message::ActivityLogsHeader => "Activity".to_string(),
            Message::ActivityLogsEmpty => "No activity yet".to_string(),

            // === CONVERSION MESSAGES ===
            Message::PhraseConverted(phrase, clock, minutes) => format!("{} = {} ({} min)", phrase, clock, minutes),
        };

        write!(f, "{}", text)
    }
}
