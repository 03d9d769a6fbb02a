//! Interactive tracking session.
//!
//! Starts the tracker service against the configured Jira instance and reads
//! commands from stdin until `quit` or end of input. Activity log entries and
//! reminders published by the tracker are printed as they happen.

use crate::api::Jira;
use crate::libs::activity_log::{ActivityLog, LogLevel};
use crate::libs::config::Config;
use crate::libs::elapsed::{ElapsedTime, Rounding};
use crate::libs::events::{Dispatcher, TrackerEvent};
use crate::libs::issue::IssueKey;
use crate::libs::messages::{wrap_msg, Message};
use crate::libs::phrase::to_phrase;
use crate::libs::service::{Service, ServiceHandle};
use crate::libs::tracker::{looks_overnight, Tracker, TrackerSettings};
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Skip the Jira connection check on start")]
    offline: bool,
}

/// One line typed at the session prompt.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_subcommand = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum SessionCommand {
    /// Show unlogged, logged and total time
    Status {
        #[arg(short, long, help = "Round the unlogged time: min or hour")]
        round: Option<Rounding>,
    },
    /// Log time against an issue
    Log {
        issue: IssueKey,
        #[arg(short, long, help = "Time to log instead of the timer, e.g. 1h 30m")]
        time: Option<String>,
        #[arg(short, long, default_value = "", help = "Worklog comment")]
        description: String,
    },
    /// Remove time from the timer
    Deduct {
        #[arg(num_args = 1.., required = true)]
        phrase: Vec<String>,
    },
    Pause,
    Resume,
    /// Drop the unlogged time
    Reset,
    /// Drop the logged total
    ResetTotal,
    /// Show the activity log
    Logs {
        #[arg(long)]
        clear: bool,
    },
    Help,
    #[command(alias = "exit")]
    Quit,
}

/// A yes/no question put to the user. The next line typed is the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    ResetLoggedTotal,
}

impl Confirmation {
    /// What to ask after a reset dropped `dropped`. Overnight time means the
    /// logged total is most likely left over from the previous day too.
    pub fn after_reset(dropped: &ElapsedTime) -> Option<Self> {
        looks_overnight(dropped).then_some(Self::ResetLoggedTotal)
    }

    /// Only an explicit yes confirms; anything else, an empty line included,
    /// declines.
    pub fn is_accepted(answer: &str) -> bool {
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

impl SessionLine {
    /// Parses a line, honouring double quotes around arguments with spaces.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(split_words(line))
    }
}

pub async fn cmd(args: RunArgs) -> Result<()> {
    // Tracking is pointless without somewhere to log to
    let config = Config::read()?;
    let Some(jira_config) = config.jira.clone() else {
        msg_bail_anyhow!(Message::JiraNotConfigured);
    };

    // Ask for the password now. Once the session reads stdin, a rejected
    // password can only fail the request.
    let mut jira = Jira::new(&jira_config)?;
    jira.unlock()?;
    let jira = jira.without_prompts();

    let dispatcher = Dispatcher::new();
    let events = dispatcher.subscribe();
    let tracker = Tracker::new(TrackerSettings::from(&config.tracker_or_default()), jira, dispatcher);
    let (service, handle) = Service::new(tracker);

    let repl = async {
        let result = session(&handle, events, args.offline).await;
        handle.shutdown().await;
        result
    };

    // Both run on this task; the service stops once the session has ended
    let (_, result) = tokio::join!(service.run(), repl);
    msg_print!(Message::SessionStopped);
    result
}

async fn session(handle: &ServiceHandle, mut events: broadcast::Receiver<TrackerEvent>, offline: bool) -> Result<()> {
    if !offline {
        handle.test_connection().await?;
    }
    msg_info!(Message::SessionStarted);

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut pending: Option<Confirmation> = None;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if let Some(question) = pending.take() {
                    if Confirmation::is_accepted(&line) {
                        if let Err(err) = confirm(handle, question).await {
                            msg_error!(err);
                        }
                    }
                    continue;
                }
                if line.trim().is_empty() {
                    continue;
                }
                match SessionLine::parse_line(&line) {
                    Ok(SessionLine { command: SessionCommand::Quit }) => break,
                    Ok(SessionLine { command }) => match execute(handle, command).await {
                        Ok(question) => pending = question,
                        Err(err) => msg_error!(err),
                    },
                    Err(err) => {
                        let _ = err.print();
                    }
                }
            }
            event = events.recv() => match event {
                Ok(event) => show_event(event),
                Err(RecvError::Lagged(skipped)) => tracing::warn!(skipped, "session fell behind on tracker events"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}

/// Runs one command. Returns a question when the command needs a follow-up
/// answer from the user.
async fn execute(handle: &ServiceHandle, command: SessionCommand) -> Result<Option<Confirmation>> {
    match command {
        SessionCommand::Status { round } => {
            let status = handle.status(round).await?;
            msg_print!(Message::StatusHeader);
            View::status(&status)?;
            if status.looks_overnight() {
                msg_warning!(Message::OvernightWarning(to_phrase(&status.time)));
            }
        }
        SessionCommand::Log { issue, time, description } => {
            // Success and failure are reported through the activity log
            if let Err(err) = handle.log(issue, time, description).await {
                tracing::debug!(error = %err, "logging time failed");
            }
        }
        SessionCommand::Deduct { phrase } => {
            let phrase = phrase.join(" ");
            let remaining = handle.deduct(&phrase).await?;
            msg_success!(Message::TimeDeducted(phrase, to_phrase(&remaining)));
        }
        SessionCommand::Pause => match handle.pause().await? {
            true => msg_info!(Message::TrackerPaused),
            false => msg_warning!(Message::TrackerAlreadyPaused),
        },
        SessionCommand::Resume => match handle.resume().await? {
            true => msg_info!(Message::TrackerResumed),
            false => msg_warning!(Message::TrackerAlreadyRunning),
        },
        SessionCommand::Reset => {
            let dropped = handle.reset_time().await?;
            if let Some(question) = Confirmation::after_reset(&dropped) {
                msg_warning!(Message::ConfirmLoggedTotalReset(to_phrase(&dropped)));
                return Ok(Some(question));
            }
        }
        SessionCommand::ResetTotal => {
            handle.reset_logged_total().await?;
        }
        SessionCommand::Logs { clear } => {
            if clear {
                handle.clear_activity_logs().await?;
                return Ok(None);
            }
            let logs = handle.activity_logs().await?;
            if logs.is_empty() {
                msg_info!(Message::ActivityLogsEmpty);
            } else {
                msg_print!(Message::ActivityLogsHeader);
                View::activity_logs(&logs)?;
            }
        }
        SessionCommand::Help => msg_print!(wrap_msg(Message::SessionHelp)),
        SessionCommand::Quit => {}
    }
    Ok(None)
}

async fn confirm(handle: &ServiceHandle, question: Confirmation) -> Result<()> {
    match question {
        Confirmation::ResetLoggedTotal => {
            handle.reset_logged_total().await?;
        }
    }
    Ok(())
}

fn show_event(event: TrackerEvent) {
    match event {
        TrackerEvent::ActivityLogAdded(ActivityLog { message, level, .. }) => match level {
            LogLevel::Info => msg_info!(message),
            LogLevel::Warn => msg_warning!(message),
            LogLevel::Error => msg_error!(message),
        },
        TrackerEvent::ReminderDue(message) => msg_warning!(message, true),
        other => tracing::debug!(event = other.name(), "tracker event"),
    }
}

/// Splits a line on whitespace, keeping double-quoted sections together.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            ch if ch.is_whitespace() && !quoted => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            ch => {
                current.push(ch);
                pending = true;
            }
        }
    }
    if pending {
        words.push(current);
    }
    words
}
