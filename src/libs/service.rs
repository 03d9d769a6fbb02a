//! Event loop that owns the [`Tracker`] for the lifetime of a session.
//!
//! The tracker is never shared. The service task holds it and multiplexes
//! two sources in a single `select!` loop: commands arriving from
//! [`ServiceHandle`]s and ticks from the stopwatch. Because both are
//! handled on the same task, a tick can never interleave with a command and
//! stopping the stopwatch takes effect before the next loop iteration.
//!
//! ```text
//!  ServiceHandle ──mpsc──▶ ┌──────────────┐ ──broadcast──▶ subscribers
//!  ServiceHandle ──mpsc──▶ │   Service    │
//!            stopwatch ──▶ │  (Tracker)   │
//!                          └──────────────┘
//! ```
//!
//! Each command carries a oneshot reply channel. A handle whose service has
//! shut down answers every request with [`TrackerError::ServiceUnavailable`].

use super::activity_log::ActivityLog;
use super::elapsed::{ElapsedTime, Rounding};
use super::error::TrackerError;
use super::issue::IssueKey;
use super::tracker::{looks_overnight, Tracker};
use crate::api::IssueTracker;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

/// Pending commands buffered before senders have to wait.
const COMMAND_CAPACITY: usize = 32;

/// Snapshot of the tracker taken by [`ServiceHandle::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    pub running: bool,
    /// Unlogged stopwatch time, rounded if requested.
    pub time: ElapsedTime,
    pub logged_total: ElapsedTime,
    pub grand_total: ElapsedTime,
}

impl Status {
    pub fn looks_overnight(&self) -> bool {
        looks_overnight(&self.time)
    }
}

#[derive(Debug)]
enum Command {
    Status {
        round: Option<Rounding>,
        reply: oneshot::Sender<Status>,
    },
    Pause {
        reply: oneshot::Sender<bool>,
    },
    Resume {
        reply: oneshot::Sender<bool>,
    },
    ResetTime {
        reply: oneshot::Sender<ElapsedTime>,
    },
    ResetLoggedTotal {
        reply: oneshot::Sender<ElapsedTime>,
    },
    Deduct {
        phrase: String,
        reply: oneshot::Sender<Result<ElapsedTime, TrackerError>>,
    },
    Log {
        issue: IssueKey,
        time: Option<String>,
        description: String,
        reply: oneshot::Sender<anyhow::Result<String>>,
    },
    TestConnection {
        reply: oneshot::Sender<bool>,
    },
    ActivityLogs {
        reply: oneshot::Sender<Vec<ActivityLog>>,
    },
    ClearActivityLogs {
        reply: oneshot::Sender<usize>,
    },
    Shutdown,
}

pub struct Service<T> {
    tracker: Tracker<T>,
    commands: mpsc::Receiver<Command>,
}

impl<T: IssueTracker> Service<T> {
    /// Wraps `tracker` in a service and returns it with its first handle.
    pub fn new(tracker: Tracker<T>) -> (Self, ServiceHandle) {
        let (sender, commands) = mpsc::channel(COMMAND_CAPACITY);
        (Self { tracker, commands }, ServiceHandle { commands: sender })
    }

    /// Starts tracking and serves commands until a shutdown is requested or
    /// every handle is dropped.
    ///
    /// # Returns
    ///
    /// The tracker, stopped, so callers can inspect the final state.
    pub async fn run(mut self) -> Tracker<T> {
        self.tracker.start();
        tracing::info!("tracker service started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle(command).await,
                },
                _ = self.tracker.stopwatch_mut().next_tick() => {}
            }
        }

        self.tracker.pause();
        tracing::info!(unlogged = %self.tracker.time_auto(None), "tracker service stopped");
        self.tracker
    }

    async fn handle(&mut self, command: Command) {
        let tracker = &mut self.tracker;
        // A dropped reply receiver only means the caller stopped waiting.
        match command {
            Command::Status { round, reply } => {
                let _ = reply.send(Status {
                    running: tracker.stopwatch().is_running(),
                    time: tracker.time_auto(round),
                    logged_total: tracker.logged_total(),
                    grand_total: tracker.day_grand_total(),
                });
            }
            Command::Pause { reply } => {
                let was_running = tracker.stopwatch().is_running();
                tracker.pause();
                let _ = reply.send(was_running);
            }
            Command::Resume { reply } => {
                let was_stopped = !tracker.stopwatch().is_running();
                tracker.resume();
                let _ = reply.send(was_stopped);
            }
            Command::ResetTime { reply } => {
                let _ = reply.send(tracker.reset_time(true));
            }
            Command::ResetLoggedTotal { reply } => {
                let dropped = tracker.logged_total();
                tracker.reset_logged_total(true);
                let _ = reply.send(dropped);
            }
            Command::Deduct { phrase, reply } => {
                let _ = reply.send(tracker.deduct_time(&phrase));
            }
            Command::Log {
                issue,
                time,
                description,
                reply,
            } => {
                let result = tracker.submit(&issue, time.as_deref(), &description).await;
                let _ = reply.send(result);
            }
            Command::TestConnection { reply } => {
                let _ = reply.send(tracker.test_connection().await);
            }
            Command::ActivityLogs { reply } => {
                let _ = reply.send(tracker.activity_logs().iter().cloned().collect());
            }
            Command::ClearActivityLogs { reply } => {
                let count = tracker.activity_logs().len();
                tracker.clear_activity_logs();
                let _ = reply.send(count);
            }
            Command::Shutdown => {}
        }
    }
}

/// Cloneable client side of a running [`Service`].
#[derive(Debug, Clone)]
pub struct ServiceHandle {
    commands: mpsc::Sender<Command>,
}

impl ServiceHandle {
    async fn request<R>(&self, build: impl FnOnce(oneshot::Sender<R>) -> Command) -> Result<R, TrackerError> {
        let (reply, response) = oneshot::channel();
        self.commands.send(build(reply)).await.map_err(|_| TrackerError::ServiceUnavailable)?;
        response.await.map_err(|_| TrackerError::ServiceUnavailable)
    }

    pub async fn status(&self, round: Option<Rounding>) -> Result<Status, TrackerError> {
        self.request(|reply| Command::Status { round, reply }).await
    }

    /// Pauses the stopwatch. Returns `false` if it was already paused.
    pub async fn pause(&self) -> Result<bool, TrackerError> {
        self.request(|reply| Command::Pause { reply }).await
    }

    /// Resumes the stopwatch. Returns `false` if it was already running.
    pub async fn resume(&self) -> Result<bool, TrackerError> {
        self.request(|reply| Command::Resume { reply }).await
    }

    /// Drops the unlogged time and returns how much was dropped.
    pub async fn reset_time(&self) -> Result<ElapsedTime, TrackerError> {
        self.request(|reply| Command::ResetTime { reply }).await
    }

    /// Drops the logged total and returns how much was dropped.
    pub async fn reset_logged_total(&self) -> Result<ElapsedTime, TrackerError> {
        self.request(|reply| Command::ResetLoggedTotal { reply }).await
    }

    /// Deducts a time phrase and returns the remaining unlogged time.
    pub async fn deduct(&self, phrase: &str) -> Result<ElapsedTime, TrackerError> {
        let phrase = phrase.to_string();
        self.request(|reply| Command::Deduct { phrase, reply }).await?
    }

    /// Logs time against `issue`: the given phrase, or the stopwatch time
    /// when `time` is `None`. Returns the worklog id.
    pub async fn log(&self, issue: IssueKey, time: Option<String>, description: String) -> anyhow::Result<String> {
        self.request(|reply| Command::Log {
            issue,
            time,
            description,
            reply,
        })
        .await?
    }

    pub async fn test_connection(&self) -> Result<bool, TrackerError> {
        self.request(|reply| Command::TestConnection { reply }).await
    }

    /// Activity log entries, oldest first.
    pub async fn activity_logs(&self) -> Result<Vec<ActivityLog>, TrackerError> {
        self.request(|reply| Command::ActivityLogs { reply }).await
    }

    /// Clears the activity log and returns how many entries were removed.
    pub async fn clear_activity_logs(&self) -> Result<usize, TrackerError> {
        self.request(|reply| Command::ClearActivityLogs { reply }).await
    }

    /// Asks the service to stop. Stopping an already stopped service is fine.
    pub async fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown).await;
    }
}
