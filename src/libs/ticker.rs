//! Recurring tick source backed by `tokio::time::Interval`.
//!
//! A [`Ticker`] is either armed or disarmed. Arming records the instant the
//! ticks are measured from; the first tick fires one period later. The
//! interval itself is created lazily on first poll so that a stopwatch can be
//! started outside of a runtime (in synchronous tests, for instance).
//!
//! Disarming drops the interval. Any tick that was already due is discarded
//! with it, so nothing fires after [`Ticker::disarm`] returns.
//!
//! Missed ticks are delivered in a burst, which keeps the accumulated time
//! honest when the owning task was busy for a few seconds.

use std::future::poll_fn;
use std::task::{Context, Poll};
use tokio::time::{self, Duration, Instant, Interval, MissedTickBehavior};

/// Period of the stopwatch tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    armed_at: Option<Instant>,
    interval: Option<Interval>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed_at: None,
            interval: None,
        }
    }

    /// Arms the ticker. Returns `false` if it was already armed.
    pub fn arm(&mut self) -> bool {
        if self.armed_at.is_some() {
            return false;
        }
        self.armed_at = Some(Instant::now());
        true
    }

    /// Disarms the ticker and drops the underlying interval.
    ///
    /// Returns `false` if it was not armed.
    pub fn disarm(&mut self) -> bool {
        self.interval = None;
        self.armed_at.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Polls for the next tick. A disarmed ticker is always pending.
    pub fn poll_tick(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        let Some(armed_at) = self.armed_at else {
            return Poll::Pending;
        };
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = time::interval_at(armed_at + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            interval
        });
        interval.poll_tick(cx).map(|_| ())
    }

    /// Waits for the next tick. Never completes while disarmed.
    pub async fn tick(&mut self) {
        poll_fn(|cx| self.poll_tick(cx)).await
    }
}
