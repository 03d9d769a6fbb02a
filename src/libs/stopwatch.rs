//! Tick-driven stopwatch with per-unit change listeners.
//!
//! The stopwatch accumulates an [`ElapsedTime`] one second per tick. Ticks
//! come from a [`Ticker`] that is armed by [`Stopwatch::start`] and disarmed
//! by [`Stopwatch::stop`]; the owner drives it by awaiting
//! [`Stopwatch::next_tick`] in its event loop. [`Stopwatch::tick`] can also
//! be called directly, which is how deterministic tests advance time.
//!
//! ## State machine
//!
//! ```text
//!            start()                 tick() / deduct_time()
//!  ┌─────────┐ ───────────▶ ┌─────────┐ ◀──────┐
//!  │ Stopped │              │ Running │ ───────┘
//!  └─────────┘ ◀─────────── └─────────┘
//!            stop(reset)
//! ```
//!
//! `start` on a running stopwatch and `stop` on a stopped one are no-ops, so
//! there is never more than one armed tick source.
//!
//! ## Listeners
//!
//! Listeners are registered per [`Granularity`] and receive a copy of the
//! elapsed time whenever that unit's value changes, either by a tick or by a
//! deduction. They run synchronously, in registration order, seconds first,
//! then minutes, then hours. Registering returns a [`ListenerId`] that removes
//! the listener again.

use super::elapsed::{ElapsedTime, Rounding};
use super::ticker::Ticker;
use std::fmt;

/// Time unit a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Second,
    Minute,
    Hour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    Stopped,
    Running,
}

/// Handle returned by listener registration; pass it to
/// [`Stopwatch::remove_listener`] to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback invoked with the elapsed time after a unit changed.
pub type Listener = Box<dyn FnMut(ElapsedTime) + Send>;

/// Which units differ between two times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangedUnits {
    pub seconds: bool,
    pub minutes: bool,
    pub hours: bool,
}

impl ChangedUnits {
    pub fn between(before: &ElapsedTime, after: &ElapsedTime) -> Self {
        Self {
            seconds: before.seconds() != after.seconds(),
            minutes: before.minutes() != after.minutes(),
            hours: before.hours() != after.hours(),
        }
    }

    pub fn any(&self) -> bool {
        self.seconds || self.minutes || self.hours
    }

    fn contains(&self, granularity: Granularity) -> bool {
        match granularity {
            Granularity::Second => self.seconds,
            Granularity::Minute => self.minutes,
            Granularity::Hour => self.hours,
        }
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Granularity, Listener)>,
}

impl Listeners {
    fn add(&mut self, granularity: Granularity, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, granularity, listener));
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn count(&self, granularity: Option<Granularity>) -> usize {
        match granularity {
            Some(granularity) => self.entries.iter().filter(|(_, g, _)| *g == granularity).count(),
            None => self.entries.len(),
        }
    }

    fn notify(&mut self, changed: ChangedUnits, time: ElapsedTime) {
        for granularity in [Granularity::Second, Granularity::Minute, Granularity::Hour] {
            if !changed.contains(granularity) {
                continue;
            }
            for (_, _, listener) in self.entries.iter_mut().filter(|(_, g, _)| *g == granularity) {
                listener(time);
            }
        }
    }
}

pub struct Stopwatch {
    time: ElapsedTime,
    state: StopwatchState,
    ticker: Ticker,
    listeners: Listeners,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopwatch")
            .field("time", &self.time)
            .field("state", &self.state)
            .field("ticker", &self.ticker)
            .field("listeners", &self.listeners.count(None))
            .finish()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::with_ticker(Ticker::default())
    }

    pub fn with_ticker(ticker: Ticker) -> Self {
        Self {
            time: ElapsedTime::zero(),
            state: StopwatchState::Stopped,
            ticker,
            listeners: Listeners::default(),
        }
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == StopwatchState::Running
    }

    /// Starts accumulating time. Does nothing if already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.ticker.arm();
        self.state = StopwatchState::Running;
        tracing::debug!(elapsed = %self.time, "stopwatch started");
    }

    /// Stops the clock, zeroing the elapsed time if `reset` is set.
    ///
    /// Does nothing if already stopped, whatever `reset` says.
    pub fn stop(&mut self, reset: bool) {
        if !self.is_running() {
            return;
        }
        self.ticker.disarm();
        self.state = StopwatchState::Stopped;
        if reset {
            self.reset();
        }
        tracing::debug!(elapsed = %self.time, reset, "stopwatch stopped");
    }

    /// Zeroes the elapsed time without touching the running state.
    pub fn reset(&mut self) {
        self.time = ElapsedTime::zero();
        tracing::debug!("stopwatch reset");
    }

    /// Stops, zeroes and starts again, leaving a running stopwatch at zero.
    pub fn restart(&mut self) {
        self.stop(true);
        self.reset();
        self.start();
    }

    /// Returns a copy of the elapsed time, optionally rounded.
    pub fn time(&self, round: Option<Rounding>) -> ElapsedTime {
        match round {
            Some(rounding) => Self::round_time(self.time, rounding),
            None => self.time,
        }
    }

    /// Rounds `time` half-up to the nearest minute or hour.
    pub fn round_time(time: ElapsedTime, rounding: Rounding) -> ElapsedTime {
        time.rounded(rounding)
    }

    /// Removes `time` from the elapsed time, clamping at zero.
    ///
    /// Borrows cascade through every unit, so deducting 10 minutes from
    /// `1h 0m 0s` leaves `0h 50m 0s`. Listeners are notified for each unit
    /// whose value changed.
    pub fn deduct_time(&mut self, time: &ElapsedTime) {
        let before = self.time;
        self.time = before.saturating_sub(time);
        tracing::debug!(deducted = %time, before = %before, after = %self.time, "time deducted");
        self.notify(ChangedUnits::between(&before, &self.time));
    }

    /// Advances a running stopwatch by one second and notifies listeners.
    ///
    /// Returns `false` and does nothing when stopped.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let before = self.time;
        self.time = ElapsedTime::from_seconds(before.to_seconds() + 1);
        self.notify(ChangedUnits::between(&before, &self.time));
        true
    }

    /// Waits for the next tick from the armed ticker and applies it.
    ///
    /// Never completes while the stopwatch is stopped. Cancel safe: dropping
    /// the future before it completes loses no ticks.
    pub async fn next_tick(&mut self) {
        self.ticker.tick().await;
        self.tick();
    }

    pub fn add_listener<F>(&mut self, granularity: Granularity, listener: F) -> ListenerId
    where
        F: FnMut(ElapsedTime) + Send + 'static,
    {
        self.listeners.add(granularity, Box::new(listener))
    }

    pub fn add_sec_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(ElapsedTime) + Send + 'static,
    {
        self.add_listener(Granularity::Second, listener)
    }

    pub fn add_min_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(ElapsedTime) + Send + 'static,
    {
        self.add_listener(Granularity::Minute, listener)
    }

    pub fn add_hour_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(ElapsedTime) + Send + 'static,
    {
        self.add_listener(Granularity::Hour, listener)
    }

    /// Unsubscribes a listener. Returns `false` if it was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.entries.clear();
    }

    pub fn has_listeners(&self) -> bool {
        self.listeners.count(None) > 0
    }

    pub fn has_listeners_for(&self, granularity: Granularity) -> bool {
        self.listeners.count(Some(granularity)) > 0
    }

    fn notify(&mut self, changed: ChangedUnits) {
        if !changed.any() || !self.has_listeners() {
            return;
        }
        self.listeners.notify(changed, self.time);
    }
}
