//! Structured elapsed-time value in hours, minutes and seconds.
//!
//! [`ElapsedTime`] is the unit of exchange between the stopwatch, the totals
//! aggregator and the phrase codec. It is a small `Copy` value: consumers
//! always receive their own copy and can never mutate the stopwatch's
//! internal state through it.
//!
//! ## Normalization
//!
//! Values are always held in normalized form:
//!
//! - `0 <= seconds < 60`
//! - `0 <= minutes < 60`
//! - `hours` is unbounded
//!
//! Every constructor carries overflow into the next larger unit, so
//! `ElapsedTime::new(0, 90, 75)` is `1h 31m 15s`.
//!
//! ## Examples
//!
//! ```rust
//! use jtl::libs::elapsed::{ElapsedTime, Rounding};
//!
//! let time = ElapsedTime::from_milliseconds(3_723_999);
//! assert_eq!(time, ElapsedTime::new(1, 2, 3));
//! assert_eq!(time.to_whole_minutes(), 62);
//! assert_eq!(time.rounded(Rounding::Minute), ElapsedTime::new(1, 2, 0));
//! ```

use super::error::TrackerError;
use super::formatter::format_clock;
use serde::Serialize;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

pub const MILLISEC_IN_HOUR: u64 = 3_600_000;
pub const MILLISEC_IN_MIN: u64 = 60_000;
pub const MILLISEC_IN_SEC: u64 = 1_000;

const SEC_IN_MIN: u64 = 60;
const MIN_IN_HOUR: u64 = 60;
const SEC_IN_HOUR: u64 = SEC_IN_MIN * MIN_IN_HOUR;

/// A normalized duration at whole-second resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ElapsedTime {
    hours: u64,
    minutes: u64,
    seconds: u64,
}

impl ElapsedTime {
    /// Builds a normalized value, carrying excess seconds and minutes upward.
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        let total = hours
            .saturating_mul(SEC_IN_HOUR)
            .saturating_add(minutes.saturating_mul(SEC_IN_MIN))
            .saturating_add(seconds);
        Self::from_seconds(total)
    }

    /// The zero duration.
    pub const fn zero() -> Self {
        Self { hours: 0, minutes: 0, seconds: 0 }
    }

    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / SEC_IN_HOUR,
            minutes: (total % SEC_IN_HOUR) / SEC_IN_MIN,
            seconds: total % SEC_IN_MIN,
        }
    }

    /// Derives a value from a millisecond count, flooring each unit.
    ///
    /// Sub-second remainders are discarded.
    pub fn from_milliseconds(ms: u64) -> Self {
        Self {
            hours: ms / MILLISEC_IN_HOUR,
            minutes: (ms % MILLISEC_IN_HOUR) / MILLISEC_IN_MIN,
            seconds: (ms % MILLISEC_IN_MIN) / MILLISEC_IN_SEC,
        }
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    pub fn to_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(SEC_IN_HOUR)
            .saturating_add(self.minutes * SEC_IN_MIN)
            .saturating_add(self.seconds)
    }

    pub fn to_milliseconds(&self) -> u64 {
        self.to_seconds().saturating_mul(MILLISEC_IN_SEC)
    }

    /// Total minutes with the seconds floored away.
    pub fn to_whole_minutes(&self) -> u64 {
        self.hours.saturating_mul(MIN_IN_HOUR).saturating_add(self.minutes)
    }

    /// The same value with the seconds dropped.
    pub fn without_seconds(&self) -> Self {
        Self { seconds: 0, ..*self }
    }

    /// Subtracts `other`, borrowing across units and clamping at zero.
    pub fn saturating_sub(&self, other: &ElapsedTime) -> Self {
        Self::from_seconds(self.to_seconds().saturating_sub(other.to_seconds()))
    }

    /// Rounds half-up to the nearest minute or hour.
    ///
    /// Minute rounding zeroes the seconds and carries into the hours when the
    /// minutes reach 60. Hour rounding zeroes the minutes and leaves the
    /// seconds as they are.
    pub fn rounded(&self, rounding: Rounding) -> Self {
        let mut time = *self;
        match rounding {
            Rounding::Minute => {
                let seconds = time.seconds;
                time.seconds = 0;
                if seconds >= 30 {
                    time.minutes += 1;
                    if time.minutes == MIN_IN_HOUR {
                        time.minutes = 0;
                        time.hours += 1;
                    }
                }
            }
            Rounding::Hour => {
                let minutes = time.minutes;
                time.minutes = 0;
                if minutes >= 30 {
                    time.hours += 1;
                }
            }
        }
        time
    }
}

impl Add for ElapsedTime {
    type Output = ElapsedTime;

    fn add(self, rhs: ElapsedTime) -> Self::Output {
        Self::from_seconds(self.to_seconds().saturating_add(rhs.to_seconds()))
    }
}

impl AddAssign for ElapsedTime {
    fn add_assign(&mut self, rhs: ElapsedTime) {
        *self = *self + rhs;
    }
}

impl TryFrom<chrono::Duration> for ElapsedTime {
    type Error = TrackerError;

    /// Converts a chrono duration, rejecting negative values.
    fn try_from(duration: chrono::Duration) -> Result<Self, Self::Error> {
        let ms = duration.num_milliseconds();
        u64::try_from(ms)
            .map(Self::from_milliseconds)
            .map_err(|_| TrackerError::InvalidArgument(format!("negative duration of {} ms", ms)))
    }
}

impl From<ElapsedTime> for chrono::Duration {
    fn from(time: ElapsedTime) -> Self {
        i64::try_from(time.to_seconds())
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_clock(self))
    }
}

/// Unit to round an [`ElapsedTime`] to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Minute,
    Hour,
}

impl FromStr for Rounding {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "min" | "minute" => Ok(Rounding::Minute),
            "hour" => Ok(Rounding::Hour),
            other => Err(TrackerError::InvalidArgument(format!("unknown rounding '{}', expected 'min' or 'hour'", other))),
        }
    }
}
