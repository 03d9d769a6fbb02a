//! Time formatting utilities for console display.
//!
//! The Jira phrase format (`1h 30m`) lives in [`crate::libs::phrase`]; this
//! module covers the clock-style rendering used in status tables, where the
//! seconds matter to the person watching the timer.
//!
//! ## Format Specifications
//!
//! - Hours are zero-padded to at least 2 digits and never wrap at 24
//! - Minutes and seconds are always exactly 2 digits
//!
//! ## Examples
//!
//! ```rust
//! use jtl::libs::elapsed::ElapsedTime;
//! use jtl::libs::formatter::format_clock;
//!
//! assert_eq!(format_clock(&ElapsedTime::new(1, 2, 3)), "01:02:03");
//! assert_eq!(format_clock(&ElapsedTime::new(26, 0, 0)), "26:00:00");
//! ```

use super::elapsed::ElapsedTime;

/// Formats an [`ElapsedTime`] as `HH:MM:SS`.
pub fn format_clock(time: &ElapsedTime) -> String {
    format!("{:02}:{:02}:{:02}", time.hours(), time.minutes(), time.seconds())
}

/// Formats an [`ElapsedTime`] as `HH:MM`, dropping the seconds.
///
/// Used for totals, which are tracked at minute resolution.
pub fn format_hours_minutes(time: &ElapsedTime) -> String {
    format!("{:02}:{:02}", time.hours(), time.minutes())
}
