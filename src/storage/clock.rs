//! Timestamp providers
//!
//! Saves and rotations stamp files with local wall-clock time at second
//! granularity. Tests substitute a fixed clock.

use chrono::{Local, NaiveDateTime, Timelike};

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The system's local clock, truncated to whole seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
