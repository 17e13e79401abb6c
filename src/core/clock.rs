//! Time sources used by the split tree.
//!
//! `now()` is a monotonic reading in seconds relative to an arbitrary epoch
//! fixed when the clock is built. It never correlates with calendar time;
//! `wall_clock_now()` exists only for export headers.

use chrono::{DateTime, Local};
use std::cell::Cell;
use std::time::Instant;

pub trait Clock {
    /// Monotonic seconds since the clock's epoch.
    fn now(&self) -> f64;

    /// Calendar timestamp, may jump backwards.
    fn wall_clock_now(&self) -> DateTime<Local>;
}

/// Clock backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn wall_clock_now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Hand-driven clock. Readings only change through `set`/`advance`, and the
/// wall clock moves in step with the monotonic reading.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<f64>,
    wall_origin: Cell<DateTime<Local>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Local::now())
    }

    pub fn starting_at(wall: DateTime<Local>) -> Self {
        Self {
            now: Cell::new(0.0),
            wall_origin: Cell::new(wall),
        }
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }

    /// Pin the calendar time that corresponds to the current reading.
    pub fn set_wall_clock(&self, wall: DateTime<Local>) {
        let offset = chrono::Duration::milliseconds((self.now.get() * 1000.0) as i64);
        self.wall_origin.set(wall - offset);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn wall_clock_now(&self) -> DateTime<Local> {
        let offset = chrono::Duration::milliseconds((self.now.get() * 1000.0) as i64);
        self.wall_origin.get() + offset
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }

    fn wall_clock_now(&self) -> DateTime<Local> {
        (**self).wall_clock_now()
    }
}
