//! Time sources.
//!
//! The idle float reads wall-clock seconds since the Unix epoch rather than
//! time since the page started, so the float phase is continuous across
//! pin/release toggles. [`ManualClock`] replaces it in headless runs.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of wall-clock seconds
pub trait Clock {
    /// Seconds since the Unix epoch
    fn now_secs(&self) -> f64;
}

/// The system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        // A clock set before 1970 reads as the epoch itself
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_secs: f64) -> Self {
        Self {
            now: Cell::new(start_secs),
        }
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    /// Move forward by `ms` milliseconds
    pub fn advance_ms(&self, ms: f64) {
        self.now.set(self.now.get() + ms / 1000.0);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_secs(&self) -> f64 {
        (**self).now_secs()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_secs(&self) -> f64 {
        (**self).now_secs()
    }
}
