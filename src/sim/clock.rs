//! Simulation clock
//!
//! Tracks elapsed simulated time in milliseconds and the global time-freeze
//! countdown. Every timer in the game is an expiry timestamp compared against
//! [`SimClock::now`].

use serde::{Deserialize, Serialize};

use crate::consts::FREEZE_SLOWDOWN;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    /// Milliseconds since session start (pauses excluded)
    pub elapsed_ms: f64,
    /// Time freeze left, never negative
    pub freeze_remaining_ms: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.elapsed_ms
    }

    /// Advance by real elapsed time and count down the freeze
    pub fn advance(&mut self, dt_ms: f64) {
        let dt = dt_ms.max(0.0);
        self.elapsed_ms += dt;
        self.freeze_remaining_ms = (self.freeze_remaining_ms - dt).max(0.0);
    }

    /// Start (or restart) a freeze of the given length
    pub fn freeze(&mut self, duration_ms: f64) {
        self.freeze_remaining_ms = duration_ms.max(0.0);
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.freeze_remaining_ms > 0.0
    }

    /// Multiplier for falling-object displacement this tick
    #[inline]
    pub fn motion_scale(&self) -> f32 {
        if self.is_frozen() { FREEZE_SLOWDOWN } else { 1.0 }
    }

    /// Drop any running freeze
    pub fn thaw(&mut self) {
        self.freeze_remaining_ms = 0.0;
    }
}
