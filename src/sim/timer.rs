//! Countdown timers advanced by the tick delta
//!
//! No callbacks or threads: a timer is a remaining duration that the owner
//! advances every tick and polls for expiry. Cancelling resets it.

use serde::{Deserialize, Serialize};

/// A one-shot countdown
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Countdown {
    remaining: Option<f32>,
}

impl Countdown {
    pub fn new() -> Self {
        Self { remaining: None }
    }

    /// (Re)start with the given duration in seconds
    pub fn start(&mut self, duration: f32) {
        self.remaining = Some(duration.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds left, zero when idle
    pub fn remaining(&self) -> f32 {
        self.remaining.unwrap_or(0.0)
    }

    /// Advance by `dt` seconds. Returns true exactly once, on the tick the
    /// countdown reaches zero.
    pub fn advance(&mut self, dt: f32) -> bool {
        match self.remaining {
            Some(left) if left - dt <= 0.0 => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - dt);
                false
            }
            None => false,
        }
    }
}
