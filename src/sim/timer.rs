//! Re-arming interval gate
//!
//! Shared by the enemy spawner and the player's fire cooldown: the gate starts
//! armed, fires once, then re-arms when `interval` has elapsed since the last fire.

use serde::{Deserialize, Serialize};

/// Tolerance for accumulated `f32` step time when comparing against an interval
pub const TIMER_EPSILON: f32 = 1e-4;

/// A one-shot gate that re-arms after a fixed interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RearmGate {
    /// Seconds that must pass between fires
    pub interval: f32,
    ready: bool,
    last_fired: f32,
}

impl RearmGate {
    /// Create an armed gate
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            ready: true,
            last_fired: 0.0,
        }
    }

    /// Whether the next poll will fire
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Timestamp of the last fire
    pub fn last_fired(&self) -> f32 {
        self.last_fired
    }

    /// Re-arm if the interval elapsed, then fire if armed.
    ///
    /// `now` is measured on the owner's own clock, not wall time.
    pub fn poll(&mut self, now: f32) -> bool {
        if !self.ready && now - self.last_fired >= self.interval - TIMER_EPSILON {
            self.ready = true;
        }
        if self.ready {
            self.ready = false;
            self.last_fired = now;
            true
        } else {
            false
        }
    }
}
