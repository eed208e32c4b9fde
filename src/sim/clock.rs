//! Fixed timestep clock
//!
//! Turns irregular frame callbacks into whole `dt` steps so the simulation
//! never sees a variable timestep.

use serde::{Deserialize, Serialize};

/// What happens to the fraction of a step left over after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Once a frame has stepped, the leftover fraction is discarded.
    /// Frames too short to step keep accumulating from the last stepped frame.
    #[default]
    Drop,
    /// Leftover time carries into the next frame
    Carry,
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    dt: f32,
    policy: RemainderPolicy,
    /// Maximum steps per frame (`None` = unbounded)
    max_substeps: Option<u32>,
    last_time: Option<f64>,
    carry: f64,
    loop_count: u64,
}

impl SimulationClock {
    /// `dt` is the fixed step in seconds and must be positive
    pub fn new(dt: f32, policy: RemainderPolicy) -> Self {
        Self {
            dt,
            policy,
            max_substeps: None,
            last_time: None,
            carry: 0.0,
            loop_count: 0,
        }
    }

    pub fn with_max_substeps(mut self, max_substeps: Option<u32>) -> Self {
        self.max_substeps = max_substeps;
        self
    }

    /// Fixed step size in seconds
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Total steps run over the clock's lifetime
    pub fn loop_count(&self) -> u64 {
        self.loop_count
    }

    /// Handle one frame callback at `now` seconds, running `step(dt)` for
    /// every whole step that fits. Returns the number of steps run.
    ///
    /// The first callback only records the time.
    pub fn frame(&mut self, now: f64, mut step: impl FnMut(f32)) -> u32 {
        let Some(last) = self.last_time else {
            self.last_time = Some(now);
            return 0;
        };

        let dt = f64::from(self.dt);
        let mut elapsed = now - last + self.carry;
        let mut steps = 0;

        while elapsed > dt {
            if self.max_substeps.is_some_and(|max| steps >= max) {
                log::debug!(
                    "clock capped at {} steps, dropping {:.3}s",
                    steps,
                    elapsed
                );
                elapsed = elapsed.min(dt);
                self.last_time = Some(now);
                break;
            }
            step(self.dt);
            elapsed -= dt;
            self.last_time = Some(now);
            self.loop_count += 1;
            steps += 1;
        }

        if self.policy == RemainderPolicy::Carry {
            self.carry = elapsed.max(0.0);
            self.last_time = Some(now);
        }

        steps
    }

    /// Same as [`frame`](Self::frame) with a millisecond timestamp
    pub fn frame_millis(&mut self, now_ms: f64, step: impl FnMut(f32)) -> u32 {
        self.frame(now_ms / 1000.0, step)
    }
}
