//! Statistics display
//!
//! Numeric counters published after every fixed step for an external
//! display (DOM text, terminal, log).

use serde::{Deserialize, Serialize};

use crate::sim::GameSession;

/// Read-only snapshot of the session counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub spawned: u32,
    pub hits: u32,
    /// Whole seconds the player has been alive
    pub alive_secs: u64,
    pub score: u64,
    pub health: i32,
    pub loop_count: u64,
}

impl Stats {
    pub fn collect(session: &GameSession, loop_count: u64) -> Self {
        Self {
            spawned: session.counters.spawned,
            hits: session.counters.hits,
            alive_secs: session.alive_time().floor() as u64,
            score: session.score(),
            health: session.health(),
            loop_count,
        }
    }

    /// One line per counter, in display order
    pub fn lines(&self) -> [String; 6] {
        [
            format!("enemies spawned {}", self.spawned),
            format!("enemies hit {}", self.hits),
            format!("alive for: {}", self.alive_secs),
            format!("score {}", self.score),
            format!("health {}", self.health),
            format!("loop count {}", self.loop_count),
        ]
    }
}

/// Receives stats after every step
pub trait StatsSink {
    fn publish(&mut self, stats: &Stats);
}

/// Keeps only the most recent snapshot
impl StatsSink for Stats {
    fn publish(&mut self, stats: &Stats) {
        *self = *stats;
    }
}

impl StatsSink for Vec<Stats> {
    fn publish(&mut self, stats: &Stats) {
        self.push(*stats);
    }
}
