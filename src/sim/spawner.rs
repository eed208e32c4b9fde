//! Timed enemy spawning

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::EntityId;
use super::registry::EntityRegistry;
use super::state::WorldBounds;
use super::timer::RearmGate;
use crate::consts::{ENEMY_SPAWN_INSET, SPAWN_INTERVAL};

/// Injects one enemy per interval. The gate starts armed, so the first enemy
/// appears on the very first update and is stamped at t=0. Re-arming is checked
/// against the time at the end of each update, so the next enemy lands on the
/// update that reaches the 1 s mark.
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Seconds since this spawner was created
    timer: f32,
    gate: RearmGate,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            timer: 0.0,
            gate: RearmGate::new(SPAWN_INTERVAL),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.timer
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    /// Spawn position along the top edge; x may start slightly off the left side
    fn spawn_position(&mut self, bounds: &WorldBounds) -> Vec2 {
        let x = self.rng.random::<f32>() * bounds.width - ENEMY_SPAWN_INSET;
        Vec2::new(x, 0.0)
    }

    /// Returns the id of the enemy spawned this update, if any
    pub fn update(
        &mut self,
        dt: f32,
        registry: &mut EntityRegistry,
        bounds: &WorldBounds,
    ) -> Option<EntityId> {
        let start = self.timer;
        self.timer += dt;

        // An armed gate fires at the start of the update
        let now = if self.gate.is_ready() { start } else { self.timer };
        if !self.gate.poll(now) {
            return None;
        }
        let pos = self.spawn_position(bounds);
        let id = registry.spawn_enemy(pos);
        log::trace!("spawned enemy {} at x={:.1} (t={:.2})", id, pos.x, now);
        Some(id)
    }
}
