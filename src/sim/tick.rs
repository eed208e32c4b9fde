//! Fixed timestep simulation step
//!
//! Advances a [`GameSession`] by exactly `dt` seconds:
//! 1. update every entity that existed when the step began
//! 2. run the optional global collision handler
//! 3. purge entities queued for removal
//! 4. run the spawner
//! 5. handle death and the restart trigger

use super::entity::EntityId;
use super::registry::EntityRegistry;
use super::state::{Counters, GameEvent, GameSession, WorldBounds};

/// What an entity can see and touch while it updates
pub struct StepContext<'a> {
    pub registry: &'a mut EntityRegistry,
    pub counters: &'a mut Counters,
    pub events: &'a mut Vec<GameEvent>,
    pub bounds: WorldBounds,
    pub player_id: EntityId,
}

impl GameSession {
    /// Advance the world by one fixed timestep
    pub fn step(&mut self, dt: f32) {
        self.step_count += 1;

        let input = self.input;
        if let Some(player) = self.registry.player_mut(self.player_id) {
            player.controller = input;
        }

        // Entities created during this pass (shots, enemies) wait for the next step
        for id in self.registry.snapshot() {
            let Some(mut entity) = self.registry.take(id) else {
                continue;
            };
            let mut ctx = StepContext {
                registry: &mut self.registry,
                counters: &mut self.counters,
                events: &mut self.events,
                bounds: self.bounds,
                player_id: self.player_id,
            };
            entity.update(dt, &mut ctx);
            self.registry.restore(entity);
        }

        if let Some(handler) = self.collision_handler.as_mut() {
            handler.update(&mut self.registry, &mut self.counters, dt);
        }

        self.registry.purge_removed();

        if let Some(spawner) = self.spawner.as_mut() {
            if let Some(id) = spawner.update(dt, &mut self.registry, &self.bounds) {
                self.counters.spawned += 1;
                self.events.push(GameEvent::EnemySpawned { id });
            }
        }

        if self.is_player_dead() {
            if !self.game_over {
                self.game_over = true;
                self.spawner = None;
                self.events.push(GameEvent::PlayerDied);
                log::info!(
                    "game over: score {} ({} hits, {:.1}s alive)",
                    self.score(),
                    self.counters.hits,
                    self.alive_time()
                );
            }
            if self.input.action_1 {
                self.restart();
            }
        }
    }
}
