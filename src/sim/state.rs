//! Game session state
//!
//! One [`GameSession`] owns everything a playthrough needs: the entity
//! registry, the player's id, the spawner and the score counters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::CollisionHandler;
use super::entity::{EntityId, Player};
use super::registry::EntityRegistry;
use super::spawner::Spawner;
use crate::consts::SCORE_PER_HIT;
use crate::settings::Settings;

/// Playfield extents; positions are clamped to `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Controller snapshot read by the player each step.
///
/// Axes are -1, 0 or 1; opposing keys held together cancel to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub move_x: i8,
    pub move_y: i8,
    /// Fire (and restart when dead)
    pub action_1: bool,
}

/// Per-session score counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// Enemies spawned
    pub spawned: u32,
    /// Enemies shot plus enemies that rammed the player
    pub hits: u32,
}

/// Things that happened during a step, for hosts that want to react to them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: EntityId },
    EnemyEscaped { id: EntityId },
    EnemyShot { shot: EntityId, enemy: EntityId },
    ShotFired { id: EntityId },
    PlayerHit { enemy: EntityId, health: i32 },
    PlayerDied,
    SessionRestarted { restarts: u32 },
}

/// One playthrough, from player spawn to death and restart
pub struct GameSession {
    pub bounds: WorldBounds,
    /// Base seed; each restart derives a fresh spawner seed from it
    pub seed: u64,
    pub registry: EntityRegistry,
    pub counters: Counters,
    /// Latest input from the input adapter, copied into the player each step
    pub input: InputState,
    pub(crate) player_id: EntityId,
    pub(crate) spawner: Option<Spawner>,
    pub(crate) collision_handler: Option<Box<dyn CollisionHandler>>,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) game_over: bool,
    restarts: u32,
    /// Steps run since the session (re)started
    pub step_count: u64,
}

impl GameSession {
    /// Start a session using validated settings
    pub fn new(settings: &Settings) -> Self {
        Self::with_bounds(
            WorldBounds::new(settings.canvas.width, settings.canvas.height),
            settings.seed,
        )
    }

    pub fn with_bounds(bounds: WorldBounds, seed: u64) -> Self {
        let mut session = Self {
            bounds,
            seed,
            registry: EntityRegistry::new(),
            counters: Counters::default(),
            input: InputState::default(),
            player_id: 0,
            spawner: None,
            collision_handler: None,
            events: Vec::new(),
            game_over: false,
            restarts: 0,
            step_count: 0,
        };
        session.reset();
        session
    }

    /// Fresh player, fresh spawner, empty registry, zeroed counters
    pub fn reset(&mut self) {
        self.counters = Counters::default();
        self.registry.clear();
        self.player_id = self
            .registry
            .spawn_player(Player::spawn_point(&self.bounds));
        self.spawner = Some(Spawner::new(self.spawner_seed()));
        self.game_over = false;
        self.step_count = 0;
        log::info!(
            "session started (player {}, restarts {})",
            self.player_id,
            self.restarts
        );
    }

    /// Tear down and recreate the session after a death
    pub fn restart(&mut self) {
        self.restarts += 1;
        self.reset();
        self.events.push(GameEvent::SessionRestarted {
            restarts: self.restarts,
        });
    }

    fn spawner_seed(&self) -> u64 {
        self.seed.wrapping_add(u64::from(self.restarts))
    }

    /// Install a global collision pass that runs after entity updates
    pub fn set_collision_handler(&mut self, handler: Box<dyn CollisionHandler>) {
        self.collision_handler = Some(handler);
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn player(&self) -> Option<&Player> {
        self.registry.player(self.player_id)
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Spawning has halted because the player died
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_player_dead(&self) -> bool {
        self.player().is_none_or(Player::is_dead)
    }

    pub fn health(&self) -> i32 {
        self.player().map_or(0, |p| p.body.health)
    }

    pub fn alive_time(&self) -> f32 {
        self.player().map_or(0.0, |p| p.alive_time)
    }

    /// `floor(30 * hits + seconds alive)`
    pub fn score(&self) -> u64 {
        (SCORE_PER_HIT * self.counters.hits as f32 + self.alive_time()).floor() as u64
    }

    /// Drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;

    #[test]
    fn test_new_session() {
        let session = GameSession::new(&Settings::default());
        assert_eq!(session.registry.len(), 1);
        assert_eq!(session.registry.count_kind(EntityKind::Player), 1);
        assert_eq!(session.counters, Counters::default());
        assert_eq!(session.health(), 100);
        assert_eq!(session.score(), 0);
        assert!(!session.is_game_over());
        let player = session.player().expect("player exists");
        assert_eq!(player.body.pos, Vec2::new(150.0, 400.0));
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = WorldBounds::new(300.0, 500.0);
        assert_eq!(bounds.clamp(Vec2::new(-5.0, 600.0)), Vec2::new(0.0, 500.0));
        assert_eq!(bounds.clamp(Vec2::new(10.0, 20.0)), Vec2::new(10.0, 20.0));
        assert_eq!(bounds.center(), Vec2::new(150.0, 250.0));
    }

    #[test]
    fn test_score_formula() {
        let mut session = GameSession::with_bounds(WorldBounds::new(300.0, 500.0), 0);
        session.counters.hits = 3;
        let id = session.player_id();
        if let Some(player) = session.registry.player_mut(id) {
            player.alive_time = 12.7;
        }
        assert_eq!(session.score(), 102);
    }

    #[test]
    fn test_take_events_drains() {
        let mut session = GameSession::with_bounds(WorldBounds::new(300.0, 500.0), 0);
        session.events.push(GameEvent::PlayerDied);
        assert_eq!(session.take_events(), vec![GameEvent::PlayerDied]);
        assert!(session.take_events().is_empty());
    }
}
