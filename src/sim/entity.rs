//! Simulation entities
//!
//! Every entity is a [`Body`] (position, velocity, size, health) wrapped in a
//! kind-specific variant. Behaviour lives in the variant's `update`, which runs
//! once per fixed step against a [`StepContext`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, CollisionRule, rule_for};
use super::state::{GameEvent, InputState, WorldBounds};
use super::tick::StepContext;
use super::timer::RearmGate;
use crate::consts::*;

/// Unique entity identifier (monotonic, never reused)
pub type EntityId = u32;

/// Entity variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Shot,
}

/// Width and height of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half extents, used for centred drawing
    pub fn half(&self) -> Size {
        Size::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::new(BODY_SIZE, BODY_SIZE)
    }
}

/// Shared physical state of every entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Size,
    /// May go negative; a body at or below zero is dead
    pub health: i32,
}

impl Body {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size: Size::default(),
            health: DEFAULT_HEALTH,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Base movement: advance position by velocity
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Bounding box anchored at the position
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Input snapshot, refreshed at the start of each step
    pub controller: InputState,
    pub speed: f32,
    /// Seconds lived this session (stops advancing on death)
    pub alive_time: f32,
    fire_gate: RearmGate,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            body: Body::new(id, pos),
            controller: InputState::default(),
            speed: PLAYER_SPEED,
            alive_time: 0.0,
            fire_gate: RearmGate::new(SHOT_COOLDOWN),
        }
    }

    /// Canonical spawn point for a fresh session
    pub fn spawn_point(bounds: &WorldBounds) -> Vec2 {
        Vec2::new(bounds.width / 2.0, bounds.height - PLAYER_SPAWN_OFFSET_Y)
    }

    pub fn is_dead(&self) -> bool {
        self.body.is_dead()
    }

    /// Drive velocity and firing from the controller, then move and clamp
    pub fn update(&mut self, dt: f32, ctx: &mut StepContext<'_>) {
        if self.is_dead() {
            self.body.vel = Vec2::ZERO;
            return;
        }

        self.alive_time += dt;

        let firing = self.controller.action_1;
        self.speed = if firing {
            PLAYER_FIRING_SPEED
        } else {
            PLAYER_SPEED
        };
        self.body.vel = Vec2::new(
            f32::from(self.controller.move_x.clamp(-1, 1)) * self.speed,
            f32::from(self.controller.move_y.clamp(-1, 1)) * self.speed,
        );

        if firing && self.fire_gate.poll(self.alive_time) {
            let origin = self.body.pos - Vec2::new(0.0, SHOT_SPAWN_OFFSET_Y);
            let id = ctx.registry.spawn_shot(origin);
            ctx.events.push(GameEvent::ShotFired { id });
            log::trace!("shot {} fired at ({:.1}, {:.1})", id, origin.x, origin.y);
        }

        self.body.integrate(dt);

        // Position only; velocity keeps pushing against the edge
        self.body.pos = ctx.bounds.clamp(self.body.pos);
    }
}

/// A falling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
}

impl Enemy {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            body: Body::new(id, pos).with_velocity(Vec2::new(0.0, ENEMY_SPEED)),
        }
    }

    /// Fall, expire below the canvas, or ram the player
    pub fn update(&mut self, dt: f32, ctx: &mut StepContext<'_>) {
        self.body.integrate(dt);

        if self.body.pos.y > ctx.bounds.height {
            ctx.registry.mark_for_removal(self.body.id);
            ctx.events.push(GameEvent::EnemyEscaped { id: self.body.id });
            return;
        }

        let Some(CollisionRule::DamageTarget { damage }) =
            rule_for(EntityKind::Enemy, EntityKind::Player)
        else {
            return;
        };

        let my_bounds = self.body.bounds();
        let health = match ctx.registry.player_mut(ctx.player_id) {
            Some(player) if !player.is_dead() && my_bounds.overlaps(&player.body.bounds()) => {
                player.body.health -= damage;
                player.body.health
            }
            _ => return,
        };

        ctx.counters.hits += 1;
        ctx.registry.mark_for_removal(self.body.id);
        ctx.events.push(GameEvent::PlayerHit {
            enemy: self.body.id,
            health,
        });
        log::trace!("enemy {} hit player, health now {}", self.body.id, health);
    }
}

/// A shot fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shot {
    pub body: Body,
}

impl Shot {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            body: Body::new(id, pos).with_velocity(Vec2::new(0.0, -SHOT_SPEED)),
        }
    }

    /// Rise, expire above the canvas, or destroy every overlapping enemy
    pub fn update(&mut self, dt: f32, ctx: &mut StepContext<'_>) {
        self.body.integrate(dt);

        if self.body.pos.y < 0.0 {
            ctx.registry.mark_for_removal(self.body.id);
            return;
        }

        let my_bounds = self.body.bounds();
        // No early exit: one shot can take out several enemies in a single step
        let struck: Vec<EntityId> = ctx
            .registry
            .iter()
            .filter(|e| {
                matches!(
                    rule_for(EntityKind::Shot, e.kind()),
                    Some(CollisionRule::DestroyBoth)
                )
            })
            .filter(|e| my_bounds.overlaps(&e.body().bounds()))
            .map(Entity::id)
            .collect();

        for enemy in struck {
            ctx.registry.mark_for_removal(self.body.id);
            ctx.registry.mark_for_removal(enemy);
            ctx.counters.hits += 1;
            ctx.events.push(GameEvent::EnemyShot {
                shot: self.body.id,
                enemy,
            });
            log::trace!("shot {} destroyed enemy {}", self.body.id, enemy);
        }
    }
}

/// Any live simulation object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Player(Player),
    Enemy(Enemy),
    Shot(Shot),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Player(_) => EntityKind::Player,
            Entity::Enemy(_) => EntityKind::Enemy,
            Entity::Shot(_) => EntityKind::Shot,
        }
    }

    pub fn is_kind(&self, kind: EntityKind) -> bool {
        self.kind() == kind
    }

    pub fn id(&self) -> EntityId {
        self.body().id
    }

    pub fn body(&self) -> &Body {
        match self {
            Entity::Player(p) => &p.body,
            Entity::Enemy(e) => &e.body,
            Entity::Shot(s) => &s.body,
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.body().bounds()
    }

    /// Advance one fixed step
    pub fn update(&mut self, dt: f32, ctx: &mut StepContext<'_>) {
        match self {
            Entity::Player(p) => p.update(dt, ctx),
            Entity::Enemy(e) => e.update(dt, ctx),
            Entity::Shot(s) => s.update(dt, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_defaults() {
        let body = Body::new(7, Vec2::new(1.0, 2.0));
        assert_eq!(body.id, 7);
        assert_eq!(body.health, 100);
        assert_eq!(body.size, Size::new(10.0, 10.0));
        assert!(!body.is_dead());
    }

    #[test]
    fn test_body_integrate() {
        let mut body = Body::new(0, Vec2::new(10.0, 10.0)).with_velocity(Vec2::new(60.0, -30.0));
        body.integrate(0.5);
        assert!((body.pos.x - 40.0).abs() < 1e-5);
        assert!((body.pos.y - -5.0).abs() < 1e-5);
    }

    #[test]
    fn test_dead_at_zero_and_below() {
        let mut body = Body::new(0, Vec2::ZERO);
        body.health = 0;
        assert!(body.is_dead());
        body.health = -20;
        assert!(body.is_dead());
    }

    #[test]
    fn test_variant_velocities() {
        let enemy = Enemy::new(1, Vec2::ZERO);
        assert_eq!(enemy.body.vel, Vec2::new(0.0, 30.0));
        let shot = Shot::new(2, Vec2::ZERO);
        assert_eq!(shot.body.vel, Vec2::new(0.0, -200.0));
    }

    #[test]
    fn test_entity_kind_dispatch() {
        let entity = Entity::Shot(Shot::new(3, Vec2::ZERO));
        assert_eq!(entity.kind(), EntityKind::Shot);
        assert!(entity.is_kind(EntityKind::Shot));
        assert!(!entity.is_kind(EntityKind::Enemy));
        assert_eq!(entity.id(), 3);
    }

    #[test]
    fn test_player_spawn_point() {
        let bounds = WorldBounds::new(300.0, 500.0);
        assert_eq!(Player::spawn_point(&bounds), Vec2::new(150.0, 400.0));
    }
}
