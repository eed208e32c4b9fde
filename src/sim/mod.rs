//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod entity;
pub mod registry;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use clock::{RemainderPolicy, SimulationClock};
pub use collision::{Aabb, COLLISION_RULES, CollisionHandler, CollisionRule, rule_for};
pub use entity::{Body, Enemy, Entity, EntityId, EntityKind, Player, Shot, Size};
pub use registry::EntityRegistry;
pub use spawner::Spawner;
pub use state::{Counters, GameEvent, GameSession, InputState, WorldBounds};
pub use tick::StepContext;
pub use timer::RearmGate;
