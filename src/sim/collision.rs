//! Collision geometry and interaction rules
//!
//! All collisions are axis-aligned box overlaps. Which pairs interact, and how,
//! is decided by a small rule table keyed by `(EntityKind, EntityKind)`.

use glam::Vec2;

use super::entity::{EntityKind, Size};
use super::registry::EntityRegistry;
use super::state::Counters;

/// Axis-aligned bounding box anchored at its minimum corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Size,
}

impl Aabb {
    pub fn new(min: Vec2, size: Size) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + Vec2::new(self.size.width, self.size.height)
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.min.x + other.size.width
            && self.min.x + self.size.width > other.min.x
            && self.min.y < other.min.y + other.size.height
            && self.min.y + self.size.height > other.min.y
    }
}

/// Outcome when the acting kind overlaps the target kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionRule {
    /// Both entities are removed and a hit is scored
    DestroyBoth,
    /// The target loses health, the actor is removed and a hit is scored
    DamageTarget { damage: i32 },
}

/// Interaction table: (actor, target) -> rule
pub const COLLISION_RULES: &[(EntityKind, EntityKind, CollisionRule)] = &[
    (EntityKind::Shot, EntityKind::Enemy, CollisionRule::DestroyBoth),
    (
        EntityKind::Enemy,
        EntityKind::Player,
        CollisionRule::DamageTarget {
            damage: crate::consts::ENEMY_CONTACT_DAMAGE,
        },
    ),
];

/// Look up how `actor` interacts with `target`, if at all
pub fn rule_for(actor: EntityKind, target: EntityKind) -> Option<CollisionRule> {
    COLLISION_RULES
        .iter()
        .find(|(a, t, _)| *a == actor && *t == target)
        .map(|(_, _, rule)| *rule)
}

/// Optional global collision pass, run after every entity has updated and
/// before pending removals are purged.
pub trait CollisionHandler {
    fn update(&mut self, registry: &mut EntityRegistry, counters: &mut Counters, dt: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(x: f32, y: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Size::new(10.0, 10.0))
    }

    #[test]
    fn test_overlap_basic() {
        assert!(boxed(0.0, 0.0).overlaps(&boxed(5.0, 5.0)));
        assert!(boxed(5.0, 5.0).overlaps(&boxed(0.0, 0.0)));
        assert!(!boxed(0.0, 0.0).overlaps(&boxed(20.0, 0.0)));
        assert!(!boxed(0.0, 0.0).overlaps(&boxed(0.0, 20.0)));
    }

    #[test]
    fn test_touching_edges_miss() {
        assert!(!boxed(0.0, 0.0).overlaps(&boxed(10.0, 0.0)));
        assert!(!boxed(0.0, 0.0).overlaps(&boxed(0.0, 10.0)));
    }

    #[test]
    fn test_overlap_uneven_sizes() {
        let wide = Aabb::new(Vec2::new(0.0, 0.0), Size::new(100.0, 2.0));
        let small = Aabb::new(Vec2::new(50.0, 1.0), Size::new(1.0, 1.0));
        assert!(wide.overlaps(&small));
        assert!(small.overlaps(&wide));
        assert_eq!(wide.max(), Vec2::new(100.0, 2.0));
    }

    #[test]
    fn test_rule_table() {
        assert_eq!(
            rule_for(EntityKind::Shot, EntityKind::Enemy),
            Some(CollisionRule::DestroyBoth)
        );
        assert_eq!(
            rule_for(EntityKind::Enemy, EntityKind::Player),
            Some(CollisionRule::DamageTarget { damage: 10 })
        );
        assert_eq!(rule_for(EntityKind::Shot, EntityKind::Player), None);
        assert_eq!(rule_for(EntityKind::Enemy, EntityKind::Enemy), None);
        assert_eq!(rule_for(EntityKind::Player, EntityKind::Enemy), None);
    }
}
