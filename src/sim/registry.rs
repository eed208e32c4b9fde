//! Entity storage
//!
//! Entities are keyed by monotonically assigned ids. Because ids only grow,
//! ordered iteration doubles as creation order, which the renderer uses for
//! layering. Removals requested during a step are queued and applied together
//! by [`EntityRegistry::purge_removed`].

use std::collections::BTreeMap;

use glam::Vec2;

use super::entity::{Enemy, Entity, EntityId, EntityKind, Player, Shot};

#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityId, Entity>,
    pending_removal: Vec<EntityId>,
    next_id: EntityId,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Allocate an id, build the entity with it and store it
    pub fn insert_with(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_entity_id();
        self.entities.insert(id, build(id));
        id
    }

    pub fn spawn_player(&mut self, pos: Vec2) -> EntityId {
        self.insert_with(|id| Entity::Player(Player::new(id, pos)))
    }

    pub fn spawn_enemy(&mut self, pos: Vec2) -> EntityId {
        self.insert_with(|id| Entity::Enemy(Enemy::new(id, pos)))
    }

    pub fn spawn_shot(&mut self, pos: Vec2) -> EntityId {
        self.insert_with(|id| Entity::Shot(Shot::new(id, pos)))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn player(&self, id: EntityId) -> Option<&Player> {
        match self.entities.get(&id) {
            Some(Entity::Player(p)) => Some(p),
            _ => None,
        }
    }

    pub fn player_mut(&mut self, id: EntityId) -> Option<&mut Player> {
        match self.entities.get_mut(&id) {
            Some(Entity::Player(p)) => Some(p),
            _ => None,
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Live entities in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(move |e| e.is_kind(kind))
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.iter_kind(kind).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Ids present right now; entities created after this call are not included
    pub fn snapshot(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    /// Temporarily detach an entity so it can be updated against the rest
    pub(crate) fn take(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Reattach an entity detached by [`take`](Self::take)
    pub(crate) fn restore(&mut self, entity: Entity) {
        self.entities.insert(entity.id(), entity);
    }

    /// Queue an entity for removal at the end of the step
    pub fn mark_for_removal(&mut self, id: EntityId) {
        if !self.pending_removal.contains(&id) {
            self.pending_removal.push(id);
        }
    }

    pub fn is_pending_removal(&self, id: EntityId) -> bool {
        self.pending_removal.contains(&id)
    }

    pub fn pending_removal(&self) -> &[EntityId] {
        &self.pending_removal
    }

    /// Drop every queued entity and clear the queue; returns how many were removed
    pub fn purge_removed(&mut self) -> usize {
        let mut removed = 0;
        for id in self.pending_removal.drain(..) {
            if self.entities.remove(&id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Remove every entity. Id allocation continues from where it was so ids
    /// are never handed out twice.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending_removal.clear();
    }
}
