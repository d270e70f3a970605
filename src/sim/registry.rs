//! Live entity registry
//!
//! Owns every bullet and enemy in play. Collections are kept sorted by id
//! (creation order) so iteration is stable from tick to tick.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    /// Live bullets, oldest first
    bullets: Vec<Entity>,
    /// Live enemies, oldest first
    enemies: Vec<Entity>,
    /// Enemies spawned since the last tick, waiting to join the live set
    pending_enemies: Vec<Entity>,
    /// Next entity ID
    next_id: EntityId,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn bullets(&self) -> &[Entity] {
        &self.bullets
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn pending_enemies(&self) -> &[Entity] {
        &self.pending_enemies
    }

    pub fn bullet_count(&self) -> usize {
        self.bullets.len()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.bullets.iter().chain(&self.enemies).any(|e| e.id == id)
    }

    pub fn add_bullet(&mut self, bullet: Entity) {
        debug_assert_eq!(bullet.kind, EntityKind::Bullet);
        self.bullets.push(bullet);
    }

    /// Remove and return the oldest live bullet
    pub fn evict_oldest_bullet(&mut self) -> Option<Entity> {
        if self.bullets.is_empty() {
            None
        } else {
            Some(self.bullets.remove(0))
        }
    }

    /// Queue an enemy for the next tick's spawn step
    pub fn queue_enemy(&mut self, enemy: Entity) {
        debug_assert_eq!(enemy.kind, EntityKind::Enemy);
        self.pending_enemies.push(enemy);
    }

    /// Move pending enemies into the live set, returning their IDs
    pub fn apply_pending(&mut self) -> Vec<EntityId> {
        let ids = self.pending_enemies.iter().map(|e| e.id).collect();
        self.enemies.append(&mut self.pending_enemies);
        ids
    }

    /// Step every movable live entity by its velocity
    pub fn step_all(&mut self) {
        for entity in self.bullets.iter_mut().chain(self.enemies.iter_mut()) {
            entity.step();
        }
    }

    pub fn bullet_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.bullets.iter_mut().find(|b| b.id == id)
    }

    /// Remove every bullet and enemy whose ID is in `ids` in one pass
    pub fn remove_batch(&mut self, ids: &HashSet<EntityId>) {
        if ids.is_empty() {
            return;
        }
        self.bullets.retain(|b| !ids.contains(&b.id));
        self.enemies.retain(|e| !ids.contains(&e.id));
    }

    /// Remove bullets matching `expired`, returning their IDs
    pub fn expire_bullets(&mut self, expired: impl Fn(&Entity) -> bool) -> Vec<EntityId> {
        let mut ids = Vec::new();
        self.bullets.retain(|b| {
            if expired(b) {
                ids.push(b.id);
                false
            } else {
                true
            }
        });
        ids
    }
}
