//! Collision detection and resolution
//!
//! Detection is a single closed-interval AABB overlap test. Resolution is a fixed
//! table keyed by the ordered pair of collider kinds; a detection pass only records
//! effects into a [`CollisionOutcome`], the tick applies them afterward in one batch.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Entity, EntityId, EntityKind};
use super::frame::{Frame, WallSide};
use super::registry::Registry;

/// Closed-interval rectangle intersection. Touching edges count as overlap.
#[inline]
pub fn overlaps(a: Aabb, b: Aabb) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

/// Collision roles; walls are split by the boundary they guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderKind {
    Bullet,
    Enemy,
    SideWall,
    BottomWall,
}

impl ColliderKind {
    /// Role of a live entity, if it collides at all
    pub fn of_entity(kind: EntityKind) -> Option<Self> {
        match kind {
            EntityKind::Bullet => Some(ColliderKind::Bullet),
            EntityKind::Enemy => Some(ColliderKind::Enemy),
            EntityKind::Gun | EntityKind::Wall => None,
        }
    }

    pub fn of_wall(side: WallSide) -> Self {
        match side {
            WallSide::Left | WallSide::Right => ColliderKind::SideWall,
            WallSide::Bottom => ColliderKind::BottomWall,
        }
    }
}

/// Effect of one resolved pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub destroy_first: bool,
    pub destroy_second: bool,
    /// Mirror the first entity's heading
    pub reflect_first: bool,
    pub score_delta: u32,
    pub life_delta: i32,
}

/// Resolution table. Pairs not listed have no effect.
pub const RESOLUTION_TABLE: [((ColliderKind, ColliderKind), Resolution); 3] = [
    (
        (ColliderKind::Bullet, ColliderKind::Enemy),
        Resolution {
            destroy_first: true,
            destroy_second: true,
            reflect_first: false,
            score_delta: 1,
            life_delta: 0,
        },
    ),
    (
        (ColliderKind::Bullet, ColliderKind::SideWall),
        Resolution {
            destroy_first: false,
            destroy_second: false,
            reflect_first: true,
            score_delta: 0,
            life_delta: 0,
        },
    ),
    (
        (ColliderKind::Enemy, ColliderKind::BottomWall),
        Resolution {
            destroy_first: true,
            destroy_second: false,
            reflect_first: false,
            score_delta: 0,
            life_delta: -1,
        },
    ),
];

pub fn resolution_for(first: ColliderKind, second: ColliderKind) -> Option<Resolution> {
    RESOLUTION_TABLE
        .iter()
        .find(|(pair, _)| *pair == (first, second))
        .map(|(_, resolution)| *resolution)
}

/// The second party of a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Entity(EntityId),
    Wall(WallSide),
}

/// A detected, resolved pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub first: EntityId,
    pub second: Target,
    pub kinds: (ColliderKind, ColliderKind),
}

/// Effects accumulated over one detection pass, not yet applied
#[derive(Debug, Clone, Default)]
pub struct CollisionOutcome {
    pub collisions: Vec<Collision>,
    pub destroyed: HashSet<EntityId>,
    pub reflected: Vec<EntityId>,
    pub score_delta: u32,
    pub life_delta: i32,
}

impl CollisionOutcome {
    pub fn is_destroyed(&self, id: EntityId) -> bool {
        self.destroyed.contains(&id)
    }

    /// Look up the pair in the table and record its effect
    fn record(&mut self, first: &Entity, second: Target, second_kind: ColliderKind) {
        let Some(first_kind) = ColliderKind::of_entity(first.kind) else {
            return;
        };
        let Some(resolution) = resolution_for(first_kind, second_kind) else {
            return;
        };

        if resolution.destroy_first {
            self.destroyed.insert(first.id);
        }
        if let (true, Target::Entity(id)) = (resolution.destroy_second, second) {
            self.destroyed.insert(id);
        }
        if resolution.reflect_first {
            self.reflected.push(first.id);
        }
        self.score_delta += resolution.score_delta;
        self.life_delta += resolution.life_delta;
        self.collisions.push(Collision {
            first: first.id,
            second,
            kinds: (first_kind, second_kind),
        });
    }
}

/// Run every pairwise check for the current positions.
///
/// Order: bullets × enemies, bullets × side walls, enemies × bottom wall. An entity
/// recorded as destroyed is skipped by every later check in the same pass, so one
/// bullet never takes out two enemies and a destroyed enemy never costs a life.
pub fn detect(registry: &Registry, frame: &Frame) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for bullet in registry.bullets() {
        for enemy in registry.enemies() {
            if outcome.is_destroyed(bullet.id) {
                break;
            }
            if outcome.is_destroyed(enemy.id) {
                continue;
            }
            if overlaps(bullet.aabb(), enemy.aabb()) {
                outcome.record(bullet, Target::Entity(enemy.id), ColliderKind::Enemy);
            }
        }
    }

    for bullet in registry.bullets() {
        for side in [WallSide::Left, WallSide::Right] {
            if outcome.is_destroyed(bullet.id) {
                break;
            }
            // Only a bullet heading into the wall bounces; once mirrored it is moving
            // away and a lingering overlap is ignored.
            if side.is_approached_by(bullet.vel)
                && overlaps(bullet.aabb(), frame.wall(side).aabb())
            {
                outcome.record(bullet, Target::Wall(side), ColliderKind::of_wall(side));
            }
        }
    }

    let bottom = frame.wall(WallSide::Bottom).aabb();
    for enemy in registry.enemies() {
        if outcome.is_destroyed(enemy.id) {
            continue;
        }
        if overlaps(enemy.aabb(), bottom) {
            outcome.record(
                enemy,
                Target::Wall(WallSide::Bottom),
                ColliderKind::BottomWall,
            );
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;

    fn rect(x1: f32, y1: f32, x2: f32, y2: f32) -> Aabb {
        Aabb::from_corners(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    fn setup() -> (Registry, Frame) {
        let mut registry = Registry::new();
        let frame = Frame::new(600.0, 800.0, || registry.next_entity_id());
        (registry, frame)
    }

    fn add_enemy(registry: &mut Registry, pos: Vec2) -> EntityId {
        let id = registry.next_entity_id();
        registry.queue_enemy(Entity::enemy(id, pos, 30.0, 20.0));
        registry.apply_pending();
        id
    }

    fn add_bullet(registry: &mut Registry, pos: Vec2, angle: f32) -> EntityId {
        let id = registry.next_entity_id();
        registry.add_bullet(Entity::bullet(id, pos, 20.0, 50.0, angle));
        id
    }

    #[test]
    fn test_overlap_basic() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(a, rect(5.0, 5.0, 15.0, 15.0)));
        assert!(overlaps(a, rect(2.0, 2.0, 3.0, 3.0)));
        assert!(!overlaps(a, rect(11.0, 0.0, 20.0, 10.0)));
        assert!(!overlaps(a, rect(0.0, 10.5, 10.0, 20.0)));
    }

    #[test]
    fn test_touching_edges_collide() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(a, rect(10.0, 0.0, 20.0, 10.0)));
        assert!(overlaps(a, rect(10.0, 10.0, 20.0, 20.0)));
        // Degenerate box lying on the edge
        assert!(overlaps(a, rect(0.0, 10.0, 600.0, 10.0)));
    }

    #[test]
    fn test_resolution_table() {
        let hit = resolution_for(ColliderKind::Bullet, ColliderKind::Enemy).unwrap();
        assert!(hit.destroy_first && hit.destroy_second);
        assert_eq!(hit.score_delta, 1);

        let bounce = resolution_for(ColliderKind::Bullet, ColliderKind::SideWall).unwrap();
        assert!(bounce.reflect_first && !bounce.destroy_first);

        let breach = resolution_for(ColliderKind::Enemy, ColliderKind::BottomWall).unwrap();
        assert!(breach.destroy_first);
        assert_eq!(breach.life_delta, -1);

        assert!(resolution_for(ColliderKind::Enemy, ColliderKind::SideWall).is_none());
        assert!(resolution_for(ColliderKind::Bullet, ColliderKind::BottomWall).is_none());
    }

    #[test]
    fn test_one_bullet_destroys_one_enemy() {
        let (mut registry, frame) = setup();
        let e1 = add_enemy(&mut registry, Vec2::new(250.0, 300.0));
        let e2 = add_enemy(&mut registry, Vec2::new(260.0, 300.0));
        let b = add_bullet(&mut registry, Vec2::new(255.0, 300.0), 0.0);

        let outcome = detect(&registry, &frame);
        assert_eq!(outcome.score_delta, 1);
        assert!(outcome.is_destroyed(b));
        assert!(outcome.is_destroyed(e1));
        assert!(!outcome.is_destroyed(e2));
        assert_eq!(outcome.collisions.len(), 1);
    }

    #[test]
    fn test_two_bullets_one_enemy() {
        let (mut registry, frame) = setup();
        let e = add_enemy(&mut registry, Vec2::new(250.0, 300.0));
        let first = add_bullet(&mut registry, Vec2::new(250.0, 300.0), 0.0);
        let second = add_bullet(&mut registry, Vec2::new(255.0, 305.0), 0.0);

        let outcome = detect(&registry, &frame);
        assert_eq!(outcome.score_delta, 1);
        assert_eq!(outcome.collisions.len(), 1);
        assert_eq!(outcome.collisions[0].first, first);
        assert!(outcome.is_destroyed(first));
        assert!(outcome.is_destroyed(e));
        assert!(!outcome.is_destroyed(second));
    }

    #[test]
    fn test_bullet_past_wall_edge_still_reflects() {
        let (mut registry, frame) = setup();
        // Center well beyond x = 600; the box no longer touches the edge line
        let deep = add_bullet(&mut registry, Vec2::new(630.0, 400.0), 45.0);
        let outcome = detect(&registry, &frame);
        assert_eq!(outcome.reflected, vec![deep]);
    }

    #[test]
    fn test_destroyed_enemy_cannot_breach() {
        let (mut registry, frame) = setup();
        let e = add_enemy(&mut registry, Vec2::new(250.0, 790.0));
        add_bullet(&mut registry, Vec2::new(250.0, 780.0), 0.0);

        let outcome = detect(&registry, &frame);
        assert!(outcome.is_destroyed(e));
        assert_eq!(outcome.score_delta, 1);
        assert_eq!(outcome.life_delta, 0);
    }

    #[test]
    fn test_enemy_breach_costs_life() {
        let (mut registry, frame) = setup();
        let e = add_enemy(&mut registry, Vec2::new(50.0, 790.0));
        let outcome = detect(&registry, &frame);
        assert!(outcome.is_destroyed(e));
        assert_eq!(outcome.life_delta, -1);
        assert_eq!(
            outcome.collisions[0].second,
            Target::Wall(WallSide::Bottom)
        );
    }

    #[test]
    fn test_side_wall_reflects_only_when_approaching() {
        let (mut registry, frame) = setup();
        let toward = add_bullet(&mut registry, Vec2::new(595.0, 400.0), 45.0);
        let away = add_bullet(&mut registry, Vec2::new(5.0, 300.0), 45.0);
        let left = add_bullet(&mut registry, Vec2::new(5.0, 200.0), -45.0);

        let outcome = detect(&registry, &frame);
        assert_eq!(outcome.reflected, vec![toward, left]);
        assert!(!outcome.reflected.contains(&away));
        assert!(outcome.destroyed.is_empty());
    }

    fn arb_rect() -> impl Strategy<Value = Aabb> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| rect(x, y, x + w, y + h))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn prop_overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(overlaps(a, b), overlaps(b, a));
        }

        #[test]
        fn prop_rect_overlaps_itself(a in arb_rect()) {
            prop_assert!(overlaps(a, a));
        }
    }
}
