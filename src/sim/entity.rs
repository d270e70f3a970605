//! Entity and geometry model
//!
//! Every game object is one [`Entity`] tagged by [`EntityKind`]. What an entity can
//! do is looked up from its kind ([`EntityKind::capabilities`]) rather than encoded
//! in separate types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::heading_to_velocity;

/// Stable entity identifier; allocated in increasing order, so it is also creation order
pub type EntityId = u32;

/// Game-object kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Bullet,
    Enemy,
    Gun,
    Wall,
}

/// What the simulation is allowed to do with an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Stepped by the tick loop
    pub movable: bool,
    /// Takes part in collision checks
    pub collidable: bool,
}

impl EntityKind {
    pub fn capabilities(self) -> Capabilities {
        match self {
            EntityKind::Bullet | EntityKind::Enemy => Capabilities {
                movable: true,
                collidable: true,
            },
            EntityKind::Gun => Capabilities {
                movable: false,
                collidable: false,
            },
            EntityKind::Wall => Capabilities {
                movable: false,
                collidable: true,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Bullet => "bullet",
            EntityKind::Enemy => "enemy",
            EntityKind::Gun => "gun",
            EntityKind::Wall => "wall",
        }
    }
}

/// Axis-aligned bounding box `(x1, y1) - (x2, y2)`, with `x1 <= x2` and `y1 <= y2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from two corners in any order
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// `(x1, y1, x2, y2)`
    pub fn to_tuple(self) -> (f32, f32, f32, f32) {
        (self.min.x, self.min.y, self.max.x, self.max.y)
    }
}

/// A game object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Center of the bounding box
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
    /// Displacement per tick (zero for static kinds)
    pub vel: Vec2,
    /// Firing heading in degrees (bullets only, 0 = straight up)
    pub angle: f32,
    /// Scalar speed the velocity was derived from
    pub speed: f32,
}

impl Entity {
    fn with_kind(id: EntityId, kind: EntityKind, pos: Vec2, size: Vec2) -> Self {
        assert!(
            size.x >= 0.0 && size.y >= 0.0,
            "{} {} constructed with negative size {:?}",
            kind.as_str(),
            id,
            size
        );
        Self {
            id,
            kind,
            pos,
            size,
            vel: Vec2::ZERO,
            angle: 0.0,
            speed: 0.0,
        }
    }

    /// A bullet heading `angle` degrees off vertical
    pub fn bullet(id: EntityId, pos: Vec2, size: f32, speed: f32, angle: f32) -> Self {
        assert!(speed > 0.0, "bullet {} constructed with speed {}", id, speed);
        let mut bullet = Self::with_kind(id, EntityKind::Bullet, pos, Vec2::splat(size));
        bullet.speed = speed;
        bullet.angle = angle;
        bullet.vel = heading_to_velocity(angle, speed);
        bullet
    }

    /// An enemy descending `speed` units per tick
    pub fn enemy(id: EntityId, pos: Vec2, size: f32, speed: f32) -> Self {
        assert!(speed > 0.0, "enemy {} constructed with speed {}", id, speed);
        let mut enemy = Self::with_kind(id, EntityKind::Enemy, pos, Vec2::splat(size));
        enemy.speed = speed;
        enemy.vel = Vec2::new(0.0, speed);
        enemy
    }

    pub fn gun(id: EntityId, pos: Vec2, size: f32) -> Self {
        Self::with_kind(id, EntityKind::Gun, pos, Vec2::splat(size))
    }

    /// A static wall spanning two corners (zero thickness is allowed)
    pub fn wall(id: EntityId, a: Vec2, b: Vec2) -> Self {
        let aabb = Aabb::from_corners(a, b);
        Self::with_kind(
            id,
            EntityKind::Wall,
            (aabb.min + aabb.max) * 0.5,
            aabb.max - aabb.min,
        )
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    /// Advance one tick. Static kinds do not move.
    pub fn step(&mut self) {
        if self.capabilities().movable {
            self.pos += self.vel;
        }
    }

    /// Mirror the heading and re-derive the velocity (dx flips, dy is kept)
    pub fn reflect(&mut self) {
        self.angle = -self.angle;
        self.vel = heading_to_velocity(self.angle, self.speed);
    }
}
