//! Play area boundaries
//!
//! Three walls bound the play area: left of `x = 0`, right of `x = width` and below
//! `y = height`. Each wall is a slab as deep as the frame dimension it guards, so
//! anything moving less than that per tick lands inside the slab instead of
//! stepping over it. The top edge is open; bullets leaving through it simply expire.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Which boundary a wall is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
    Bottom,
}

impl WallSide {
    /// Whether something moving with `vel` is heading into this wall
    pub fn is_approached_by(self, vel: Vec2) -> bool {
        match self {
            WallSide::Left => vel.x < 0.0,
            WallSide::Right => vel.x > 0.0,
            WallSide::Bottom => vel.y > 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    left: Entity,
    right: Entity,
    bottom: Entity,
}

impl Frame {
    /// Build the frame walls. Wall ids come from the caller's allocator.
    pub fn new(width: f32, height: f32, mut next_id: impl FnMut() -> u32) -> Self {
        Self {
            width,
            height,
            left: Entity::wall(next_id(), Vec2::new(-width, 0.0), Vec2::new(0.0, height)),
            right: Entity::wall(
                next_id(),
                Vec2::new(width, 0.0),
                Vec2::new(2.0 * width, height),
            ),
            bottom: Entity::wall(
                next_id(),
                Vec2::new(0.0, height),
                Vec2::new(width, 2.0 * height),
            ),
        }
    }

    pub fn wall(&self, side: WallSide) -> &Entity {
        match side {
            WallSide::Left => &self.left,
            WallSide::Right => &self.right,
            WallSide::Bottom => &self.bottom,
        }
    }

    /// Where the gun sits: centered on the bottom edge
    pub fn gun_anchor(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_boxes() {
        let mut id = 0;
        let frame = Frame::new(600.0, 800.0, || {
            id += 1;
            id
        });
        assert_eq!(
            frame.wall(WallSide::Left).aabb().to_tuple(),
            (-600.0, 0.0, 0.0, 800.0)
        );
        assert_eq!(
            frame.wall(WallSide::Right).aabb().to_tuple(),
            (600.0, 0.0, 1200.0, 800.0)
        );
        assert_eq!(
            frame.wall(WallSide::Bottom).aabb().to_tuple(),
            (0.0, 800.0, 600.0, 1600.0)
        );
        assert_eq!(frame.gun_anchor(), Vec2::new(300.0, 800.0));
    }

    #[test]
    fn test_approach_direction() {
        assert!(WallSide::Left.is_approached_by(Vec2::new(-1.0, -5.0)));
        assert!(!WallSide::Left.is_approached_by(Vec2::new(1.0, -5.0)));
        assert!(WallSide::Right.is_approached_by(Vec2::new(1.0, -5.0)));
        assert!(!WallSide::Right.is_approached_by(Vec2::new(0.0, -5.0)));
        assert!(WallSide::Bottom.is_approached_by(Vec2::new(0.0, 20.0)));
    }
}
