//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, I/O or threading

pub mod collision;
pub mod entity;
pub mod frame;
pub mod registry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{
    Collision, CollisionOutcome, ColliderKind, RESOLUTION_TABLE, Resolution, Target, detect,
    overlaps, resolution_for,
};
pub use entity::{Aabb, Capabilities, Entity, EntityId, EntityKind};
pub use frame::{Frame, WallSide};
pub use registry::Registry;
pub use spawner::Spawner;
pub use state::{EntityView, Game, GamePhase, Gun, PlayerState, Shot, Snapshot};
pub use tick::{GameEvent, TickReport, tick};
