//! Shooting Sim - simulation kernel for a top-down shooting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, tick loop)
//! - `runner`: Fixed-cadence driver that owns a game on a worker thread
//! - `settings`: Data-driven game configuration
//! - `error`: Configuration errors

pub mod error;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use runner::GameRunner;
pub use settings::GameConfig;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play area (frame) dimensions
    pub const FRAME_WIDTH: f32 = 600.0;
    pub const FRAME_HEIGHT: f32 = 800.0;

    /// Enemy spawn columns (x of the enemy center)
    pub const SPAWN_COLUMNS: [f32; 5] = [50.0, 150.0, 250.0, 350.0, 450.0];

    /// Enemy defaults - straight vertical descent
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_SPEED: f32 = 20.0;

    /// Bullet defaults
    pub const BULLET_SIZE: f32 = 20.0;
    pub const BULLET_SPEED: f32 = 50.0;

    /// Gun defaults
    pub const GUN_SIZE: f32 = 20.0;
    pub const MAX_BULLET: usize = 3;

    pub const INITIAL_LIFE: i32 = 3;

    /// Spawn delay range (simulated seconds)
    pub const SPAWN_DELAY_MIN_SECS: f32 = 2.0;
    pub const SPAWN_DELAY_MAX_SECS: f32 = 5.0;

    /// Ticks per simulated second
    pub const TICK_RATE_HZ: f32 = 1.0;
}

/// Velocity of a projectile fired at `angle_deg` (0 = straight up, y grows downward)
#[inline]
pub fn heading_to_velocity(angle_deg: f32, speed: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(speed * rad.sin(), -speed * rad.cos())
}
