//! Game configuration
//!
//! Loaded from a JSON file on startup. Missing fields fall back to the defaults in
//! [`crate::consts`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Play area ===
    pub frame_width: f32,
    pub frame_height: f32,

    // === Enemies ===
    /// Allowed spawn x positions (enemy center)
    pub spawn_columns: Vec<f32>,
    pub enemy_size: f32,
    /// Downward distance per tick
    pub enemy_speed: f32,

    // === Gun / bullets ===
    pub bullet_size: f32,
    /// Distance per tick along the firing heading
    pub bullet_speed: f32,
    pub gun_size: f32,
    /// Live bullet cap; the oldest bullet is evicted on overflow
    pub max_bullet: usize,

    // === Player ===
    pub initial_life: i32,

    // === Spawner ===
    /// Whether the background spawner runs at all (manual spawns still work)
    pub auto_spawn: bool,
    pub spawn_delay_min_secs: f32,
    pub spawn_delay_max_secs: f32,

    // === Timing ===
    /// Ticks per simulated second
    pub tick_rate_hz: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_width: FRAME_WIDTH,
            frame_height: FRAME_HEIGHT,

            spawn_columns: SPAWN_COLUMNS.to_vec(),
            enemy_size: ENEMY_SIZE,
            enemy_speed: ENEMY_SPEED,

            bullet_size: BULLET_SIZE,
            bullet_speed: BULLET_SPEED,
            gun_size: GUN_SIZE,
            max_bullet: MAX_BULLET,

            initial_life: INITIAL_LIFE,

            auto_spawn: true,
            spawn_delay_min_secs: SPAWN_DELAY_MIN_SECS,
            spawn_delay_max_secs: SPAWN_DELAY_MAX_SECS,

            tick_rate_hz: TICK_RATE_HZ,
        }
    }
}

impl GameConfig {
    /// Check every startup invariant. Called by `Game::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.frame_width > 0.0 && self.frame_height > 0.0) {
            return Err(ConfigError::InvalidFrame {
                width: self.frame_width,
                height: self.frame_height,
            });
        }
        if self.spawn_columns.is_empty() {
            return Err(ConfigError::EmptySpawnColumns);
        }
        if let Some(&x) = self
            .spawn_columns
            .iter()
            .find(|&&x| !(0.0..=self.frame_width).contains(&x))
        {
            return Err(ConfigError::SpawnColumnOutOfFrame(x));
        }

        for (entity, size) in [
            ("enemy", self.enemy_size),
            ("bullet", self.bullet_size),
            ("gun", self.gun_size),
        ] {
            if !(size >= 0.0) {
                return Err(ConfigError::NegativeSize {
                    entity,
                    width: size,
                    height: size,
                });
            }
        }
        for (entity, speed) in [("enemy", self.enemy_speed), ("bullet", self.bullet_speed)] {
            if !(speed > 0.0) {
                return Err(ConfigError::NonPositiveSpeed { entity, speed });
            }
        }
        // Walls are one frame dimension deep; a faster step could jump clean over one
        for (entity, speed, limit) in [
            ("enemy", self.enemy_speed, self.frame_height),
            ("bullet", self.bullet_speed, self.frame_width),
        ] {
            if speed > limit {
                return Err(ConfigError::SpeedExceedsFrame {
                    entity,
                    speed,
                    limit,
                });
            }
        }

        if self.max_bullet == 0 {
            return Err(ConfigError::ZeroBulletCapacity);
        }
        let (min, max) = (self.spawn_delay_min_secs, self.spawn_delay_max_secs);
        if !(min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidSpawnDelay { min, max });
        }
        self.tick_interval()?;
        Ok(())
    }

    /// Wall-clock time between ticks when running in real time
    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        let rate = self.tick_rate_hz;
        if !(rate > 0.0 && rate.is_finite()) {
            return Err(ConfigError::InvalidTickRate(rate));
        }
        Duration::try_from_secs_f32(rate.recip()).map_err(|_| ConfigError::InvalidTickRate(rate))
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults if it is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Using default config ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Convert a delay in simulated seconds to a whole number of ticks (at least 1)
    pub fn secs_to_ticks(&self, secs: f32) -> u32 {
        ((secs * self.tick_rate_hz).ceil() as u32).max(1)
    }
}
