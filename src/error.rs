//! Startup configuration errors
//!
//! Gameplay itself never fails; everything here is caught before the first tick.

/// Error type for loading and validating a [`crate::GameConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("spawn column set is empty; the spawner cannot place enemies")]
    EmptySpawnColumns,
    #[error("{entity} size must be non-negative, got {width}x{height}")]
    NegativeSize {
        entity: &'static str,
        width: f32,
        height: f32,
    },
    #[error("{entity} speed must be positive, got {speed}")]
    NonPositiveSpeed { entity: &'static str, speed: f32 },
    #[error("spawn column {0} lies outside the frame")]
    SpawnColumnOutOfFrame(f32),
    #[error("{entity} speed {speed} exceeds the wall depth {limit}")]
    SpeedExceedsFrame {
        entity: &'static str,
        speed: f32,
        limit: f32,
    },
    #[error("max_bullet must be at least 1")]
    ZeroBulletCapacity,
    #[error("invalid spawn delay range: {min}..={max} seconds")]
    InvalidSpawnDelay { min: f32, max: f32 },
    #[error("invalid frame size: {width}x{height}")]
    InvalidFrame { width: f32, height: f32 },
    #[error("invalid tick rate: {0} Hz")]
    InvalidTickRate(f32),
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
