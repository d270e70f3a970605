//! Enemy spawner
//!
//! A cooperative virtual timer: the tick loop polls it once per tick, and when the
//! countdown runs out it queues one enemy into the registry and re-arms with a fresh
//! random delay. All randomness comes from a seeded PCG stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityId};
use super::registry::Registry;
use crate::error::ConfigError;
use crate::settings::GameConfig;

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    columns: Vec<f32>,
    enemy_size: f32,
    enemy_speed: f32,
    /// Delay bounds, already converted to ticks
    min_delay_ticks: u32,
    max_delay_ticks: u32,
    ticks_until_spawn: u32,
    /// Timer running; a stopped spawner never produces another enemy
    active: bool,
    /// Timer-driven spawns only happen when set; forced spawns ignore it
    auto: bool,
    spawned: u64,
}

impl Spawner {
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        if config.spawn_columns.is_empty() {
            return Err(ConfigError::EmptySpawnColumns);
        }
        let min_delay_ticks = config.secs_to_ticks(config.spawn_delay_min_secs);
        let max_delay_ticks = config
            .secs_to_ticks(config.spawn_delay_max_secs)
            .max(min_delay_ticks);

        let mut spawner = Self {
            rng: Pcg32::seed_from_u64(seed),
            columns: config.spawn_columns.clone(),
            enemy_size: config.enemy_size,
            enemy_speed: config.enemy_speed,
            min_delay_ticks,
            max_delay_ticks,
            ticks_until_spawn: 0,
            active: true,
            auto: config.auto_spawn,
            spawned: 0,
        };
        spawner.rearm();
        Ok(spawner)
    }

    fn rearm(&mut self) {
        self.ticks_until_spawn = self
            .rng
            .random_range(self.min_delay_ticks..=self.max_delay_ticks);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn ticks_until_spawn(&self) -> u32 {
        self.ticks_until_spawn
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Halt the timer for good
    pub fn stop(&mut self) {
        if self.active {
            self.active = false;
            log::debug!("Spawner stopped after {} enemies", self.spawned);
        }
    }

    /// Advance the timer one tick; queue an enemy if it fired
    pub fn poll(&mut self, registry: &mut Registry) -> Option<EntityId> {
        if !self.active || !self.auto {
            return None;
        }
        self.ticks_until_spawn = self.ticks_until_spawn.saturating_sub(1);
        if self.ticks_until_spawn > 0 {
            return None;
        }
        self.rearm();
        self.spawn_into(registry)
    }

    /// Queue an enemy now at a random column, `y = 0`
    pub fn spawn_into(&mut self, registry: &mut Registry) -> Option<EntityId> {
        if !self.active {
            return None;
        }
        let x = self.columns[self.rng.random_range(0..self.columns.len())];
        let id = registry.next_entity_id();
        registry.queue_enemy(Entity::enemy(
            id,
            Vec2::new(x, 0.0),
            self.enemy_size,
            self.enemy_speed,
        ));
        self.spawned += 1;
        log::debug!("Enemy {} queued at column x={}", id, x);
        Some(id)
    }
}
