//! Game state and the core operations
//!
//! [`Game`] is the simulation context: it owns the gun, the frame, the registry,
//! the spawner and the player's status, and is passed explicitly to everything
//! that needs them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};
use super::frame::Frame;
use super::registry::Registry;
use super::spawner::Spawner;
use super::tick::{TickReport, tick};
use crate::error::ConfigError;
use crate::settings::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended (terminal)
    GameOver,
}

/// Score, lives and phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    score: u32,
    life: i32,
    phase: GamePhase,
}

impl PlayerState {
    pub fn new(initial_life: i32) -> Self {
        Self {
            score: 0,
            life: initial_life,
            phase: GamePhase::Running,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn life(&self) -> i32 {
        self.life
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Apply accumulated collision deltas. Only the tick's resolution step calls this.
    pub(crate) fn apply(&mut self, score_delta: u32, life_delta: i32) {
        self.score += score_delta;
        self.life += life_delta;
    }

    /// Enter `GameOver`; returns false if already there
    pub(crate) fn end(&mut self) -> bool {
        let was_running = self.is_running();
        self.phase = GamePhase::GameOver;
        was_running
    }
}

/// The player's gun: a fixed anchor plus the bullet capacity it enforces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gun {
    pub entity: Entity,
    pub max_bullet: usize,
    bullet_size: f32,
    bullet_speed: f32,
}

/// Result of one `fire` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shot {
    pub fired: EntityId,
    /// Oldest bullet dropped to make room
    pub evicted: Option<EntityId>,
}

impl Gun {
    pub fn new(entity: Entity, config: &GameConfig) -> Self {
        Self {
            entity,
            max_bullet: config.max_bullet,
            bullet_size: config.bullet_size,
            bullet_speed: config.bullet_speed,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.entity.pos
    }

    /// Jump straight to `anchor` (no smoothing)
    pub fn snap_to(&mut self, anchor: Vec2) {
        self.entity.pos = anchor;
    }

    /// Fire from the current position, evicting the oldest bullet when at capacity
    pub fn fire(&self, registry: &mut Registry, angle: f32) -> Shot {
        let mut evicted = None;
        while registry.bullet_count() >= self.max_bullet {
            match registry.evict_oldest_bullet() {
                Some(old) => evicted = Some(old.id),
                None => break,
            }
        }
        let id = registry.next_entity_id();
        registry.add_bullet(Entity::bullet(
            id,
            self.pos(),
            self.bullet_size,
            self.bullet_speed,
            angle,
        ));
        Shot { fired: id, evicted }
    }
}

/// Position of one entity as seen by observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub pos: Vec2,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            pos: entity.pos,
        }
    }
}

/// Whole-tick view of the game for renderers and persistence collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub score: u32,
    pub life: i32,
    pub running: bool,
    pub gun: Vec2,
    pub bullets: Vec<EntityView>,
    pub enemies: Vec<EntityView>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Complete game context
#[derive(Debug, Clone)]
pub struct Game {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) config: GameConfig,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    pub(crate) player: PlayerState,
    pub(crate) gun: Gun,
    pub(crate) frame: Frame,
    pub(crate) registry: Registry,
    pub(crate) spawner: Spawner,
}

impl Game {
    /// Create a new game; fails only on invalid configuration
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut registry = Registry::new();
        let frame = Frame::new(config.frame_width, config.frame_height, || {
            registry.next_entity_id()
        });
        let gun_id = registry.next_entity_id();
        let gun = Gun::new(
            Entity::gun(gun_id, frame.gun_anchor(), config.gun_size),
            &config,
        );
        let spawner = Spawner::new(&config, seed)?;

        log::info!(
            "New game: {}x{} frame, {} spawn columns, seed {}",
            config.frame_width,
            config.frame_height,
            config.spawn_columns.len(),
            seed
        );

        Ok(Self {
            seed,
            player: PlayerState::new(config.initial_life),
            config,
            time_ticks: 0,
            gun,
            frame,
            registry,
            spawner,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn gun(&self) -> &Gun {
        &self.gun
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn is_running(&self) -> bool {
        self.player.is_running()
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> TickReport {
        tick(self)
    }

    /// Fire a bullet at `angle` degrees. Ignored once the game is over or when the
    /// angle is not a finite number.
    pub fn fire(&mut self, angle: f32) -> Option<Shot> {
        if !self.is_running() {
            log::debug!("Ignoring fire({}) after game over", angle);
            return None;
        }
        if !angle.is_finite() {
            log::warn!("Ignoring fire({}): angle must be finite", angle);
            return None;
        }
        let shot = self.gun.fire(&mut self.registry, angle);
        if let Some(old) = shot.evicted {
            log::debug!("Bullet {} evicted to make room", old);
        }
        log::debug!("Bullet {} fired at {} degrees", shot.fired, angle);
        Some(shot)
    }

    /// Force an enemy spawn; it joins the live set on the next tick
    pub fn spawn_enemy(&mut self) -> Option<EntityId> {
        if !self.is_running() {
            return None;
        }
        self.spawner.spawn_into(&mut self.registry)
    }

    /// End the game: the spawner stops and later ticks do nothing
    pub fn stop(&mut self) {
        self.spawner.stop();
        if self.player.end() {
            log::info!(
                "Game stopped at tick {} (score {}, life {})",
                self.time_ticks,
                self.player.score(),
                self.player.life()
            );
        }
    }

    pub fn query_state(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            score: self.player.score(),
            life: self.player.life(),
            running: self.is_running(),
            gun: self.gun.pos(),
            bullets: self.registry.bullets().iter().map(EntityView::from).collect(),
            enemies: self.registry.enemies().iter().map(EntityView::from).collect(),
        }
    }
}
