//! Fixed-step simulation tick
//!
//! One call advances the game by exactly one discrete step:
//! spawn → move → detect → resolve → expire → evaluate terminal.

use serde::{Deserialize, Serialize};

use super::collision::{self, Collision, ColliderKind, Target};
use super::entity::EntityId;
use super::frame::WallSide;
use super::state::Game;

/// Something that happened during a tick, in the order it was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A spawned enemy joined the live set
    EnemySpawned { enemy: EntityId },
    /// A bullet and an enemy destroyed each other
    EnemyDestroyed { bullet: EntityId, enemy: EntityId },
    /// A bullet bounced off a side wall
    BulletReflected { bullet: EntityId, wall: WallSide },
    /// An enemy reached the bottom boundary
    EnemyBreached { enemy: EntityId },
    /// A bullet left through the top of the play area
    BulletExpired { bullet: EntityId },
    /// Life ran out; emitted exactly once per game
    GameOver { score: u32 },
}

impl GameEvent {
    fn from_collision(c: &Collision) -> Option<Self> {
        match (c.kinds, c.second) {
            ((ColliderKind::Bullet, ColliderKind::Enemy), Target::Entity(enemy)) => {
                Some(GameEvent::EnemyDestroyed {
                    bullet: c.first,
                    enemy,
                })
            }
            ((ColliderKind::Bullet, ColliderKind::SideWall), Target::Wall(wall)) => {
                Some(GameEvent::BulletReflected {
                    bullet: c.first,
                    wall,
                })
            }
            ((ColliderKind::Enemy, ColliderKind::BottomWall), _) => {
                Some(GameEvent::EnemyBreached { enemy: c.first })
            }
            _ => None,
        }
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number after the step (unchanged if nothing ran)
    pub tick: u64,
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn is_game_over(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    }
}

/// Advance the game by one step
pub fn tick(game: &mut Game) -> TickReport {
    // Don't tick once the game is over
    if !game.player.is_running() {
        return TickReport {
            tick: game.time_ticks,
            events: Vec::new(),
        };
    }

    game.time_ticks += 1;
    let mut events = Vec::new();

    // 1. Enemies spawned since the last tick join the live set
    game.spawner.poll(&mut game.registry);
    events.extend(
        game.registry
            .apply_pending()
            .into_iter()
            .map(|enemy| GameEvent::EnemySpawned { enemy }),
    );

    // 2. Movement
    game.gun.snap_to(game.frame.gun_anchor());
    game.registry.step_all();

    // 3. Collision checks; nothing is mutated yet
    let outcome = collision::detect(&game.registry, &game.frame);

    // 4. Apply effects in one batch
    events.extend(outcome.collisions.iter().filter_map(GameEvent::from_collision));
    for &id in &outcome.reflected {
        if let Some(bullet) = game.registry.bullet_mut(id) {
            bullet.reflect();
        }
    }
    game.registry.remove_batch(&outcome.destroyed);
    game.player.apply(outcome.score_delta, outcome.life_delta);

    // 5. Bullets past the top edge expire
    events.extend(
        game.registry
            .expire_bullets(|b| b.pos.y < 0.0)
            .into_iter()
            .map(|bullet| GameEvent::BulletExpired { bullet }),
    );

    // 6. Terminal check
    if game.player.life() <= 0 && game.player.end() {
        game.spawner.stop();
        events.push(GameEvent::GameOver {
            score: game.player.score(),
        });
        log::info!(
            "Game over at tick {} with score {}",
            game.time_ticks,
            game.player.score()
        );
    }

    for event in &events {
        log::debug!("tick {}: {:?}", game.time_ticks, event);
    }

    TickReport {
        tick: game.time_ticks,
        events,
    }
}
