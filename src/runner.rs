//! Real-time driver
//!
//! A single worker thread owns the [`Game`] and ticks it on a fixed wall-clock
//! cadence. Other threads never touch the game directly: fire/spawn/stop requests
//! travel over a channel and are applied between ticks, and observers read the last
//! whole-tick [`Snapshot`].

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::sim::{Game, Snapshot};

/// Requests funneled into the tick thread
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Fire(f32),
    SpawnEnemy,
    Stop,
}

/// Handle to a game running on its own thread
pub struct GameRunner {
    commands: Sender<Command>,
    snapshot: Arc<Mutex<Snapshot>>,
    worker: Option<JoinHandle<Game>>,
}

impl GameRunner {
    /// Run `game` at its configured tick rate
    pub fn start(game: Game) -> std::io::Result<Self> {
        let interval = game
            .config()
            .tick_interval()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        Self::start_with_interval(game, interval)
    }

    /// Run `game`, ticking once per `interval`
    pub fn start_with_interval(mut game: Game, interval: Duration) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<Command>();
        let snapshot = Arc::new(Mutex::new(game.query_state()));
        let published = Arc::clone(&snapshot);

        let worker = thread::Builder::new()
            .name("sim-tick".to_string())
            .spawn(move || {
                log::info!("Tick loop started ({:?} per tick)", interval);
                loop {
                    let deadline = Instant::now() + interval;
                    if let Drain::Stop = drain_commands(&rx, &mut game, deadline) {
                        game.stop();
                        publish(&published, &game);
                        log::info!("Tick loop stopped at tick {}", game.time_ticks());
                        return game;
                    }

                    game.tick();
                    publish(&published, &game);

                    if !game.is_running() {
                        log::info!("Tick loop finished: game over");
                        return game;
                    }
                }
            })?;

        Ok(Self {
            commands: tx,
            snapshot,
            worker: Some(worker),
        })
    }

    /// Request a shot; applied before the next tick
    pub fn fire(&self, angle: f32) {
        self.send(Command::Fire(angle));
    }

    /// Request an enemy spawn; applied before the next tick
    pub fn spawn_enemy(&self) {
        self.send(Command::SpawnEnemy);
    }

    /// Latest whole-tick snapshot
    pub fn query_state(&self) -> Snapshot {
        self.snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether the tick thread has exited (game over or stopped)
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(|w| w.is_finished())
    }

    /// Stop the game and wait for the tick thread; returns the final game
    pub fn stop(mut self) -> Option<Game> {
        self.shutdown()
    }

    fn send(&self, command: Command) {
        // A closed channel means the game already ended; requests are dropped
        if self.commands.send(command).is_err() {
            log::debug!("Dropping {:?}: tick loop has exited", command);
        }
    }

    fn shutdown(&mut self) -> Option<Game> {
        let worker = self.worker.take()?;
        self.send(Command::Stop);
        match worker.join() {
            Ok(game) => Some(game),
            Err(_) => {
                log::error!("Tick thread panicked");
                None
            }
        }
    }
}

impl Drop for GameRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

enum Drain {
    Tick,
    Stop,
}

/// Apply queued requests until `deadline`. The tick is never held back by a busy
/// channel: whatever is still queued at the deadline waits for the next interval.
fn drain_commands(rx: &Receiver<Command>, game: &mut Game, deadline: Instant) -> Drain {
    loop {
        let now = Instant::now();
        if now >= deadline {
            return Drain::Tick;
        }
        match rx.recv_timeout(deadline - now) {
            Ok(Command::Fire(angle)) => {
                game.fire(angle);
            }
            Ok(Command::SpawnEnemy) => {
                game.spawn_enemy();
            }
            Ok(Command::Stop) | Err(RecvTimeoutError::Disconnected) => return Drain::Stop,
            Err(RecvTimeoutError::Timeout) => return Drain::Tick,
        }
    }
}

fn publish(slot: &Mutex<Snapshot>, game: &Game) {
    let snapshot = game.query_state();
    *slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = snapshot;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    const FAST: Duration = Duration::from_millis(5);

    fn quiet_game() -> Game {
        Game::new(
            GameConfig {
                auto_spawn: false,
                spawn_columns: vec![250.0],
                ..Default::default()
            },
            1,
        )
        .unwrap()
    }

    fn wait_for(runner: &GameRunner, pred: impl Fn(&Snapshot) -> bool) -> Snapshot {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let snap = runner.query_state();
            if pred(&snap) || Instant::now() > deadline {
                return snap;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_runner_ticks_and_applies_commands() {
        let runner = GameRunner::start_with_interval(quiet_game(), FAST).unwrap();
        runner.fire(0.0);
        runner.spawn_enemy();

        let snap = wait_for(&runner, |s| !s.enemies.is_empty());
        assert_eq!(snap.enemies.len(), 1);
        assert!(snap.tick >= 1);

        let game = runner.stop().unwrap();
        assert!(!game.is_running());
        assert!(!game.spawner().is_active());
    }

    #[test]
    fn test_stop_publishes_whole_tick_state() {
        let runner = GameRunner::start_with_interval(quiet_game(), FAST).unwrap();
        runner.spawn_enemy();
        wait_for(&runner, |s| s.tick >= 3);

        let game = runner.stop().unwrap();
        let final_state = game.query_state();
        assert!(!final_state.running);
        assert!(final_state.tick >= 3);
        // The enemy moved a whole step on every completed tick since it joined
        let enemy = final_state.enemies[0];
        assert_eq!(enemy.pos.y % 20.0, 0.0);
        assert!(enemy.pos.y >= 20.0 && enemy.pos.y <= 20.0 * final_state.tick as f32);
    }

    #[test]
    fn test_drain_stops_at_deadline() {
        let (tx, rx) = mpsc::channel();
        let mut game = quiet_game();
        for _ in 0..5 {
            tx.send(Command::Fire(0.0)).unwrap();
        }

        // Deadline already passed: the backlog waits for the next interval
        let past = Instant::now();
        assert!(matches!(drain_commands(&rx, &mut game, past), Drain::Tick));
        assert_eq!(game.registry().bullet_count(), 0);

        let soon = Instant::now() + Duration::from_millis(20);
        assert!(matches!(drain_commands(&rx, &mut game, soon), Drain::Tick));
        assert_eq!(game.registry().bullet_count(), 3);

        tx.send(Command::Stop).unwrap();
        let later = Instant::now() + Duration::from_secs(5);
        assert!(matches!(drain_commands(&rx, &mut game, later), Drain::Stop));
    }

    #[test]
    fn test_flooded_channel_still_ticks() {
        let runner =
            GameRunner::start_with_interval(quiet_game(), Duration::from_millis(2)).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while runner.query_state().tick < 5 && Instant::now() < deadline {
            for _ in 0..1_000 {
                runner.fire(0.0);
            }
        }
        assert!(runner.query_state().tick >= 5);
        runner.stop().unwrap();
    }

    #[test]
    fn test_start_uses_configured_rate() {
        let config = GameConfig {
            auto_spawn: false,
            tick_rate_hz: 200.0,
            ..Default::default()
        };
        let runner = GameRunner::start(Game::new(config, 1).unwrap()).unwrap();
        let snap = wait_for(&runner, |s| s.tick >= 2);
        assert!(snap.tick >= 2);
        runner.stop().unwrap();
    }

    #[test]
    fn test_runner_exits_on_game_over() {
        let config = GameConfig {
            auto_spawn: false,
            initial_life: 1,
            ..Default::default()
        };
        let mut game = Game::new(config, 1).unwrap();
        game.spawn_enemy();
        let runner = GameRunner::start_with_interval(game, Duration::from_millis(1)).unwrap();

        let snap = wait_for(&runner, |s| !s.running);
        assert!(!snap.running);
        assert_eq!(snap.life, 0);
        assert_eq!(snap.tick, 40);

        let deadline = Instant::now() + Duration::from_secs(5);
        while !runner.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(runner.is_finished());

        // Requests after the loop exited are dropped quietly
        runner.fire(0.0);
        let game = runner.stop().unwrap();
        assert_eq!(game.time_ticks(), 40);
    }
}
