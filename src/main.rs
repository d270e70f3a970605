//! Shooting Sim entry point
//!
//! Headless demo: runs the simulation in real time, sweeps the gun across a fixed
//! set of angles and logs the state after every tick until the game ends.
//!
//! Usage: `shooting-sim [config.json] [seed]` (set `RUST_LOG=info` or `debug`)

use std::time::{SystemTime, UNIX_EPOCH};

use shooting_sim::sim::Game;
use shooting_sim::{GameConfig, GameRunner};

/// Angles the demo cycles through, in degrees
const SWEEP: [f32; 7] = [-60.0, -30.0, -10.0, 0.0, 10.0, 30.0, 60.0];

/// Hard stop for the demo
const MAX_TICKS: u64 = 300;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load_or_default(path),
        None => GameConfig::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    if let Err(e) = run(config, seed) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: GameConfig, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Shooting Sim (headless) starting with seed {seed}");

    let tick_interval = config.tick_interval()?;
    let game = Game::new(config, seed)?;
    let runner = GameRunner::start(game)?;

    let mut last_tick = 0;
    let mut shots = SWEEP.iter().cycle();
    while !runner.is_finished() {
        std::thread::sleep(tick_interval / 4);

        let snapshot = runner.query_state();
        if snapshot.tick == last_tick {
            continue;
        }
        last_tick = snapshot.tick;
        println!("{}", snapshot.to_json()?);

        if last_tick >= MAX_TICKS {
            log::info!("Reached {MAX_TICKS} ticks, stopping");
            break;
        }
        if let Some(&angle) = shots.next() {
            runner.fire(angle);
        }
    }

    if let Some(game) = runner.stop() {
        let player = game.player();
        log::info!(
            "Final: tick {}, score {}, life {}",
            game.time_ticks(),
            player.score(),
            player.life()
        );
    }
    Ok(())
}
