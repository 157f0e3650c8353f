//! forest-headless: run the forest simulation without a renderer.
//!
//! Usage:
//!   forest-headless --seed 7 --seconds 120 --fps 60 --enemies 2
//!   forest-headless --tuning tuning.json --verbose
//!
//! The player sits still; enemies hunt trees until the time runs out or the
//! forest is gone. The final snapshot is printed to stdout as JSON.

mod logging;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{debug, error, info};

use forest_core::config::Tuning;
use forest_sim::{HeadlessScene, SimConfig, SimulationEngine};

/// Headless forest defense simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed; the same seed always replays the same game
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,

    /// Fixed frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Number of enemy tanks
    #[arg(long, default_value_t = 1)]
    enemies: usize,

    /// Run the day-night cycle
    #[arg(long)]
    day_night: bool,

    /// JSON file overriding tuning values
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if args.fps.is_nan() || args.fps <= 0.0 {
        error!("--fps must be positive, got {}", args.fps);
        process::exit(2);
    }

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let config = SimConfig {
        seed: args.seed,
        enemy_count: args.enemies,
        day_night: args.day_night,
        tuning,
        ..Default::default()
    };
    if let Ok(json) = serde_json::to_string(&config) {
        debug!("config: {json}");
    }

    let scene = HeadlessScene::new(config.arena_size);
    let mut engine = SimulationEngine::with_forest(config, scene);
    let dt = 1.0 / args.fps;
    let frames = (args.seconds * args.fps).ceil() as u64;

    let mut snapshot = engine.snapshot();
    for _ in 0..frames {
        snapshot = engine.tick(dt);
        if snapshot.forest.game_over {
            break;
        }
    }

    info!(
        "stopped at {:.1}s: {}/{} trees standing, health {:.2}",
        snapshot.time.elapsed_secs,
        snapshot.forest.live_trees,
        snapshot.forest.desired_trees,
        snapshot.forest.health
    );

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("failed to encode snapshot: {e}");
            process::exit(1);
        }
    }
}
