mod config;
mod game;
mod grid;
mod input;
mod session;
mod snake;
mod term;
mod timer;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::WriteLogger;

use config::Config;

fn main() -> Result<()> {
    let config = Config::parse();

    // The terminal is in raw mode while playing, so logs go to a file
    let log_file = File::create(&config.log_file)
        .with_context(|| format!("creating log file {}", config.log_file.display()))?;
    WriteLogger::init(config.log_level, simplelog::Config::default(), log_file)
        .context("initializing logger")?;

    info!("starting on a {0}x{0} board, {1} ms per tick", config.grid_size, config.tick_ms);

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = game::SnakeGame::new(&config, rng);

    // Restore the terminal whether or not the game failed
    let res = game.initialize().and_then(|_| game.play());
    let restored = game.shutdown();
    game::settle(res, restored)
}
