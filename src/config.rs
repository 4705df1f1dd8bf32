use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

pub const DEFAULT_GRID_SIZE: i16 = 15;
pub const DEFAULT_TICK_MS: u64 = 120;

/// Grid snake in the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Cells along each side of the square board.
    #[arg(
        long = "grid-size",
        value_name = "CELLS",
        default_value_t = DEFAULT_GRID_SIZE,
        value_parser = clap::value_parser!(i16).range(9..=40)
    )]
    pub grid_size: i16,
    /// Milliseconds between snake steps.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_TICK_MS,
        value_parser = clap::value_parser!(u64).range(20..=2_000)
    )]
    pub tick_ms: u64,
    /// Seed for snake and food placement. Random when omitted.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
    /// File that receives the game log.
    #[arg(long = "log-file", value_name = "PATH", default_value = "ophidian.log")]
    pub log_file: PathBuf,
    /// Minimum level written to the log file.
    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Config {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
