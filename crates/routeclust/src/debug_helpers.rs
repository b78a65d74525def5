use crate::Point;
use clap::Parser;
use rand::RngExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
pub struct BoardArgs {
    /// Number of points on the board
    #[arg(short = 'n', long, default_value_t = 100)]
    pub points: usize,

    /// Number of groups
    #[arg(short, long, default_value_t = 7)]
    pub k: usize,

    /// Seed for the board and the clustering
    #[arg(short, long, default_value_t = 314159)]
    pub seed: u64,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// `n` points drawn uniformly from the [-1, 1] x [-1, 1] square.
pub fn random_board(rng: &mut impl RngExt, n: usize) -> Vec<Point> {
    (0..n)
        .map(|_| {
            Point::from((
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
            ))
        })
        .collect()
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Installs a stderr `fmt` subscriber. Without `-v`, `RUST_LOG` wins when set.
pub fn init_tracing(verbose: u8) {
    let level = level_for(verbose);
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        _ => EnvFilter::new(level),
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
