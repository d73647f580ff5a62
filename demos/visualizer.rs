//! Terminal A* visualizer using crossterm.
//!
//! Run: cargo run --bin visualizer -- --rows 30 --cols 30

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use gridpath_crossterm::CrosstermRenderer;
use gridpath_demos::{Visualizer, VisualizerConfig};

/// Largest grid that still fits crossterm's `u16` screen coordinates,
/// leaving a row for the status line.
const MAX_ROWS: i64 = u16::MAX as i64 - 2;
const MAX_COLS: i64 = u16::MAX as i64 / 2;

#[derive(Parser, Debug)]
#[command(name = "visualizer", about = "Paint a grid and watch A* search it")]
struct Args {
    /// Grid rows.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(1..=MAX_ROWS))]
    rows: i32,

    /// Grid columns.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(1..=MAX_COLS))]
    cols: i32,

    /// Pause between search steps, in milliseconds.
    #[arg(long, default_value_t = 20)]
    delay_ms: u64,

    /// Percentage of free cells walled off by the random-walls key.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(0..=100))]
    density: u32,

    /// Seed for random walls.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG, default "debug").
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Error: cannot open log file {}: {e}", path.display());
            std::process::exit(1);
        }
    }

    let config = VisualizerConfig {
        rows: args.rows,
        cols: args.cols,
        step_delay: Duration::from_millis(args.delay_ms),
        scatter_percent: args.density,
        seed: args.seed,
    };
    log::info!("starting visualizer with {config:?}");

    let mut app = Visualizer::new(config, CrosstermRenderer::new());
    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_size_is_bounded() {
        let args = Args::try_parse_from(["visualizer", "--rows", "12", "--cols", "40"]).unwrap();
        assert_eq!((args.rows, args.cols), (12, 40));
        assert!(Args::try_parse_from(["visualizer", "--cols", "40000"]).is_err());
        assert!(Args::try_parse_from(["visualizer", "--rows", "70000"]).is_err());
        assert!(Args::try_parse_from(["visualizer", "--rows", "0"]).is_err());
    }
}
