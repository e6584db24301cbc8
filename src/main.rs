use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Solves one Advent of Code 2023 puzzle and prints the answer.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Puzzle day
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    day: u8,

    /// Puzzle part, 1 or 2
    #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
    part: u8,

    /// Read example number N (`day{DAY}test{N}.in`) instead of the real input
    #[arg(short, long, value_name = "N")]
    test: Option<u32>,

    /// Read this file instead of the conventionally named one
    #[arg(short, long, value_name = "PATH", conflicts_with = "test")]
    input: Option<PathBuf>,

    /// Directory holding the puzzle inputs
    #[arg(long, env = "AOC_INPUT_DIR", value_name = "DIR", default_value = ".")]
    input_dir: PathBuf,
}

impl Args {
    fn input_path(&self) -> PathBuf {
        match (&self.input, self.test) {
            (Some(path), _) => path.clone(),
            (None, Some(test)) => self.input_dir.join(format!("day{}test{}.in", self.day, test)),
            (None, None) => self.input_dir.join(format!("day{}.in", self.day)),
        }
    }
}

fn setup_tracing() -> Result<()> {
    let env_filter = EnvFilter::builder().parse_lossy(
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or("info".to_string()),
    );
    let fmt = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);
    tracing_subscriber::registry().with(fmt).try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing()?;

    let path = args.input_path();
    let input = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    info!(path = %path.display(), "read input");

    let time = Instant::now();
    let answer = aoc2023::solve(args.day, args.part, &input)?;
    println!("{}", answer);
    info!(elapsed = ?time.elapsed(), "solved day {} part {}", args.day, args.part);
    Ok(())
}
