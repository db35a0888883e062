#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless typer simulation.

mod autopilot;
mod config;
mod report;

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;

use crate::config::Config;

/// Headless simulation of the typer item engine.
#[derive(Debug, Parser)]
#[command(name = "typer", version)]
struct Cli {
    /// TOML file with `[round]`, `[worker]` and `[simulation]` tables.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for word draws and worker jitter; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate; overrides the config file.
    #[arg(long)]
    frames: Option<u32>,

    /// Simulated milliseconds per frame; overrides the config file.
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Print the final report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Entry point for the typer command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.round.seed = seed;
    }
    if let Some(frames) = cli.frames {
        config.simulation.frames = frames;
    }
    if let Some(frame_ms) = cli.frame_ms {
        config.simulation.frame_ms = frame_ms;
    }

    let summary = autopilot::run(&config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        report::write_json(&mut out, &summary)
    } else {
        report::write_text(&mut out, &summary)
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    let _ = builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr);
    builder.init();
}
