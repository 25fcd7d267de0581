//! sfinfo - Inspect and convert sound files.
//!
//! This tool prints what libsndfile knows about a sound file, lists the
//! formats it supports, and converts between them block by block.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Args, Mode};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    init_tracing(&args);

    // Run the appropriate command
    if let Err(e) = run(args) {
        output::print_error(&e);
        std::process::exit(1);
    }
}

/// Send library and tool events to stderr.
///
/// `RUST_LOG` takes precedence over the level chosen by `--verbose`.
fn init_tracing(args: &Args) {
    let default = if args.verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main dispatch function.
fn run(args: Args) -> Result<()> {
    // Validate arguments
    args.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

    // Dispatch to appropriate command
    match args.mode() {
        Some(Mode::Formats) => commands::formats::run_formats(&args),
        Some(Mode::Subtypes(format)) => commands::formats::run_subtypes(&args, format),
        Some(Mode::Info(input)) => commands::info::run(&args, input),
        Some(Mode::Convert { input, output }) => commands::convert::run(&args, input, output),
        None => anyhow::bail!("Nothing to do (see --help)"),
    }
}
