//! ctfgrid CLI - Command-line interface for running capture-the-food games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// ctfgrid - A deterministic two-team capture-the-food rules engine
#[derive(Parser, Debug)]
#[command(name = "ctfgrid")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single game on a layout
    Run {
        /// Layout file
        #[arg(required = true)]
        layout: PathBuf,

        /// Player kind for each team (default: stopping stopping)
        #[arg(short = 'p', long, num_args = 2, default_values = ["stopping", "stopping"])]
        players: Vec<cli::PlayerArg>,

        #[command(flatten)]
        settings: cli::MatchArgs,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the header and final grid
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run many games in parallel and aggregate statistics
    Series {
        /// Layout file
        #[arg(required = true)]
        layout: PathBuf,

        /// Player kind for each team (default: random random)
        #[arg(short = 'p', long, num_args = 2, default_values = ["random", "random"])]
        players: Vec<cli::PlayerArg>,

        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        #[command(flatten)]
        settings: cli::MatchArgs,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SeriesFormat,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },

    /// Check that a layout builds a valid universe
    Validate {
        /// Layout file
        #[arg(required = true)]
        layout: PathBuf,

        /// Team names (default: black white)
        #[arg(long, num_args = 2)]
        team_names: Option<Vec<String>>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            layout,
            players,
            settings,
            format,
            quiet,
        } => cli::run::execute(&layout, &players, &settings, format, quiet),

        Commands::Series {
            layout,
            players,
            games,
            threads,
            settings,
            format,
            progress,
        } => cli::series::execute(&layout, &players, games, threads, &settings, format, progress),

        Commands::Validate { layout, team_names } => {
            cli::validate::execute(&layout, team_names.as_deref())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
