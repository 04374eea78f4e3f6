//! CLI command implementations for ctfgrid.

pub(crate) mod run;
pub(crate) mod series;
pub(crate) mod validate;

mod output;

use clap::{Args, ValueEnum};
use ctfgrid::game::DEFAULT_TEAM_NAMES;
use ctfgrid::{Layout, MatchConfig, PlayerKind};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output, including the event log.
    Json,
}

/// Output format for the `series` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SeriesFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Player kind selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PlayerArg {
    /// Never moves.
    Stopping,
    /// Picks a uniformly random legal move.
    Random,
}

impl From<PlayerArg> for PlayerKind {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::Stopping => PlayerKind::Stopping,
            PlayerArg::Random => PlayerKind::Random,
        }
    }
}

/// Match settings shared by `run` and `series`.
#[derive(Args, Debug, Clone)]
pub(crate) struct MatchArgs {
    /// JSON match config file (flags override its values)
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Maximum rounds per game (default: 300)
    #[arg(short, long)]
    pub(crate) rounds: Option<u32>,

    /// Random seed for players (default: 0)
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Team names (default: black white)
    #[arg(long, num_args = 2)]
    pub(crate) team_names: Option<Vec<String>>,
}

impl MatchArgs {
    /// Build the match config: defaults, then the config file, then flags.
    pub(crate) fn match_config(&self) -> Result<MatchConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = read_file(path)?;
                serde_json::from_str(&text).map_err(|e| {
                    CliError::new(format!("Invalid config {}: {e}", path.display()))
                })?
            }
            None => MatchConfig::default(),
        };
        if let Some(rounds) = self.rounds {
            config.max_rounds = rounds;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }

    /// Team names as borrowed strings.
    pub(crate) fn team_names(&self) -> Vec<&str> {
        team_names(self.team_names.as_deref())
    }
}

/// Team names, falling back to the defaults.
pub(crate) fn team_names(names: Option<&[String]>) -> Vec<&str> {
    names.map_or_else(
        || DEFAULT_TEAM_NAMES.to_vec(),
        |names| names.iter().map(String::as_str).collect(),
    )
}

/// Convert command-line player choices into library player kinds.
pub(crate) fn player_kinds(players: &[PlayerArg]) -> Vec<PlayerKind> {
    players.iter().copied().map(PlayerKind::from).collect()
}

/// Read and parse a layout file.
pub(crate) fn load_layout(path: &Path) -> Result<Layout, CliError> {
    let text = read_file(path)?;
    Layout::parse(&text)
        .map_err(|e| CliError::new(format!("Invalid layout {}: {e}", path.display())))
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

impl From<ctfgrid::ConstructionError> for CliError {
    fn from(e: ctfgrid::ConstructionError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ctfgrid::RunnerError> for CliError {
    fn from(e: ctfgrid::RunnerError) -> Self {
        Self::new(e.to_string())
    }
}
