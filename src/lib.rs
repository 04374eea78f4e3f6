// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! ctfgrid: a deterministic rules engine for two-team capture-the-food games.
//!
//! Two teams of bots share a maze split down the middle. A bot in its own
//! half is a destroyer and eats enemy harvesters it meets; a bot in the
//! enemy half is a harvester and collects items there for its team. A team
//! wins by collecting every item in the enemy half.
//!
//! The engine is designed for:
//! - Bit-exact, reproducible outcomes for every move
//! - All-or-nothing move application (illegal moves change nothing)
//! - An explicit, ordered event log per move
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │    CLI / Series Runner (rayon)      │
//! ├─────────────────────────────────────┤
//! │    Match Runner  +  Players         │
//! ├─────────────────────────────────────┤
//! │    Universe (rules engine)          │
//! ├─────────────────────────────────────┤
//! │    Layout text  <->  Maze           │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod game;
pub mod layout;
pub mod player;
pub mod runner;

pub use error::{ConstructionError, LayoutError, MoveError, ParseDirectionError};

// Re-export key game types at crate root for convenience
pub use game::{
    Bot, BotId, Cell, Coord, Direction, Event, EventLog, LegalMoves, Maze, Role, Team, TeamId,
    Territory, Universe,
};
pub use layout::Layout;
pub use player::{Player, PlayerKind, RandomPlayer, StoppingPlayer};
pub use runner::{GameResult, MatchConfig, RunnerError, SeriesStats, run_game, run_series};
