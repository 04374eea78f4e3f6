//! Game layer for ctfgrid.
//!
//! Implements the capture-the-food rules:
//! - Maze of walls, open floor and items
//! - Two teams, each owning half of the maze
//! - Bots whose role (harvester or destroyer) follows from where they stand
//! - Move resolution, eliminations, scoring and the win condition
//!
//! [`Universe::apply_move`] is the single entry point that changes state. It
//! returns the ordered [`Event`]s of that move.

mod bot;
mod event;
mod invariants;
mod map;
mod moves;
mod rules;
mod team;
mod universe;

pub use bot::{Bot, BotId, Role};
pub use event::{Event, EventLog};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use map::{Cell, Coord, Direction, Maze};
pub use moves::{LegalMoves, legal_moves, neighbours};
pub use team::{TEAM_COUNT, Team, TeamId, Territory, opponent};
pub use universe::{DEFAULT_TEAM_NAMES, Universe};
