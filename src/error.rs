//! Error types for universe construction, move application and layout text.

use thiserror::Error;

use crate::game::{BotId, Coord, Direction, TeamId};

/// Reasons a universe cannot be constructed.
///
/// Construction is all-or-nothing: when any of these is returned no
/// partial universe exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// Maze width or height is zero.
    #[error("maze dimensions must be non-zero, got {width}x{height}")]
    EmptyMaze {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// Number of cells does not match `width * height`.
    #[error("maze of {width}x{height} needs {expected} cells, got {found}")]
    CellCount {
        /// Maze width.
        width: u16,
        /// Maze height.
        height: u16,
        /// Expected number of cells.
        expected: usize,
        /// Number of cells supplied.
        found: usize,
    },
    /// A cell combines flags that never coexist (e.g. a wall holding an item).
    #[error("cell at {coord} has invalid contents {bits:#05b}")]
    InvalidCell {
        /// Location of the offending cell.
        coord: Coord,
        /// Raw flag bits of the cell.
        bits: u8,
    },
    /// Capture-the-food needs an even number of bots.
    #[error("number of bots must be even, is: {0}")]
    OddBotCount(usize),
    /// Territories can only split an even-width maze.
    #[error("maze width must be even, is: {0}")]
    OddWidth(u16),
    /// Exactly two team names are required.
    #[error("exactly 2 team names are required, got {0}")]
    TeamNameCount(usize),
    /// The explicit bot-to-team assignment does not give both teams the same
    /// number of bots.
    #[error("teams must own the same number of bots, got {first} and {second}")]
    UnbalancedTeams {
        /// Bots assigned to team 0.
        first: usize,
        /// Bots assigned to team 1.
        second: usize,
    },
    /// A bot was assigned to a team index other than 0 or 1.
    #[error("bot {bot} assigned to unknown team {team}")]
    UnknownTeam {
        /// Bot with the bad assignment.
        bot: BotId,
        /// Team index supplied.
        team: u8,
    },
    /// A spawn coordinate lies outside the maze.
    #[error("spawn of bot {bot} at {coord} is outside the maze")]
    SpawnOutOfBounds {
        /// Bot whose spawn is invalid.
        bot: BotId,
        /// Offending spawn coordinate.
        coord: Coord,
    },
    /// A spawn coordinate lies on a wall.
    #[error("spawn of bot {bot} at {coord} is on a wall")]
    SpawnOnWall {
        /// Bot whose spawn is invalid.
        bot: BotId,
        /// Offending spawn coordinate.
        coord: Coord,
    },
}

/// Reasons a move request or an indexed query is rejected.
///
/// None of these change the universe; the caller may retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The bot index does not refer to a bot of this universe.
    #[error("unknown bot {bot} (universe has {count} bots)")]
    UnknownBot {
        /// Requested bot index.
        bot: BotId,
        /// Number of bots in the universe.
        count: usize,
    },
    /// The direction leads into a wall or off the maze.
    #[error("illegal move from bot {bot} at {from}: {direction}")]
    IllegalMove {
        /// Bot that attempted the move.
        bot: BotId,
        /// Position the move started from.
        from: Coord,
        /// Requested direction.
        direction: Direction,
    },
    /// The team index does not refer to a team of this universe.
    #[error("unknown team {team} (universe has {count} teams)")]
    UnknownTeam {
        /// Requested team index.
        team: TeamId,
        /// Number of teams in the universe.
        count: usize,
    },
}

/// A direction could not be parsed from text or an offset vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal direction: {input}")]
pub struct ParseDirectionError {
    /// The rejected input, as written.
    pub input: String,
}

/// Reasons a textual layout cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout has no rows.
    #[error("layout is empty")]
    Empty,
    /// A row differs in length from the first row.
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },
    /// The layout is too large to address with `u16` dimensions.
    #[error("layout of {width}x{height} is too large")]
    TooLarge {
        /// Number of columns.
        width: usize,
        /// Number of rows.
        height: usize,
    },
    /// A character outside the layout alphabet.
    #[error("unknown character {ch:?} at {coord}")]
    UnknownChar {
        /// The character found.
        ch: char,
        /// Where it was found.
        coord: Coord,
    },
    /// The same bot marker appears twice.
    #[error("bot {bot} appears more than once (at {first} and {second})")]
    DuplicateBot {
        /// Bot index of the marker.
        bot: BotId,
        /// First occurrence.
        first: Coord,
        /// Second occurrence.
        second: Coord,
    },
    /// Bot markers must be numbered `0..n` without gaps.
    #[error("bot {0} is missing from the layout")]
    MissingBot(BotId),
    /// The parsed maze failed validation.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}
