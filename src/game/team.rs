//! Teams and their home territories.

use serde::{Deserialize, Serialize};

use crate::game::{BotId, Coord};

/// Index of a team: 0 owns the western half, 1 the eastern half.
pub type TeamId = u8;

/// Number of teams in a game.
pub const TEAM_COUNT: usize = 2;

/// The team playing against `team`.
#[must_use]
pub const fn opponent(team: TeamId) -> TeamId {
    if team == 0 { 1 } else { 0 }
}

/// An inclusive range of x-coordinates owned by one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Territory {
    /// Smallest x inside the territory.
    pub min_x: i32,
    /// Largest x inside the territory.
    pub max_x: i32,
}

impl Territory {
    /// Create a territory covering `min_x..=max_x`.
    #[must_use]
    pub const fn new(min_x: i32, max_x: i32) -> Self {
        Self { min_x, max_x }
    }

    /// The two home territories splitting a maze of even `width` in half.
    #[must_use]
    pub fn halves(width: u16) -> [Territory; TEAM_COUNT] {
        let half = i32::from(width / 2);
        [
            Territory::new(0, half - 1),
            Territory::new(half, i32::from(width) - 1),
        ]
    }

    /// Check if `coord` lies within this territory.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        self.min_x <= coord.x && coord.x <= self.max_x
    }

    /// Number of columns covered.
    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.max_x - self.min_x + 1
    }
}

/// State for one side of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Index of this team.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Home territory; bots here are destroyers.
    pub territory: Territory,
    /// Items collected so far. Never decreases.
    score: u32,
    /// Bots owned by this team, in ascending index order.
    pub bots: Vec<BotId>,
}

impl Team {
    /// Create a team with zero score.
    #[must_use]
    pub fn new(id: TeamId, name: impl Into<String>, territory: Territory, bots: Vec<BotId>) -> Self {
        Self {
            id,
            name: name.into(),
            territory,
            score: 0,
            bots,
        }
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Check if `coord` lies in this team's territory.
    #[must_use]
    pub const fn in_territory(&self, coord: Coord) -> bool {
        self.territory.contains(coord)
    }

    /// Award a single point.
    pub(crate) fn score_point(&mut self) {
        self.score = self.score.saturating_add(1);
    }
}
