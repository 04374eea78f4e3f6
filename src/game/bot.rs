//! Bots and their territory-derived role.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Coord, TeamId, Territory};

/// Index of a bot, stable for the lifetime of a game.
pub type BotId = usize;

/// What a bot can currently do, decided by where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Outside its own territory: can collect items and can be eaten.
    Harvester,
    /// Inside its own territory: eats enemy harvesters, cannot score.
    Destroyer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Harvester => f.write_str("harvester"),
            Role::Destroyer => f.write_str("destroyer"),
        }
    }
}

/// A single agent-controlled unit.
///
/// The role is never stored: it is recomputed from the current position and
/// the home territory on every query, so it cannot drift out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    /// Index of this bot.
    pub id: BotId,
    /// Spawn coordinate, where the bot returns when eaten.
    pub spawn: Coord,
    /// Owning team.
    pub team: TeamId,
    /// Home territory of the owning team.
    pub territory: Territory,
    /// Current position.
    current: Coord,
}

impl Bot {
    /// Create a bot standing on its spawn.
    #[must_use]
    pub const fn new(id: BotId, spawn: Coord, team: TeamId, territory: Territory) -> Self {
        Self {
            id,
            spawn,
            team,
            territory,
            current: spawn,
        }
    }

    /// Current position.
    #[must_use]
    pub const fn current(&self) -> Coord {
        self.current
    }

    /// Check if the bot stands inside its own territory.
    #[must_use]
    pub const fn in_own_territory(&self) -> bool {
        self.territory.contains(self.current)
    }

    /// The bot's role at its current position.
    #[must_use]
    pub const fn role(&self) -> Role {
        if self.in_own_territory() {
            Role::Destroyer
        } else {
            Role::Harvester
        }
    }

    /// Check if the bot is currently a destroyer.
    #[must_use]
    pub const fn is_destroyer(&self) -> bool {
        matches!(self.role(), Role::Destroyer)
    }

    /// Check if the bot is currently a harvester.
    #[must_use]
    pub const fn is_harvester(&self) -> bool {
        matches!(self.role(), Role::Harvester)
    }

    /// Place the bot at `coord`. Legality is the caller's concern.
    pub(crate) fn move_to(&mut self, coord: Coord) {
        self.current = coord;
    }

    /// Send the bot back to its spawn.
    pub(crate) fn reset(&mut self) {
        self.current = self.spawn;
    }
}
