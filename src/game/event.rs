//! Events produced by applying a move.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{BotId, TeamId};

/// Something that happened while applying a single move.
///
/// Within one move the order is fixed: the move itself, then eliminations in
/// ascending bot order, then a score, then a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A bot moved (or stayed, for `Stop`).
    BotMoved {
        /// The moving bot.
        bot: BotId,
    },
    /// A harvester was eaten by an enemy destroyer and sent back to spawn.
    BotEaten {
        /// The eaten harvester.
        harvester: BotId,
        /// The destroyer that ate it.
        destroyer: BotId,
    },
    /// A harvester collected an item.
    BotScored {
        /// The scoring bot.
        bot: BotId,
    },
    /// A team collected every item in its opponent's territory.
    TeamWon {
        /// The winning team.
        team: TeamId,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::BotMoved { bot } => write!(f, "BotMoved({bot})"),
            Event::BotEaten {
                harvester,
                destroyer,
            } => write!(f, "BotEaten({harvester}, {destroyer})"),
            Event::BotScored { bot } => write!(f, "BotScored({bot})"),
            Event::TeamWon { team } => write!(f, "TeamWon({team})"),
        }
    }
}

/// Ordered events of one move.
pub type EventLog = Vec<Event>;
