//! Agents that choose moves for bots.
//!
//! Players only ever see a read-only universe and answer with a direction.
//! The engine validates the answer; a player is never trusted to be legal.

use serde::{Deserialize, Serialize};

use crate::game::{BotId, Direction, Universe};

/// A decision-maker controlling one bot.
pub trait Player: Send {
    /// Short name used in reports.
    fn name(&self) -> &'static str;

    /// Called once before the first move with the initial universe.
    fn set_initial(&mut self, _bot: BotId, _universe: &Universe) {}

    /// Choose a move for `bot` given the current universe.
    fn get_move(&mut self, bot: BotId, universe: &Universe) -> Direction;
}

/// A player that never moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoppingPlayer;

impl Player for StoppingPlayer {
    fn name(&self) -> &'static str {
        PlayerKind::Stopping.name()
    }

    fn get_move(&mut self, _bot: BotId, _universe: &Universe) -> Direction {
        Direction::Stop
    }
}

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random index in [0, len).
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        // len is at most 5 here, so the remainder always fits.
        #[allow(clippy::cast_possible_truncation)]
        let idx = (self.next_u64() % len as u64) as usize;
        idx
    }
}

/// A player choosing uniformly among the legal moves.
///
/// Seeded, so the same seed and the same universe history give the same
/// moves.
#[derive(Debug, Clone, Copy)]
pub struct RandomPlayer {
    rng: Rng,
}

impl RandomPlayer {
    /// Create a random player from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { rng: Rng::new(seed) }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &'static str {
        PlayerKind::Random.name()
    }

    fn get_move(&mut self, bot: BotId, universe: &Universe) -> Direction {
        let Ok(moves) = universe.legal_moves_for(bot) else {
            return Direction::Stop;
        };
        let directions = moves.directions();
        let idx = self.rng.next_index(directions.len());
        directions.get(idx).copied().unwrap_or(Direction::Stop)
    }
}

/// The built-in player kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// [`StoppingPlayer`].
    Stopping,
    /// [`RandomPlayer`].
    Random,
}

impl PlayerKind {
    /// The name reported by players of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PlayerKind::Stopping => "stopping",
            PlayerKind::Random => "random",
        }
    }

    /// Build a player of this kind for one bot.
    ///
    /// `seed` only matters for randomised kinds.
    #[must_use]
    pub fn build(self, seed: u64) -> Box<dyn Player> {
        match self {
            PlayerKind::Stopping => Box::new(StoppingPlayer),
            PlayerKind::Random => Box::new(RandomPlayer::new(seed)),
        }
    }
}
