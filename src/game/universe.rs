//! The universe: maze, teams and bots of one game.

use std::fmt;

use crate::error::{ConstructionError, MoveError};
use crate::game::{
    Bot, BotId, Coord, Direction, EventLog, LegalMoves, Maze, TEAM_COUNT, Team, TeamId,
    Territory, legal_moves, neighbours, rules,
};
use crate::layout::{Layout, render_universe};

/// Default team names, west team first.
pub const DEFAULT_TEAM_NAMES: [&str; TEAM_COUNT] = ["black", "white"];

/// Complete state of a capture-the-food game.
///
/// [`Universe::apply_move`] is the only mutator. It is not internally
/// synchronised: callers sharing a universe must serialise moves and must not
/// query while a move is being applied. Separate universes share nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    /// The maze.
    pub(crate) maze: Maze,
    /// Both teams, indexed by team id.
    pub(crate) teams: Vec<Team>,
    /// All bots, indexed by bot id.
    pub(crate) bots: Vec<Bot>,
}

impl Universe {
    /// Create a universe where bot `i` belongs to team `i % 2`.
    ///
    /// `spawns[i]` is the spawn coordinate of bot `i`. Team 0 owns the western
    /// half of the maze, team 1 the eastern half.
    ///
    /// # Errors
    ///
    /// Returns an error if the bot count or maze width is odd, if there are
    /// not exactly two team names, or if a spawn is off the maze or on a wall.
    pub fn new(maze: Maze, spawns: &[Coord], team_names: &[&str]) -> Result<Self, ConstructionError> {
        if spawns.len() % 2 != 0 {
            return Err(ConstructionError::OddBotCount(spawns.len()));
        }
        let assignment: Vec<(Coord, TeamId)> = spawns
            .iter()
            .enumerate()
            .map(|(idx, &spawn)| (spawn, if idx % 2 == 0 { 0 } else { 1 }))
            .collect();
        Self::with_assignment(maze, &assignment, team_names)
    }

    /// Create a universe with an explicit team for every bot.
    ///
    /// `bots[i]` is the spawn and team of bot `i`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bot count or maze width is odd, if there are
    /// not exactly two team names, if a team index is not 0 or 1, if the teams
    /// get different numbers of bots, or if a spawn is off the maze or on a
    /// wall.
    pub fn with_assignment(
        maze: Maze,
        bots: &[(Coord, TeamId)],
        team_names: &[&str],
    ) -> Result<Self, ConstructionError> {
        if bots.len() % 2 != 0 {
            return Err(ConstructionError::OddBotCount(bots.len()));
        }
        if maze.width() % 2 != 0 {
            return Err(ConstructionError::OddWidth(maze.width()));
        }
        if team_names.len() != TEAM_COUNT {
            return Err(ConstructionError::TeamNameCount(team_names.len()));
        }

        let mut members: [Vec<BotId>; TEAM_COUNT] = [Vec::new(), Vec::new()];
        for (bot, &(spawn, team)) in bots.iter().enumerate() {
            if usize::from(team) >= TEAM_COUNT {
                return Err(ConstructionError::UnknownTeam { bot, team });
            }
            if !maze.in_bounds(spawn) {
                return Err(ConstructionError::SpawnOutOfBounds { bot, coord: spawn });
            }
            if !maze.is_open(spawn) {
                return Err(ConstructionError::SpawnOnWall { bot, coord: spawn });
            }
            members[usize::from(team)].push(bot);
        }
        if members[0].len() != members[1].len() {
            return Err(ConstructionError::UnbalancedTeams {
                first: members[0].len(),
                second: members[1].len(),
            });
        }

        let territories = Territory::halves(maze.width());
        let [west, east] = members;
        let teams = vec![
            Team::new(0, team_names[0], territories[0], west),
            Team::new(1, team_names[1], territories[1], east),
        ];
        let bots = bots
            .iter()
            .enumerate()
            .map(|(id, &(spawn, team))| Bot::new(id, spawn, team, territories[usize::from(team)]))
            .collect();

        Ok(Self { maze, teams, bots })
    }

    /// Create a universe from a parsed layout, with alternating ownership.
    ///
    /// # Errors
    ///
    /// Same as [`Universe::new`].
    pub fn from_layout(layout: &Layout, team_names: &[&str]) -> Result<Self, ConstructionError> {
        Self::new(layout.maze.clone(), &layout.spawns, team_names)
    }

    /// Parse a textual layout and build a universe from it.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::LayoutError`] if the text is malformed or the
    /// resulting universe is invalid.
    pub fn parse(text: &str, team_names: &[&str]) -> Result<Self, crate::error::LayoutError> {
        let layout = Layout::parse(text)?;
        Ok(Self::from_layout(&layout, team_names)?)
    }

    /// Get the maze.
    #[must_use]
    pub const fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Get both teams, indexed by team id.
    #[must_use]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Get a team by id.
    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(usize::from(id))
    }

    /// Get all bots, indexed by bot id.
    #[must_use]
    pub fn bots(&self) -> &[Bot] {
        &self.bots
    }

    /// Get a bot by id.
    #[must_use]
    pub fn bot(&self, id: BotId) -> Option<&Bot> {
        self.bots.get(id)
    }

    /// Current scores, indexed by team id.
    #[must_use]
    pub fn scores(&self) -> Vec<u32> {
        self.teams.iter().map(Team::score).collect()
    }

    /// Where each direction leads from `coord`, ignoring walls and bounds.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn neighbours(&self, coord: Coord) -> LegalMoves {
        neighbours(coord)
    }

    /// Legal moves from `coord`.
    #[must_use]
    pub fn legal_moves(&self, coord: Coord) -> LegalMoves {
        legal_moves(&self.maze, coord)
    }

    /// Legal moves for a bot from its current position.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::UnknownBot`] if `bot` is out of range.
    pub fn legal_moves_for(&self, bot: BotId) -> Result<LegalMoves, MoveError> {
        let bot = self.bots.get(bot).ok_or(MoveError::UnknownBot {
            bot,
            count: self.bots.len(),
        })?;
        Ok(legal_moves(&self.maze, bot.current()))
    }

    /// Positions of all items, in row-major order.
    #[must_use]
    pub fn item_positions(&self) -> Vec<Coord> {
        self.maze.item_positions().collect()
    }

    /// Positions of items inside `team`'s own territory.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::UnknownTeam`] if `team` is out of range.
    pub fn team_item_positions(&self, team: TeamId) -> Result<Vec<Coord>, MoveError> {
        let team = self.team_or_err(team)?;
        Ok(self.items_by_side(team, true))
    }

    /// Positions of items `team` can collect: those outside its territory.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::UnknownTeam`] if `team` is out of range.
    pub fn enemy_item_positions(&self, team: TeamId) -> Result<Vec<Coord>, MoveError> {
        let team = self.team_or_err(team)?;
        Ok(self.items_by_side(team, false))
    }

    /// Current positions of all bots, indexed by bot id.
    #[must_use]
    pub fn bot_positions(&self) -> Vec<Coord> {
        self.bots.iter().map(Bot::current).collect()
    }

    /// Bots not owned by `team`, in ascending index order.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::UnknownTeam`] if `team` is out of range.
    pub fn enemy_bots(&self, team: TeamId) -> Result<Vec<&Bot>, MoveError> {
        let team = self.team_or_err(team)?.id;
        Ok(self.bots.iter().filter(|bot| bot.team != team).collect())
    }

    /// The team that has cleared its opponent's territory of items, if any.
    ///
    /// When both territories are empty the team of lower index is reported.
    #[must_use]
    pub fn winner(&self) -> Option<TeamId> {
        self.teams
            .iter()
            .find(|team| self.items_by_side(team, false).is_empty())
            .map(|team| team.id)
    }

    /// Apply a move for `bot` and return the events it caused.
    ///
    /// The first event is always `BotMoved` for `bot`. See
    /// [`crate::game`] for the full rule sequence.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::UnknownBot`] if `bot` is out of range and
    /// [`MoveError::IllegalMove`] if `direction` is blocked. The universe is
    /// unchanged on error.
    pub fn apply_move(&mut self, bot: BotId, direction: Direction) -> Result<EventLog, MoveError> {
        rules::apply_move(&mut self.maze, &mut self.teams, &mut self.bots, bot, direction)
    }

    /// Render the maze with bots drawn over it.
    ///
    /// A bot hides whatever lies under it, so an item beneath a bot is not
    /// drawn. Use [`crate::layout::render_maze`] for the cells alone.
    #[must_use]
    pub fn to_text(&self) -> String {
        render_universe(self)
    }

    fn team_or_err(&self, team: TeamId) -> Result<&Team, MoveError> {
        self.team(team).ok_or(MoveError::UnknownTeam {
            team,
            count: self.teams.len(),
        })
    }

    /// Items inside (`own`) or outside `team`'s territory, in row-major order.
    fn items_by_side(&self, team: &Team, own: bool) -> Vec<Coord> {
        self.maze
            .item_positions()
            .filter(|&coord| team.in_territory(coord) == own)
            .collect()
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
