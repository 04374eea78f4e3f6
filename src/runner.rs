//! Match runner for ctfgrid games.
//!
//! Provides a pure function interface: `(universe, players, config) -> GameResult`
//!
//! The runner handles:
//! - Round-robin move solicitation in bot index order
//! - Sequential move application through the rules engine
//! - Termination on the first win or after the round limit
//! - Parallel series of independent games with rayon

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{ConstructionError, MoveError};
use crate::game::{BotId, Event, EventLog, TEAM_COUNT, TeamId, Universe};
use crate::layout::Layout;
use crate::player::{Player, PlayerKind};

/// Default round limit.
pub const DEFAULT_MAX_ROUNDS: u32 = 300;

/// Configuration for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Maximum rounds before the game ends undecided.
    pub max_rounds: u32,
    /// Seed for randomised players. A series uses `seed + game index`.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            seed: 0,
        }
    }
}

/// Error type for runner operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunnerError {
    /// Wrong number of players for the teams in the universe.
    #[error("expected {expected} players, got {found}")]
    PlayerCount {
        /// Number of teams.
        expected: usize,
        /// Number of players supplied.
        found: usize,
    },
    /// A player answered with a move the rules reject.
    #[error("round {round}: {source}")]
    Move {
        /// Round in which the move was requested, starting at 1.
        round: u32,
        /// The rejected move.
        source: MoveError,
    },
    /// The universe for a series could not be built.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Final result of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The winning team (None if the round limit was reached).
    pub winner: Option<TeamId>,
    /// Rounds started, including the one in which the game was won.
    pub rounds_played: u32,
    /// Final score of each team.
    pub scores: Vec<u32>,
    /// Every event in the order it happened.
    pub events: EventLog,
    /// The seed used for this game.
    pub seed: u64,
    /// The final universe rendered as text.
    pub final_grid: String,
}

/// Run a complete game.
///
/// `players[t]` chooses the moves of every bot of team `t`. Each round asks
/// every bot, in index order, for a move and applies it. The game stops at
/// the first win or after `config.max_rounds` rounds. A universe that is
/// already decided finishes after zero rounds.
///
/// # Determinism
///
/// Given the same universe, deterministic players and config, this function
/// always produces the same `GameResult`.
///
/// # Errors
///
/// Returns an error if the number of players does not match the number of
/// teams, or if a player answers with a move the rules reject.
pub fn run_game(
    mut universe: Universe,
    players: &mut [Box<dyn Player>],
    config: &MatchConfig,
) -> Result<GameResult, RunnerError> {
    if players.len() != universe.teams().len() {
        return Err(RunnerError::PlayerCount {
            expected: universe.teams().len(),
            found: players.len(),
        });
    }

    let owners: Vec<(BotId, usize)> = universe
        .bots()
        .iter()
        .map(|bot| (bot.id, usize::from(bot.team)))
        .collect();

    info!(
        target: "ctfgrid::runner",
        seed = config.seed,
        max_rounds = config.max_rounds,
        bots = owners.len(),
        "game.start"
    );

    for &(bot, team) in &owners {
        players[team].set_initial(bot, &universe);
    }

    let mut events = EventLog::new();
    let mut winner = universe.winner();
    let mut rounds_played = 0;

    while winner.is_none() && rounds_played < config.max_rounds {
        rounds_played += 1;
        debug!(target: "ctfgrid::runner", round = rounds_played, "round.start");

        for &(bot, team) in &owners {
            let direction = players[team].get_move(bot, &universe);
            let step = universe
                .apply_move(bot, direction)
                .map_err(|source| RunnerError::Move {
                    round: rounds_played,
                    source,
                })?;

            winner = step.iter().find_map(|event| match event {
                Event::TeamWon { team } => Some(*team),
                _ => None,
            });
            events.extend(step);
            if winner.is_some() {
                break;
            }
        }
    }

    let scores = universe.scores();
    info!(
        target: "ctfgrid::runner",
        seed = config.seed,
        winner = ?winner,
        rounds = rounds_played,
        scores = ?scores,
        "game.end"
    );

    Ok(GameResult {
        winner,
        rounds_played,
        scores,
        events,
        seed: config.seed,
        final_grid: universe.to_text(),
    })
}

/// Seed for the player of `team` in a game seeded with `game_seed`.
#[must_use]
pub fn player_seed(game_seed: u64, team: TeamId) -> u64 {
    game_seed ^ (u64::from(team) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Build one player per team for a game seeded with `game_seed`.
#[must_use]
pub fn build_players(kinds: &[PlayerKind], game_seed: u64) -> Vec<Box<dyn Player>> {
    kinds
        .iter()
        .zip(0..)
        .map(|(kind, team)| kind.build(player_seed(game_seed, team)))
        .collect()
}

/// Aggregated statistics over a series of games.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeriesStats {
    /// Total games played.
    pub games_played: u64,
    /// Win count per team.
    pub wins: Vec<u64>,
    /// Games that reached the round limit.
    pub draws: u64,
    /// Total score per team.
    total_scores: Vec<u64>,
    /// Score sum of squares for std dev calculation.
    score_sq_sums: Vec<f64>,
    /// Total rounds across all games.
    total_rounds: u64,
}

impl SeriesStats {
    /// Create empty stats for `teams` teams.
    #[must_use]
    pub fn new(teams: usize) -> Self {
        Self {
            games_played: 0,
            wins: vec![0; teams],
            draws: 0,
            total_scores: vec![0; teams],
            score_sq_sums: vec![0.0; teams],
            total_rounds: 0,
        }
    }

    /// Add a game result to the stats.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_rounds += u64::from(result.rounds_played);

        match result.winner.map(usize::from) {
            Some(idx) if idx < self.wins.len() => self.wins[idx] += 1,
            Some(_) => {}
            None => self.draws += 1,
        }

        for (i, &score) in result.scores.iter().enumerate() {
            if i < self.total_scores.len() {
                self.total_scores[i] += u64::from(score);
                self.score_sq_sums[i] += f64::from(score) * f64::from(score);
            }
        }
    }

    /// Merge the stats of another partial series into this one.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.draws += other.draws;
        self.total_rounds += other.total_rounds;
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        for (a, b) in self.total_scores.iter_mut().zip(&other.total_scores) {
            *a += b;
        }
        for (a, b) in self.score_sq_sums.iter_mut().zip(&other.score_sq_sums) {
            *a += b;
        }
    }

    /// Number of teams tracked.
    #[must_use]
    pub fn teams(&self) -> usize {
        self.wins.len()
    }

    /// Win rate for a team (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self, team: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins.get(team).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Draw rate (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn draw_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.draws as f64 / self.games_played as f64
    }

    /// Average score for a team.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_score(&self, team: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_scores.get(team).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Score standard deviation for a team.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score_std_dev(&self, team: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let n = self.games_played as f64;
        let mean = self.avg_score(team);
        let sq_sum = self.score_sq_sums.get(team).copied().unwrap_or(0.0);
        let variance = (sq_sum / n) - (mean * mean);
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Average game length in rounds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_rounds(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.games_played as f64
    }
}

/// Run `games` independent games on `layout` in parallel.
///
/// Game `i` is seeded with `config.seed + i`. See [`run_series_with`].
///
/// # Errors
///
/// Returns an error if the layout does not build a universe or any game
/// fails.
pub fn run_series(
    layout: &Layout,
    team_names: &[&str],
    kinds: &[PlayerKind],
    games: u64,
    config: &MatchConfig,
) -> Result<SeriesStats, RunnerError> {
    run_series_with(layout, team_names, kinds, games, config, |_| {})
}

/// Run a series, calling `on_game` after each finished game.
///
/// Games run on the rayon thread pool. Each thread accumulates into its own
/// stats, merged at the end.
///
/// # Errors
///
/// Returns an error if the layout does not build a universe, the number of
/// player kinds does not match the teams, or any game fails.
pub fn run_series_with<F>(
    layout: &Layout,
    team_names: &[&str],
    kinds: &[PlayerKind],
    games: u64,
    config: &MatchConfig,
    on_game: F,
) -> Result<SeriesStats, RunnerError>
where
    F: Fn(&GameResult) + Sync,
{
    let universe = Universe::from_layout(layout, team_names)?;
    if kinds.len() != TEAM_COUNT {
        return Err(RunnerError::PlayerCount {
            expected: TEAM_COUNT,
            found: kinds.len(),
        });
    }

    (0..games)
        .into_par_iter()
        .map(|i| {
            let game_config = MatchConfig {
                seed: config.seed.wrapping_add(i),
                ..*config
            };
            let mut players = build_players(kinds, game_config.seed);
            let result = run_game(universe.clone(), &mut players, &game_config)?;
            on_game(&result);
            Ok(result)
        })
        .try_fold(
            || SeriesStats::new(TEAM_COUNT),
            |mut local_stats, result: Result<GameResult, RunnerError>| {
                local_stats.add_result(&result?);
                Ok(local_stats)
            },
        )
        .try_reduce(
            || SeriesStats::new(TEAM_COUNT),
            |mut a, b| {
                a.merge(&b);
                Ok(a)
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DEFAULT_TEAM_NAMES, Direction};
    use crate::player::{RandomPlayer, StoppingPlayer};

    /// A player replaying a fixed list of moves, then stopping.
    struct ScriptedPlayer {
        moves: Vec<Direction>,
        next: usize,
    }

    impl ScriptedPlayer {
        fn boxed(moves: &[Direction]) -> Box<dyn Player> {
            Box::new(Self {
                moves: moves.to_vec(),
                next: 0,
            })
        }
    }

    impl Player for ScriptedPlayer {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn get_move(&mut self, _bot: BotId, _universe: &Universe) -> Direction {
            let direction = self.moves.get(self.next).copied().unwrap_or(Direction::Stop);
            self.next += 1;
            direction
        }
    }

    fn strip() -> Universe {
        // Team 0 owns x in [0, 3], team 1 owns [4, 7]; one item per side.
        Universe::parse("#.0 .1 #", &DEFAULT_TEAM_NAMES).unwrap()
    }

    fn stoppers() -> Vec<Box<dyn Player>> {
        vec![Box::new(StoppingPlayer), Box::new(StoppingPlayer)]
    }

    #[test]
    fn test_match_config_default() {
        let config = MatchConfig::default();
        assert_eq!(config.max_rounds, 300);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_match_config_json_defaults_missing_fields() {
        let config: MatchConfig = serde_json::from_str(r#"{"max_rounds": 12}"#).unwrap();
        assert_eq!(config.max_rounds, 12);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_player_count_mismatch() {
        let mut players: Vec<Box<dyn Player>> = vec![Box::new(StoppingPlayer)];
        let result = run_game(strip(), &mut players, &MatchConfig::default());
        assert_eq!(
            result,
            Err(RunnerError::PlayerCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_stopping_players_reach_round_limit() {
        let config = MatchConfig {
            max_rounds: 5,
            seed: 9,
        };
        let result = run_game(strip(), &mut stoppers(), &config).unwrap();
        assert_eq!(result.winner, None);
        assert_eq!(result.rounds_played, 5);
        assert_eq!(result.scores, vec![0, 0]);
        assert_eq!(result.seed, 9);
        // Two bots, five rounds, one BotMoved each.
        assert_eq!(result.events.len(), 10);
        assert!(
            result
                .events
                .iter()
                .all(|event| matches!(event, Event::BotMoved { .. }))
        );
    }

    #[test]
    fn test_scripted_win_stops_mid_round() {
        // Bot 0 walks east twice onto the enemy item at (4, 0) and wins.
        let mut players = vec![
            ScriptedPlayer::boxed(&[Direction::East, Direction::East]),
            ScriptedPlayer::boxed(&[]),
        ];
        let universe = strip();
        assert_eq!(universe.enemy_item_positions(0).unwrap().len(), 1);

        let result = run_game(universe, &mut players, &MatchConfig::default()).unwrap();
        assert_eq!(result.winner, Some(0));
        assert_eq!(result.rounds_played, 2);
        assert_eq!(result.scores, vec![1, 0]);
        assert_eq!(
            &result.events[result.events.len() - 2..],
            &[Event::BotScored { bot: 0 }, Event::TeamWon { team: 0 }]
        );
        assert_eq!(result.final_grid, "#.  01 #");
    }

    #[test]
    fn test_illegal_player_move_is_error() {
        let mut players = vec![
            ScriptedPlayer::boxed(&[Direction::North]),
            ScriptedPlayer::boxed(&[]),
        ];
        let result = run_game(strip(), &mut players, &MatchConfig::default());
        assert!(matches!(
            result,
            Err(RunnerError::Move {
                round: 1,
                source: MoveError::IllegalMove { bot: 0, .. }
            })
        ));
    }

    #[test]
    fn test_decided_universe_plays_no_rounds() {
        let universe = Universe::parse("#0  1#", &DEFAULT_TEAM_NAMES).unwrap();
        let result = run_game(universe, &mut stoppers(), &MatchConfig::default()).unwrap();
        assert_eq!(result.winner, Some(0));
        assert_eq!(result.rounds_played, 0);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_random_game_is_deterministic() {
        let universe = Universe::parse(
            "########\n#0 .  1#\n#  ## .#\n#2.  3 #\n########",
            &DEFAULT_TEAM_NAMES,
        )
        .unwrap();
        let config = MatchConfig {
            max_rounds: 50,
            seed: 3,
        };
        let run = || {
            let mut players: Vec<Box<dyn Player>> =
                vec![Box::new(RandomPlayer::new(1)), Box::new(RandomPlayer::new(2))];
            run_game(universe.clone(), &mut players, &config).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_player_seed_differs_per_team() {
        assert_ne!(player_seed(5, 0), player_seed(5, 1));
        assert_eq!(player_seed(5, 1), player_seed(5, 1));
    }

    #[test]
    fn test_series_stats_add_and_merge() {
        let win = GameResult {
            winner: Some(1),
            rounds_played: 10,
            scores: vec![1, 3],
            events: Vec::new(),
            seed: 0,
            final_grid: String::new(),
        };
        let draw = GameResult {
            winner: None,
            rounds_played: 30,
            scores: vec![1, 1],
            ..win.clone()
        };

        let mut a = SeriesStats::new(2);
        a.add_result(&win);
        let mut b = SeriesStats::new(2);
        b.add_result(&draw);
        a.merge(&b);

        assert_eq!(a.games_played, 2);
        assert_eq!(a.wins, vec![0, 1]);
        assert_eq!(a.draws, 1);
        assert!((a.win_rate(1) - 0.5).abs() < f64::EPSILON);
        assert!((a.draw_rate() - 0.5).abs() < f64::EPSILON);
        assert!((a.avg_score(0) - 1.0).abs() < f64::EPSILON);
        assert!((a.avg_score(1) - 2.0).abs() < f64::EPSILON);
        assert!(a.score_std_dev(0).abs() < f64::EPSILON);
        assert!((a.score_std_dev(1) - 1.0).abs() < 1e-9);
        assert!((a.avg_rounds() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_stats() {
        let stats = SeriesStats::new(2);
        assert_eq!(stats.teams(), 2);
        assert!(stats.win_rate(0).abs() < f64::EPSILON);
        assert!(stats.avg_rounds().abs() < f64::EPSILON);
    }

    #[test]
    fn test_run_series_counts_games() {
        let layout = Layout::parse("#.0 .1 #").unwrap();
        let config = MatchConfig {
            max_rounds: 4,
            seed: 100,
        };
        let stats = run_series(
            &layout,
            &DEFAULT_TEAM_NAMES,
            &[PlayerKind::Stopping, PlayerKind::Stopping],
            8,
            &config,
        )
        .unwrap();
        assert_eq!(stats.games_played, 8);
        assert_eq!(stats.draws, 8);
        assert!((stats.avg_rounds() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_run_series_is_deterministic() {
        let layout =
            Layout::parse("########\n#0 .  1#\n#  ## .#\n#2.  3 #\n########").unwrap();
        let config = MatchConfig {
            max_rounds: 40,
            seed: 7,
        };
        let kinds = [PlayerKind::Random, PlayerKind::Random];
        let a = run_series(&layout, &DEFAULT_TEAM_NAMES, &kinds, 16, &config).unwrap();
        let b = run_series(&layout, &DEFAULT_TEAM_NAMES, &kinds, 16, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_series_rejects_bad_layout() {
        let layout = Layout::parse("#0 1#").unwrap();
        let result = run_series(
            &layout,
            &DEFAULT_TEAM_NAMES,
            &[PlayerKind::Stopping, PlayerKind::Stopping],
            1,
            &MatchConfig::default(),
        );
        assert_eq!(
            result,
            Err(RunnerError::Construction(ConstructionError::OddWidth(5)))
        );
    }
}
