//! Output formatting utilities for CLI.

use ctfgrid::{EventLog, GameResult, SeriesStats};
use serde::Serialize;

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult<'a> {
    /// Random seed used.
    seed: u64,
    /// Winner team id (null if undecided).
    winner: Option<u8>,
    /// Winner team name (null if undecided).
    winner_name: Option<&'a str>,
    /// Rounds played.
    rounds_played: u32,
    /// Per-team results.
    teams: Vec<JsonTeamResult<'a>>,
    /// Full event log.
    events: &'a EventLog,
    /// Final grid, one string per row.
    final_grid: Vec<&'a str>,
}

/// JSON-serializable team result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTeamResult<'a> {
    /// Team id.
    id: usize,
    /// Team name.
    name: &'a str,
    /// Final score.
    score: u32,
}

impl<'a> JsonGameResult<'a> {
    /// Create from a `GameResult`.
    pub(super) fn from_game_result(result: &'a GameResult, team_names: &[&'a str]) -> Self {
        Self {
            seed: result.seed,
            winner: result.winner,
            winner_name: result
                .winner
                .and_then(|team| team_names.get(usize::from(team)).copied()),
            rounds_played: result.rounds_played,
            teams: result
                .scores
                .iter()
                .enumerate()
                .map(|(id, &score)| JsonTeamResult {
                    id,
                    name: team_names.get(id).copied().unwrap_or("unknown"),
                    score,
                })
                .collect(),
            events: &result.events,
            final_grid: result.final_grid.lines().collect(),
        }
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &GameResult, team_names: &[&str]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Game Result (seed: {})\n", result.seed));
    if let Some(winner) = result.winner {
        let name = team_names.get(usize::from(winner)).copied().unwrap_or("unknown");
        output.push_str(&format!("  Winner: Team {winner} ({name})\n"));
    } else {
        output.push_str("  Winner: none (round limit)\n");
    }
    output.push_str(&format!("  Rounds: {}\n", result.rounds_played));
    output.push_str(&format!("  Events: {}\n\n", result.events.len()));

    for (i, score) in result.scores.iter().enumerate() {
        let name = team_names.get(i).copied().unwrap_or("unknown");
        output.push_str(&format!("  Team {i} ({name}): {score} points\n"));
    }

    output
}

/// JSON-serializable series result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSeriesResult {
    /// Total games played.
    games_played: u64,
    /// Per-team statistics.
    teams: Vec<JsonSeriesTeam>,
    /// Number of undecided games.
    draws: u64,
    /// Average game length in rounds.
    avg_rounds: f64,
}

/// JSON-serializable per-team series stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonSeriesTeam {
    /// Team id.
    team: usize,
    /// Team name.
    name: String,
    /// Player kind.
    player: String,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average score.
    avg_score: f64,
    /// Score standard deviation.
    score_std_dev: f64,
}

impl JsonSeriesResult {
    /// Create from stats, team names and player labels.
    pub(super) fn from_stats(stats: &SeriesStats, team_names: &[&str], players: &[String]) -> Self {
        let teams = (0..stats.teams())
            .map(|i| JsonSeriesTeam {
                team: i,
                name: team_names.get(i).map(ToString::to_string).unwrap_or_default(),
                player: players.get(i).cloned().unwrap_or_default(),
                wins: stats.wins.get(i).copied().unwrap_or(0),
                win_rate: stats.win_rate(i),
                avg_score: stats.avg_score(i),
                score_std_dev: stats.score_std_dev(i),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            teams,
            draws: stats.draws,
            avg_rounds: stats.avg_rounds(),
        }
    }
}

/// Format series stats as human-readable text.
pub(super) fn format_series_text(
    stats: &SeriesStats,
    team_names: &[&str],
    players: &[String],
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Series Results ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for i in 0..stats.teams() {
        let name = team_names.get(i).copied().unwrap_or("unknown");
        let player = players.get(i).map_or("unknown", String::as_str);
        let wins = stats.wins.get(i).copied().unwrap_or(0);
        let rate = stats.win_rate(i) * 100.0;
        output.push_str(&format!("  Team {i} ({name}, {player}): {rate:.1}% ({wins} wins)\n"));
    }
    output.push_str(&format!(
        "  Undecided: {} ({:.1}%)\n\n",
        stats.draws,
        stats.draw_rate() * 100.0
    ));

    output.push_str("Average Scores:\n");
    for i in 0..stats.teams() {
        let name = team_names.get(i).copied().unwrap_or("unknown");
        output.push_str(&format!(
            "  Team {i} ({name}): {:.1} (+/- {:.1})\n",
            stats.avg_score(i),
            stats.score_std_dev(i)
        ));
    }

    output.push_str(&format!("\nAverage Game Length: {:.0} rounds\n", stats.avg_rounds()));

    output
}

/// Format series stats as CSV.
pub(super) fn format_series_csv(
    stats: &SeriesStats,
    team_names: &[&str],
    players: &[String],
) -> String {
    let mut output = String::new();

    // Header
    output.push_str("team,name,player,wins,win_rate,avg_score,score_std_dev\n");

    // Data rows
    for i in 0..stats.teams() {
        output.push_str(&format!(
            "{},{},{},{},{:.4},{:.2},{:.2}\n",
            i,
            team_names.get(i).copied().unwrap_or("unknown"),
            players.get(i).map_or("unknown", String::as_str),
            stats.wins.get(i).copied().unwrap_or(0),
            stats.win_rate(i),
            stats.avg_score(i),
            stats.score_std_dev(i)
        ));
    }

    output
}
