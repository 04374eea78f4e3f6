//! Universe invariants - sanity checks that detect bugs.
//!
//! The rules engine maintains all of these by construction. A violation means
//! a bug in the engine, never a gameplay outcome.

use crate::game::{Cell, TEAM_COUNT, Universe};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all universe invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(universe: &Universe) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violate = |message: String| violations.push(InvariantViolation { message });
    let maze = universe.maze();
    let teams = universe.teams();

    for (coord, cell) in maze.iter() {
        if !cell.is_valid() {
            violate(format!("Cell at {coord} has invalid contents {cell:?}"));
        }
    }

    // Territories must split the width exactly.
    if teams.len() == TEAM_COUNT {
        let (west, east) = (teams[0].territory, teams[1].territory);
        if west.min_x != 0
            || west.max_x + 1 != east.min_x
            || east.max_x != i32::from(maze.width()) - 1
        {
            violate(format!(
                "Territories {west:?} and {east:?} do not partition width {}",
                maze.width()
            ));
        }
    } else {
        violate(format!("Universe has {} teams", teams.len()));
    }

    for bot in universe.bots() {
        let pos = bot.current();
        match maze.cell_at(pos) {
            None => violate(format!("Bot {} at {pos} is outside the maze", bot.id)),
            Some(cell) if cell.contains(Cell::WALL) => {
                violate(format!("Bot {} at {pos} stands on a wall", bot.id));
            }
            Some(_) => {}
        }

        match universe.team(bot.team) {
            None => violate(format!("Bot {} belongs to unknown team {}", bot.id, bot.team)),
            Some(team) => {
                if !team.bots.contains(&bot.id) {
                    violate(format!(
                        "Bot {} is missing from team {}'s roster",
                        bot.id, team.id
                    ));
                }
                if bot.territory != team.territory {
                    violate(format!(
                        "Bot {} has territory {:?}, team {} has {:?}",
                        bot.id, bot.territory, team.id, team.territory
                    ));
                }
            }
        }
    }

    for team in teams {
        for &member in &team.bots {
            if universe.bot(member).is_none_or(|bot| bot.team != team.id) {
                violate(format!("Team {} lists bot {member} it does not own", team.id));
            }
        }
    }

    violations
}

/// Assert all universe invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(universe: &Universe) {
    let violations = check_invariants(universe);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Universe invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_universe: &Universe) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coord, DEFAULT_TEAM_NAMES, Direction, Maze};

    fn create_valid_universe() -> Universe {
        Universe::parse(
            "########\n#0 .. 1#\n#2 .. 3#\n########",
            &DEFAULT_TEAM_NAMES,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_universe_passes() {
        let universe = create_valid_universe();
        assert!(check_invariants(&universe).is_empty());
    }

    #[test]
    fn test_invariants_hold_after_moves() {
        let mut universe = create_valid_universe();
        for direction in [Direction::East, Direction::East, Direction::East, Direction::East] {
            universe.apply_move(0, direction).unwrap();
            assert_invariants(&universe);
        }
        assert!(check_invariants(&universe).is_empty());
    }

    #[test]
    fn test_empty_universe_passes() {
        let maze = Maze::walled(4, 4).unwrap();
        let universe = Universe::new(maze, &[], &DEFAULT_TEAM_NAMES).unwrap();
        assert!(check_invariants(&universe).is_empty());
        assert!(universe.bots().is_empty());
    }

    #[test]
    fn test_bot_on_wall_detected() {
        let mut universe = create_valid_universe();
        universe.bots[0].move_to(Coord::new(0, 0));
        let violations = check_invariants(&universe);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("wall"));
    }

    #[test]
    fn test_bot_outside_maze_detected() {
        let mut universe = create_valid_universe();
        universe.bots[1].move_to(Coord::new(-1, 1));
        let violations = check_invariants(&universe);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("outside"));
    }

    #[test]
    fn test_roster_mismatch_detected() {
        let mut universe = create_valid_universe();
        universe.teams[0].bots.push(1);
        let violations = check_invariants(&universe);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("does not own"));
    }

    #[test]
    fn test_multiple_violations_all_reported() {
        let mut universe = create_valid_universe();
        universe.bots[0].move_to(Coord::new(0, 0));
        universe.teams[1].bots.clear();
        let violations = check_invariants(&universe);
        assert!(
            violations.len() >= 3,
            "Should have at least 3 violations: {violations:?}"
        );
    }
}
