#![no_main]

//! Move application fuzzer.
//!
//! Builds a small universe from fuzzer-chosen cells and spawns, then applies
//! a fuzzer-chosen move sequence, checking after every move that:
//! 1. Rejected moves leave the universe untouched
//! 2. Accepted moves start with `BotMoved` for the mover
//! 3. Scores never decrease
//! 4. Universe invariants hold

use arbitrary::Arbitrary;
use ctfgrid::game::{DEFAULT_TEAM_NAMES, check_invariants};
use ctfgrid::{Cell, Coord, Direction, Event, Maze, Universe};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated move request.
#[derive(Arbitrary, Debug, Clone, Copy)]
struct FuzzMove {
    /// Bot index, taken modulo a little more than the bot count so that
    /// unknown bots are exercised too.
    bot: u8,
    /// Direction index into `Direction::ALL`.
    direction: u8,
}

/// Structured input for move fuzzing.
#[derive(Arbitrary, Debug)]
struct MoveInput {
    /// Half the maze width.
    half_width: u8,
    /// Maze height.
    height: u8,
    /// Cell kinds, cycled to fill the maze.
    cells: Vec<u8>,
    /// Spawn cells as indices into the open cells.
    spawns: Vec<u8>,
    /// Moves to apply.
    moves: Vec<FuzzMove>,
}

fuzz_target!(|input: MoveInput| {
    // Cap sizes to avoid excessive runtime
    let width = u16::from(input.half_width % 8 + 1) * 2;
    let height = u16::from(input.height % 8 + 1);
    if input.cells.is_empty() {
        return;
    }

    let count = usize::from(width) * usize::from(height);
    let cells: Vec<Cell> = input
        .cells
        .iter()
        .cycle()
        .take(count)
        .map(|kind| match kind % 4 {
            0 => Cell::WALL,
            1 => Cell::OPEN_ITEM,
            _ => Cell::OPEN,
        })
        .collect();
    let Ok(maze) = Maze::new(width, height, cells) else {
        return;
    };

    let open: Vec<Coord> = maze
        .iter()
        .filter(|(_, cell)| cell.is_open())
        .map(|(coord, _)| coord)
        .collect();
    if open.is_empty() {
        return;
    }
    let bots = (input.spawns.len() / 2 * 2).min(8);
    let spawns: Vec<Coord> = input.spawns[..bots]
        .iter()
        .map(|&idx| open[usize::from(idx) % open.len()])
        .collect();

    let Ok(mut universe) = Universe::new(maze, &spawns, &DEFAULT_TEAM_NAMES) else {
        return;
    };
    assert!(check_invariants(&universe).is_empty());

    let mut scores = universe.scores();
    for mv in input.moves.iter().take(200) {
        let bot = usize::from(mv.bot) % (bots + 2);
        let direction = Direction::ALL[usize::from(mv.direction) % Direction::ALL.len()];

        let before = universe.clone();
        match universe.apply_move(bot, direction) {
            Ok(events) => {
                assert_eq!(events.first(), Some(&Event::BotMoved { bot }));
            }
            Err(_) => {
                assert_eq!(universe, before, "rejected move mutated the universe");
                continue;
            }
        }

        let violations = check_invariants(&universe);
        assert!(violations.is_empty(), "Invariants violated: {violations:?}");

        let now = universe.scores();
        assert!(now.iter().zip(&scores).all(|(new, old)| new >= old));
        scores = now;
    }
});
