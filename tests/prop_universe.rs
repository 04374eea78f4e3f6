//! Property-based tests for the rules engine.
//!
//! Random mazes with random bot placements are driven by random move
//! sequences; every step is checked against the engine's guarantees.
//! Run with: cargo test --release prop_universe

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use ctfgrid::game::{DEFAULT_TEAM_NAMES, check_invariants};
use ctfgrid::layout::render_maze;
use ctfgrid::{Cell, Coord, Direction, Event, Layout, Maze, Role, Universe};

/// Build a universe from raw cell kinds, or `None` if too few cells are open.
///
/// Bots spawn on bare floor only, as they do in a textual layout.
fn build_universe(
    width: u16,
    height: u16,
    kinds: &[u8],
    pairs: usize,
    offset: usize,
) -> Option<Universe> {
    let cells: Vec<Cell> = kinds
        .iter()
        .map(|kind| match kind {
            0..=2 => Cell::WALL,
            3..=4 => Cell::OPEN_ITEM,
            _ => Cell::OPEN,
        })
        .collect();
    let maze = Maze::new(width, height, cells).unwrap();
    let open: Vec<Coord> = maze
        .iter()
        .filter(|&(_, cell)| cell == Cell::OPEN)
        .map(|(coord, _)| coord)
        .collect();
    if open.len() < pairs * 2 {
        return None;
    }
    let spawns: Vec<Coord> = (0..pairs * 2)
        .map(|i| open[(offset + i) % open.len()])
        .collect();
    Universe::new(maze, &spawns, &DEFAULT_TEAM_NAMES).ok()
}

fn arb_universe() -> impl Strategy<Value = Universe> {
    (1u16..=6, 1u16..=6)
        .prop_flat_map(|(half, height)| {
            let width = half * 2;
            let cells = usize::from(width) * usize::from(height);
            (
                Just(width),
                Just(height),
                prop::collection::vec(0u8..10, cells),
                1usize..=3,
                any::<usize>(),
            )
        })
        .prop_filter_map("too few open cells", |(width, height, kinds, pairs, offset)| {
            build_universe(width, height, &kinds, pairs, offset)
        })
}

fn arb_moves() -> impl Strategy<Value = Vec<(usize, Direction)>> {
    prop::collection::vec(
        (any::<usize>(), prop::sample::select(Direction::ALL.to_vec())),
        0..80,
    )
}

fn roles_consistent(universe: &Universe) -> bool {
    universe.bots().iter().all(|bot| {
        let home = universe.team(bot.team).unwrap().territory;
        (bot.role() == Role::Destroyer) == home.contains(bot.current())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Legal moves start with `BotMoved` and land on the resolved
    /// destination, unless the mover was eaten on arrival.
    #[test]
    fn prop_legal_move_lands_on_destination(
        mut universe in arb_universe(),
        moves in arb_moves()
    ) {
        let bots = universe.bots().len();
        for (pick, direction) in moves {
            let bot = pick % bots;
            let legal = universe.legal_moves_for(bot).unwrap();
            let Some(target) = legal.get(direction) else {
                continue;
            };
            let spawn = universe.bot(bot).unwrap().spawn;

            let events = universe.apply_move(bot, direction).unwrap();

            prop_assert_eq!(events[0], Event::BotMoved { bot });
            let eaten = events.iter().any(|event| {
                matches!(event, Event::BotEaten { harvester, .. } if *harvester == bot)
            });
            let expected = if eaten { spawn } else { target };
            prop_assert_eq!(universe.bot(bot).unwrap().current(), expected);
        }
    }

    /// Illegal requests never change anything, however often they repeat.
    #[test]
    fn prop_illegal_moves_change_nothing(
        mut universe in arb_universe(),
        moves in arb_moves()
    ) {
        let bots = universe.bots().len();
        for (pick, direction) in moves {
            let bot = pick % bots;
            if universe.legal_moves_for(bot).unwrap().contains(direction) {
                universe.apply_move(bot, direction).unwrap();
                continue;
            }
            let before = universe.clone();
            for _ in 0..3 {
                prop_assert!(universe.apply_move(bot, direction).is_err());
            }
            prop_assert_eq!(&universe, &before);
        }
    }

    /// Roles follow position, scores never drop and invariants hold after
    /// every move.
    #[test]
    fn prop_state_stays_consistent(
        mut universe in arb_universe(),
        moves in arb_moves()
    ) {
        let bots = universe.bots().len();
        prop_assert!(roles_consistent(&universe));
        let mut scores = universe.scores();

        for (pick, direction) in moves {
            let bot = pick % bots;
            if universe.apply_move(bot, direction).is_err() {
                continue;
            }
            prop_assert!(roles_consistent(&universe));
            prop_assert!(check_invariants(&universe).is_empty());

            let now = universe.scores();
            for (new, old) in now.iter().zip(&scores) {
                prop_assert!(new >= old);
            }
            scores = now;
        }
    }

    /// `TeamWon(T)` is reported exactly when a scoring move by `T` leaves no
    /// item that `T` can collect.
    #[test]
    fn prop_win_iff_enemy_items_cleared(
        mut universe in arb_universe(),
        moves in arb_moves()
    ) {
        let bots = universe.bots().len();
        for (pick, direction) in moves {
            let bot = pick % bots;
            let team = universe.bot(bot).unwrap().team;
            let Ok(events) = universe.apply_move(bot, direction) else {
                continue;
            };

            let scored = events.contains(&Event::BotScored { bot });
            let won = events.contains(&Event::TeamWon { team });
            let cleared = universe.enemy_item_positions(team).unwrap().is_empty();
            prop_assert_eq!(won, scored && cleared);
            if won {
                prop_assert_eq!(events.last(), Some(&Event::TeamWon { team }));
            }
        }
    }

    /// Events come in the documented order: move, eliminations, score, win.
    #[test]
    fn prop_event_order(
        mut universe in arb_universe(),
        moves in arb_moves()
    ) {
        let bots = universe.bots().len();
        for (pick, direction) in moves {
            let bot = pick % bots;
            let Ok(events) = universe.apply_move(bot, direction) else {
                continue;
            };
            let rank = |event: &Event| match event {
                Event::BotMoved { .. } => 0,
                Event::BotEaten { .. } => 1,
                Event::BotScored { .. } => 2,
                Event::TeamWon { .. } => 3,
            };
            prop_assert!(events.windows(2).all(|pair| rank(&pair[0]) <= rank(&pair[1])));
            prop_assert_eq!(events.iter().filter(|e| rank(e) == 0).count(), 1);
        }
    }

    /// Rendering the maze and parsing it back gives the same cells.
    #[test]
    fn prop_maze_text_round_trip(
        mut universe in arb_universe(),
        moves in arb_moves()
    ) {
        let bots = universe.bots().len();
        for (pick, direction) in moves {
            let _ = universe.apply_move(pick % bots, direction);
        }
        let layout = Layout::parse(&render_maze(universe.maze())).unwrap();
        prop_assert_eq!(&layout.maze, universe.maze());
    }

    /// A fresh universe renders to text that parses back to itself, as long
    /// as no bot hides an item.
    #[test]
    fn prop_universe_text_round_trip(universe in arb_universe()) {
        let reparsed = Universe::parse(&universe.to_text(), &DEFAULT_TEAM_NAMES).unwrap();
        prop_assert_eq!(reparsed, universe);
    }

    /// Whichever of the two moves last, a destroyer sharing a cell with an
    /// enemy harvester sends the harvester home.
    #[test]
    fn prop_elimination_is_symmetric(half in 2i32..8, destroyer_moves in any::<bool>()) {
        // One open row; bot 0 starts one step inside the enemy half, bot 1
        // guards the cell next to it.
        let width = half * 2;
        let mut row: Vec<char> = vec![' '; usize::try_from(width).unwrap()];
        let harvester_spawn = usize::try_from(half - 1).unwrap();
        let guard = usize::try_from(half + 1).unwrap();
        row[harvester_spawn] = '0';
        row[guard] = '1';
        let text: String = row.into_iter().collect();
        let mut universe = Universe::parse(&text, &DEFAULT_TEAM_NAMES).unwrap();

        universe.apply_move(0, Direction::East).unwrap();
        prop_assert_eq!(universe.bot(0).unwrap().role(), Role::Harvester);
        prop_assert_eq!(universe.bot(1).unwrap().role(), Role::Destroyer);

        let events = if destroyer_moves {
            universe.apply_move(1, Direction::West).unwrap()
        } else {
            universe.apply_move(0, Direction::East).unwrap()
        };

        let eaten = Event::BotEaten { harvester: 0, destroyer: 1 };
        prop_assert!(events.contains(&eaten));
        prop_assert_eq!(universe.bot(0).unwrap().current(), Coord::new(half - 1, 0));
        prop_assert_eq!(universe.bot(0).unwrap().role(), Role::Destroyer);
    }
}
