//! Move resolution: where each direction leads and which directions are legal.
//!
//! Results are fixed-size tables indexed by direction, so enumeration always
//! follows the canonical order north, south, east, west, stop and no heap
//! allocation is needed.

use crate::game::{Coord, Direction, Maze};

/// Destinations for a set of directions, in canonical direction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMoves {
    /// Destination per direction, indexed by `Direction::index`.
    targets: [Option<Coord>; 5],
}

impl LegalMoves {
    /// Where `direction` leads, if it is part of this set.
    #[must_use]
    #[inline]
    pub const fn get(&self, direction: Direction) -> Option<Coord> {
        self.targets[direction.index()]
    }

    /// Check if `direction` is part of this set.
    #[must_use]
    pub const fn contains(&self, direction: Direction) -> bool {
        self.get(direction).is_some()
    }

    /// Number of directions in this set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.iter().filter(|t| t.is_some()).count()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over `(direction, destination)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.get(d).map(|target| (d, target)))
    }

    /// The directions in this set, in canonical order.
    #[must_use]
    pub fn directions(&self) -> Vec<Direction> {
        self.iter().map(|(d, _)| d).collect()
    }
}

/// Where each of the five directions leads from `coord`.
///
/// Pure arithmetic: destinations may lie off the maze.
#[must_use]
pub fn neighbours(coord: Coord) -> LegalMoves {
    let mut targets = [None; 5];
    for direction in Direction::ALL {
        targets[direction.index()] = Some(coord.step(direction));
    }
    LegalMoves { targets }
}

/// The directions from `coord` whose destination is in bounds and open.
///
/// `Stop` is legal exactly when `coord` itself is open.
#[must_use]
pub fn legal_moves(maze: &Maze, coord: Coord) -> LegalMoves {
    let mut targets = neighbours(coord).targets;
    for target in &mut targets {
        if target.is_some_and(|t| !maze.is_open(t)) {
            *target = None;
        }
    }
    LegalMoves { targets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    /// 4x3 maze:
    /// ```text
    /// ####
    /// #  #
    /// ####
    /// ```
    fn corridor() -> Maze {
        Maze::walled(4, 3).unwrap()
    }

    #[test]
    fn test_neighbours_all_five() {
        let n = neighbours(Coord::new(0, 0));
        assert_eq!(n.len(), 5);
        assert_eq!(n.get(Direction::North), Some(Coord::new(0, -1)));
        assert_eq!(n.get(Direction::West), Some(Coord::new(-1, 0)));
        assert_eq!(n.get(Direction::Stop), Some(Coord::new(0, 0)));
    }

    #[test]
    fn test_legal_moves_filters_walls() {
        let maze = corridor();
        let moves = legal_moves(&maze, Coord::new(1, 1));
        assert_eq!(moves.directions(), vec![Direction::East, Direction::Stop]);
        assert_eq!(moves.get(Direction::East), Some(Coord::new(2, 1)));
        assert!(!moves.contains(Direction::North));
    }

    #[test]
    fn test_legal_moves_filters_out_of_bounds() {
        let maze = Maze::new(2, 1, vec![Cell::OPEN, Cell::OPEN]).unwrap();
        let moves = legal_moves(&maze, Coord::new(0, 0));
        assert_eq!(moves.directions(), vec![Direction::East, Direction::Stop]);
    }

    #[test]
    fn test_legal_moves_item_is_traversable() {
        let maze = Maze::new(2, 1, vec![Cell::OPEN, Cell::OPEN_ITEM]).unwrap();
        let moves = legal_moves(&maze, Coord::new(0, 0));
        assert!(moves.contains(Direction::East));
    }

    #[test]
    fn test_stop_illegal_on_wall() {
        let maze = corridor();
        let moves = legal_moves(&maze, Coord::new(0, 0));
        assert!(!moves.contains(Direction::Stop));
        assert!(moves.is_empty());
    }

    #[test]
    fn test_iteration_order_is_canonical() {
        let maze = Maze::walled(5, 5).unwrap();
        let moves = legal_moves(&maze, Coord::new(2, 2));
        assert_eq!(moves.directions(), Direction::ALL.to_vec());
    }
}
