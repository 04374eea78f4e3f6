//! Coordinates, directions, cells and the maze grid.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{ConstructionError, ParseDirectionError};

/// A coordinate on the maze.
///
/// Signed so that neighbour arithmetic may step off the grid; bounds are the
/// maze's concern, not the coordinate's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row), growing southwards.
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate one step in `direction`. No bounds check.
    #[must_use]
    #[inline]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether `other` differs by exactly one in exactly one axis.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        (dx == 1 && dy == 0) || (dx == 0 && dy == 1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// One of the five moves a bot may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards decreasing y.
    North,
    /// Towards increasing y.
    South,
    /// Towards increasing x.
    East,
    /// Towards decreasing x.
    West,
    /// Stay in place.
    Stop,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Direction; 5] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Stop,
    ];

    /// The `(dx, dy)` offset of this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    /// Look up the direction for an offset vector.
    ///
    /// # Errors
    ///
    /// Returns [`ParseDirectionError`] for any vector that is not one of the
    /// five direction offsets.
    pub fn from_offset(offset: (i32, i32)) -> Result<Self, ParseDirectionError> {
        Self::ALL
            .into_iter()
            .find(|d| d.offset() == offset)
            .ok_or_else(|| ParseDirectionError {
                input: format!("({}, {})", offset.0, offset.1),
            })
    }

    /// Lowercase name of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        }
    }

    /// Position of this direction in [`Direction::ALL`].
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
            Direction::Stop => 4,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            "stop" | "x" => Ok(Direction::Stop),
            _ => Err(ParseDirectionError {
                input: s.to_string(),
            }),
        }
    }
}

bitflags! {
    /// Contents of a single maze cell.
    ///
    /// A set rather than a single kind: an item always sits on an open cell.
    /// The only valid combinations are `WALL`, `OPEN` and `OPEN | ITEM`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Cell: u8 {
        /// Impassable.
        const WALL = 0b001;
        /// Traversable.
        const OPEN = 0b010;
        /// Holds an item that a harvester can collect.
        const ITEM = 0b100;
    }
}

impl Cell {
    /// An open cell holding an item.
    pub const OPEN_ITEM: Cell = Cell::OPEN.union(Cell::ITEM);

    /// Check that the flags form one of the valid combinations.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self == Cell::WALL || self == Cell::OPEN || self == Cell::OPEN_ITEM
    }

    /// Check if a bot can stand on this cell.
    #[must_use]
    pub const fn is_open(self) -> bool {
        self.contains(Cell::OPEN)
    }

    /// Check if this cell holds an item.
    #[must_use]
    pub const fn has_item(self) -> bool {
        self.contains(Cell::ITEM)
    }
}

/// The maze: a fixed rectangle of cells.
///
/// The shape never changes after construction; the only mutation is item
/// removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Maze {
    /// Width in cells.
    width: u16,
    /// Height in cells.
    height: u16,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Maze {
    /// Create a maze from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero, if the number of cells does
    /// not match the dimensions, or if any cell is not a valid combination.
    pub fn new(width: u16, height: u16, cells: Vec<Cell>) -> Result<Self, ConstructionError> {
        if width == 0 || height == 0 {
            return Err(ConstructionError::EmptyMaze { width, height });
        }
        let expected = usize::from(width) * usize::from(height);
        if cells.len() != expected {
            return Err(ConstructionError::CellCount {
                width,
                height,
                expected,
                found: cells.len(),
            });
        }

        let maze = Self {
            width,
            height,
            cells,
        };
        if let Some((coord, cell)) = maze.iter().find(|(_, cell)| !cell.is_valid()) {
            return Err(ConstructionError::InvalidCell {
                coord,
                bits: cell.bits(),
            });
        }
        Ok(maze)
    }

    /// Create a maze of open cells surrounded by a one-cell wall.
    #[cfg(test)]
    pub(crate) fn walled(width: u16, height: u16) -> Result<Self, ConstructionError> {
        let size = usize::from(width) * usize::from(height);
        let mut cells = vec![Cell::OPEN; size];
        for (idx, cell) in cells.iter_mut().enumerate() {
            let x = idx % usize::from(width.max(1));
            let y = idx / usize::from(width.max(1));
            if x == 0 || y == 0 || x + 1 == usize::from(width) || y + 1 == usize::from(height) {
                *cell = Cell::WALL;
            }
        }
        Self::new(width, height, cells)
    }

    /// Get the width of the maze.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the maze.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the raw cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Check if a coordinate is within the maze bounds.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < i32::from(self.width)
            && coord.y < i32::from(self.height)
    }

    /// Convert a coordinate to an index into the cell array.
    #[must_use]
    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            let x = usize::try_from(coord.x).ok()?;
            let y = usize::try_from(coord.y).ok()?;
            Some(y * usize::from(self.width) + x)
        } else {
            None
        }
    }

    /// Get the contents of the cell at `coord`, or `None` off the maze.
    #[must_use]
    pub fn cell_at(&self, coord: Coord) -> Option<Cell> {
        self.coord_to_index(coord).map(|idx| self.cells[idx])
    }

    /// Check if `coord` is in bounds and traversable.
    #[must_use]
    pub fn is_open(&self, coord: Coord) -> bool {
        self.cell_at(coord).is_some_and(Cell::is_open)
    }

    /// Check if `coord` holds an item.
    #[must_use]
    pub fn has_item(&self, coord: Coord) -> bool {
        self.cell_at(coord).is_some_and(Cell::has_item)
    }

    /// Remove the item at `coord`.
    ///
    /// Idempotent: returns `false` and changes nothing if there was no item.
    /// Walls and open flags are never touched.
    pub fn remove_item(&mut self, coord: Coord) -> bool {
        let Some(idx) = self.coord_to_index(coord) else {
            return false;
        };
        let cell = &mut self.cells[idx];
        let had_item = cell.has_item();
        cell.remove(Cell::ITEM);
        had_item
    }

    /// Iterate over all coordinates and cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let width = usize::from(self.width);
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let coord = Coord::new((idx % width) as i32, (idx / width) as i32);
            (coord, *cell)
        })
    }

    /// Positions of all items in row-major order.
    pub fn item_positions(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.has_item())
            .map(|(coord, _)| coord)
    }

    /// Count the items left on the maze.
    #[must_use]
    pub fn count_items(&self) -> usize {
        self.cells.iter().filter(|cell| cell.has_item()).count()
    }
}
