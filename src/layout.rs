//! Textual layouts: a character grid describing a maze and bot spawns.
//!
//! ```text
//! ########
//! #0 .  1#
//! #  ## .#
//! #2.  3 #
//! ########
//! ```
//!
//! `#` is a wall, a space is open floor, `.` is an item and a base-36 digit
//! (`0`-`9`, then `a`-`z`) is the spawn of the bot with that index, standing
//! on open floor. Rows are separated by `\n` or `\r\n`; leading and trailing
//! blank lines are ignored. Rendering a universe draws bots at their current
//! position over whatever their cell holds, so only [`render_maze`] is a
//! lossless rendering of the cells.

use std::collections::BTreeMap;

use crate::error::LayoutError;
use crate::game::{BotId, Cell, Coord, Maze, Universe};

/// Character for a wall.
pub const WALL_CHAR: char = '#';
/// Character for open floor.
pub const OPEN_CHAR: char = ' ';
/// Character for an item.
pub const ITEM_CHAR: char = '.';

/// Radix used for bot markers.
const BOT_RADIX: u32 = 36;

/// A parsed layout: the maze plus one spawn per bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// The maze with bot markers replaced by open floor.
    pub maze: Maze,
    /// Spawn of each bot, indexed by bot id.
    pub spawns: Vec<Coord>,
}

impl Layout {
    /// Parse a layout from text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty, rows differ in width, a
    /// character is outside the alphabet, a bot marker is repeated, the bot
    /// markers skip an index, or the maze fails validation.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text
            .trim_matches(['\r', '\n'])
            .lines()
            .map(|row| row.strip_suffix('\r').unwrap_or(row))
            .collect();
        let Some(first) = rows.first() else {
            return Err(LayoutError::Empty);
        };
        let width = first.chars().count();
        if width == 0 {
            return Err(LayoutError::Empty);
        }
        let height = rows.len();
        let (Ok(width16), Ok(height16)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(LayoutError::TooLarge { width, height });
        };

        let mut cells = Vec::with_capacity(width * height);
        let mut bots: BTreeMap<BotId, Coord> = BTreeMap::new();

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                // Both indices are bounded by the u16 checks above.
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let coord = Coord::new(x as i32, y as i32);
                cells.push(parse_cell(ch, coord, &mut bots)?);
            }
        }

        let spawns: Vec<Coord> = bots.values().copied().collect();
        if let Some(missing) = bots.keys().enumerate().find(|(idx, bot)| idx != *bot) {
            return Err(LayoutError::MissingBot(missing.0));
        }

        let maze = Maze::new(width16, height16, cells)?;
        Ok(Self { maze, spawns })
    }

    /// Number of bots in the layout.
    #[must_use]
    pub fn bot_count(&self) -> usize {
        self.spawns.len()
    }
}

/// Decode one character, recording bot markers.
fn parse_cell(
    ch: char,
    coord: Coord,
    bots: &mut BTreeMap<BotId, Coord>,
) -> Result<Cell, LayoutError> {
    match ch {
        WALL_CHAR => Ok(Cell::WALL),
        OPEN_CHAR => Ok(Cell::OPEN),
        ITEM_CHAR => Ok(Cell::OPEN_ITEM),
        _ => {
            let Some(bot) = ch.to_digit(BOT_RADIX).filter(|_| !ch.is_ascii_uppercase()) else {
                return Err(LayoutError::UnknownChar { ch, coord });
            };
            let bot = bot as BotId;
            if let Some(&first) = bots.get(&bot) {
                return Err(LayoutError::DuplicateBot {
                    bot,
                    first,
                    second: coord,
                });
            }
            bots.insert(bot, coord);
            Ok(Cell::OPEN)
        }
    }
}

/// The character drawn for a cell.
#[must_use]
pub fn cell_char(cell: Cell) -> char {
    if cell.contains(Cell::WALL) {
        WALL_CHAR
    } else if cell.has_item() {
        ITEM_CHAR
    } else {
        OPEN_CHAR
    }
}

/// The marker drawn for a bot, if its index fits a single character.
#[must_use]
pub fn bot_char(bot: BotId) -> Option<char> {
    u32::try_from(bot)
        .ok()
        .and_then(|bot| char::from_digit(bot, BOT_RADIX))
}

/// Render the maze alone, one row per line, without a trailing newline.
#[must_use]
pub fn render_maze(maze: &Maze) -> String {
    render_grid(maze, |_| None)
}

/// Render the maze with bots drawn at their current positions.
///
/// Where several bots share a cell the lowest index is drawn, and an item
/// under a bot is hidden. Bots whose index has no single-character marker
/// are not drawn.
#[must_use]
pub fn render_universe(universe: &Universe) -> String {
    render_grid(universe.maze(), |coord| {
        universe
            .bots()
            .iter()
            .find(|bot| bot.current() == coord)
            .and_then(|bot| bot_char(bot.id))
    })
}

fn render_grid(maze: &Maze, overlay: impl Fn(Coord) -> Option<char>) -> String {
    let width = usize::from(maze.width());
    let mut output = String::with_capacity((width + 1) * usize::from(maze.height()));
    for (coord, cell) in maze.iter() {
        if coord.x == 0 && coord.y > 0 {
            output.push('\n');
        }
        output.push(overlay(coord).unwrap_or_else(|| cell_char(cell)));
    }
    output
}
