//! The 15×15 board, stone colors, and move placement.
//!
//! The board is a plain fixed-size grid of [`Cell`]s. Placement performs the
//! two purely positional checks — coordinates in range, target cell empty —
//! and nothing else; whose turn it is and whether the game is over are the
//! state machine's business (see [`crate::state`]).

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Side length of the (square) board.
pub const BOARD_SIZE: usize = 15;

/// Contents of one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Black,
    White,
}

/// A player's stone color; also identifies whose move is next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other color.
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Cell {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

/// The square grid of cells.
///
/// Every cell is [`Cell::Empty`] after construction or [`Board::reset`].
/// Once a stone is placed on a cell its value never reverts short of a
/// full reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an all-empty board.
    pub fn new() -> Self {
        Self {
            grid: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Clears every cell back to [`Cell::Empty`].
    pub fn reset(&mut self) {
        self.grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    }

    /// Returns the cell at `(row, col)`, or `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Places a stone of `color` at `(row, col)`.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidCoordinate`] if `row` or `col` is outside
    ///   `[0, BOARD_SIZE)`.
    /// - [`GameError::CellOccupied`] if the target cell is not empty.
    ///
    /// Either failure leaves the board untouched.
    pub fn place(&mut self, row: usize, col: usize, color: Color) -> Result<(), GameError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(GameError::InvalidCoordinate { row, col });
        }
        if self.grid[row][col] != Cell::Empty {
            return Err(GameError::CellOccupied { row, col });
        }
        self.grid[row][col] = color.into();
        Ok(())
    }

    /// True iff no cell is empty. O(N²).
    pub fn is_full(&self) -> bool {
        self.grid
            .iter()
            .all(|row| row.iter().all(|&c| c != Cell::Empty))
    }

    /// The board as nested vectors, row-major, for JSON snapshots.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.grid.iter().map(|row| row.to_vec()).collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
