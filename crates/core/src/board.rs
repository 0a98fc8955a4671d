//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a colour tag.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! [`Board::collides`] is the single legality predicate used for movement,
//! rotation, spawn checks and move search.

use arrayvec::ArrayVec;

use crate::pieces::{Piece, Position};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Upper bound on rows reported by a single [`Board::clear_full_rows`] call.
pub const MAX_CLEARED_ROWS: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether `piece` placed at `pos` is illegal.
    ///
    /// Occupied cells above the board (`by < 0`) never collide. Any other
    /// occupied cell collides when it lies below the floor, outside the side
    /// walls, or on a filled cell.
    pub fn collides(&self, piece: &Piece, pos: Position) -> bool {
        piece.shape.filled_cells().any(|(lx, ly)| {
            let bx = pos.x + lx;
            let by = pos.y + ly;
            if by < 0 {
                return false;
            }
            by >= BOARD_HEIGHT as i8
                || bx < 0
                || bx >= BOARD_WIDTH as i8
                || self.is_occupied(bx, by)
        })
    }

    /// Write the piece's colour into every occupied cell at `pos`.
    ///
    /// Cells above the board are dropped, which truncates the overhang of a
    /// piece locked while partly out of view.
    pub fn lock(&mut self, piece: &Piece, pos: Position) {
        for (lx, ly) in piece.shape.filled_cells() {
            let by = pos.y + ly;
            if by >= 0 {
                self.set(pos.x + lx, by, Some(piece.color()));
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Number of rows that are currently full.
    pub fn full_row_count(&self) -> usize {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .count()
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Equivalent to scanning bottom-up, removing each full row and
    /// prepending an empty one: surviving rows keep their relative order and
    /// the grid keeps exactly `BOARD_HEIGHT` rows. Uses a two-pointer
    /// compaction with zero allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, MAX_CLEARED_ROWS> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                // Not full: move it down to the write position
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Everything above the write position is new empty rows
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Height of the stack in column `x`: `BOARD_HEIGHT - topmost filled row`, 0 if empty.
    pub fn column_height(&self, x: i8) -> u8 {
        (0..BOARD_HEIGHT as i8)
            .find(|&y| self.is_occupied(x, y))
            .map(|top| BOARD_HEIGHT - top as u8)
            .unwrap_or(0)
    }

    /// Tallest column height.
    pub fn max_height(&self) -> u8 {
        (0..BOARD_WIDTH as i8)
            .map(|x| self.column_height(x))
            .max()
            .unwrap_or(0)
    }

    /// Empty cells below the topmost filled cell of their column, summed over columns.
    pub fn hole_count(&self) -> u32 {
        let mut holes = 0u32;
        for x in 0..BOARD_WIDTH as i8 {
            let mut seen_block = false;
            for y in 0..BOARD_HEIGHT as i8 {
                if self.is_occupied(x, y) {
                    seen_block = true;
                } else if seen_block {
                    holes += 1;
                }
            }
        }
        holes
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid out as rows (row 0 = top).
    pub fn to_grid(&self) -> [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize] {
        let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (y, row) in grid.iter_mut().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            row.copy_from_slice(&self.cells[start..start + BOARD_WIDTH as usize]);
        }
        grid
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// `.` is empty, a piece letter is a filled cell, `#` is filled with `I`.
    /// Intended for tests and fixtures; panics on malformed input.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= BOARD_HEIGHT as usize, "too many rows");
        let mut board = Self::new();
        let offset = BOARD_HEIGHT as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), BOARD_WIDTH as usize, "row width");
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    '#' => Some(PieceKind::I),
                    other => Some(
                        PieceKind::from_str(&other.to_string())
                            .unwrap_or_else(|| panic!("unknown cell {other:?}")),
                    ),
                };
                board.set(x as i8, (offset + i) as i8, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
