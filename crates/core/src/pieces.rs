//! Pieces module - tetromino catalog and matrix rotation
//!
//! Every piece is a square occupancy matrix (2x2, 3x3 or 4x4) in its own local
//! frame. Rotation is a plain 90° clockwise transform of that matrix; there
//! are no wall kicks, so a rotated piece that collides is simply rejected by
//! the caller.

use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest matrix side used by any piece (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of a piece in its local frame.
///
/// Only the top-left `size x size` block is meaningful; the remainder is
/// always `false`, so derived equality compares shapes exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Panics if the rows are not square or larger than 4x4; catalog shapes
    /// are constants, so this only fires on a programming error.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let size = rows.len();
        assert!(size <= MAX_SHAPE_SIZE, "shape larger than 4x4");
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "shape must be square");
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Side length of the matrix.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Occupied local cells as `(lx, ly)`, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| self.cells[y][x].then_some((x as i8, y as i8)))
        })
    }

    /// The shape rotated 90° clockwise: `new[y][x] = old[n - 1 - x][y]`.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - x][y];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Rows as 0/1 vectors, for display and debugging.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        let n = self.size as usize;
        (0..n)
            .map(|y| (0..n).map(|x| self.cells[y][x] as u8).collect())
            .collect()
    }
}

/// Canonical rotation-0 matrix for a piece kind.
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]]),
        PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
        PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
    }
}

/// A piece value: identity (colour tag) plus its current matrix.
///
/// Rotation produces a new `Piece`; the original is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl Piece {
    /// Fresh piece of `kind` in its canonical orientation.
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
        }
    }

    /// Colour tag written into the board when this piece locks.
    pub fn color(&self) -> PieceKind {
        self.kind
    }

    /// Clockwise rotation; colour unchanged.
    pub fn rotate_cw(&self) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.rotated_cw(),
        }
    }

    /// Where this piece enters the board: horizontally centred, top row.
    pub fn spawn_position(&self) -> Position {
        let x = BOARD_WIDTH as i8 / 2 - self.shape.size() as i8 / 2;
        Position::new(x, 0)
    }
}

/// Offset of a piece's local-frame origin on the board.
///
/// `y` may be negative while the piece is partly above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}
