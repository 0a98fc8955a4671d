//! Single-piece placement search.
//!
//! Enumerates every resting placement of the current piece (four rotation
//! states times a horizontal overscan) and scores each one with a static
//! heuristic on a scratch copy of the board. The next piece is not
//! considered.

use arrayvec::ArrayVec;

use tetris_duel_core::types::BOARD_WIDTH;
use tetris_duel_core::{Board, Piece, Position};

/// Leftmost origin column tried.
///
/// The widest left margin of any catalog shape is two empty columns (the
/// vertical I), so no legal placement starts further left.
pub const SEARCH_MIN_X: i8 = -2;

/// Rightmost origin column tried.
pub const SEARCH_MAX_X: i8 = BOARD_WIDTH as i8 + 1;

const SEARCH_WIDTH: usize = (SEARCH_MAX_X - SEARCH_MIN_X + 1) as usize;

/// Upper bound on candidates produced by [`candidates`].
pub const MAX_CANDIDATES: usize = 4 * SEARCH_WIDTH;

const FULL_ROW_WEIGHT: f64 = 1000.0;
const HEIGHT_WEIGHT: f64 = 10.0;
const HOLE_WEIGHT: f64 = 50.0;
const CENTER_WEIGHT: f64 = 2.0;

/// One resting placement and its heuristic value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Origin column of the piece's local frame.
    pub x: i8,
    /// Clockwise rotations applied to the piece as given.
    pub rotations: u8,
    pub landing_y: i8,
    pub score: f64,
}

/// Heuristic value of locking `piece` at `pos`.
///
/// `1000*full_rows - 10*max_height - 50*holes - 2*|piece_center - board_center|`,
/// measured on a copy with the piece committed and no rows cleared.
pub fn score_placement(board: &Board, piece: &Piece, pos: Position) -> f64 {
    let mut scratch = board.clone();
    scratch.lock(piece, pos);

    let full_rows = scratch.full_row_count() as f64;
    let max_height = scratch.max_height() as f64;
    let holes = scratch.hole_count() as f64;
    let piece_center = pos.x as f64 + piece.shape.size() as f64 / 2.0;
    let board_center = BOARD_WIDTH as f64 / 2.0;

    FULL_ROW_WEIGHT * full_rows
        - HEIGHT_WEIGHT * max_height
        - HOLE_WEIGHT * holes
        - CENTER_WEIGHT * (piece_center - board_center).abs()
}

/// Row where `piece` comes to rest when dropped from `pos`, or `None` if
/// `pos` itself is illegal.
pub fn landing_row(board: &Board, piece: &Piece, pos: Position) -> Option<i8> {
    if board.collides(piece, pos) {
        return None;
    }
    let mut y = pos.y;
    while !board.collides(piece, Position::new(pos.x, y + 1)) {
        y += 1;
    }
    Some(y)
}

/// Every legal resting placement, rotation-major then left to right.
///
/// Each candidate must be legal at `start_y` in its rotation before it is
/// dropped, matching what the session can actually reach by rotating and
/// shifting in place.
pub fn candidates(board: &Board, piece: &Piece, start_y: i8) -> ArrayVec<Placement, MAX_CANDIDATES> {
    let mut out = ArrayVec::new();
    let mut rotated = *piece;
    for rotations in 0..4u8 {
        for x in SEARCH_MIN_X..=SEARCH_MAX_X {
            let Some(landing_y) = landing_row(board, &rotated, Position::new(x, start_y)) else {
                continue;
            };
            let score = score_placement(board, &rotated, Position::new(x, landing_y));
            out.push(Placement {
                x,
                rotations,
                landing_y,
                score,
            });
        }
        rotated = rotated.rotate_cw();
    }
    out
}

/// Highest-scoring placement; ties keep the first in search order.
///
/// `None` when the piece has no legal placement at `start_y` at all.
pub fn best_placement(board: &Board, piece: &Piece, start_y: i8) -> Option<Placement> {
    let mut best: Option<Placement> = None;
    for candidate in candidates(board, piece, start_y) {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}
