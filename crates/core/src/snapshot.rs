use serde::{Deserialize, Serialize};

use crate::pieces::{Piece, Position, Shape};
use crate::types::{Cell, PieceKind, PlayerSlot, SessionPhase, BOARD_HEIGHT, BOARD_WIDTH};

pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub position: Position,
}

impl ActiveSnapshot {
    pub fn new(piece: Piece, position: Position) -> Self {
        Self {
            kind: piece.kind,
            shape: piece.shape,
            position,
        }
    }

    /// Board coordinates of the occupied cells that are inside the grid.
    pub fn visible_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(lx, ly)| (self.position.x + lx, self.position.y + ly))
            .filter(|&(x, y)| {
                x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8
            })
    }
}

/// Everything a render sink needs to draw one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub slot: PlayerSlot,
    pub grid: Grid,
    pub active: ActiveSnapshot,
    /// Row the active piece would land on if hard-dropped now.
    pub ghost_y: i8,
    pub next: Piece,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub phase: SessionPhase,
    pub paused: bool,
    pub terminal: bool,
    pub automated: bool,
    pub piece_id: u32,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Number of locked cells on the grid.
    pub fn filled_cells(&self) -> usize {
        self.grid.iter().flatten().filter(|c| c.is_some()).count()
    }
}
