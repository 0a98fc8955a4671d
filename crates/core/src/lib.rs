//! Core game logic - pure, deterministic, and testable
//!
//! Everything one player's game needs: the grid, the piece catalog, the piece
//! queue, the scoring rules and the session state machine. Nothing here reads
//! the wall clock or touches a terminal; time arrives through the
//! [`Scheduler`] a caller passes in.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with the collision predicate and row clearing
//! - [`pieces`]: the seven tetromino matrices and clockwise rotation
//! - [`rng`]: seeded uniform piece generation
//! - [`scoring`]: line-clear points and level progression
//! - [`scheduler`]: named recurring tasks and the virtual clock
//! - [`session`]: one player's game and its lifecycle
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use tetris_duel_core::{GameSession, PieceQueue, VirtualClock};
//! use tetris_duel_core::types::{Command, PlayerSlot};
//!
//! let mut clock = VirtualClock::new();
//! let mut session = GameSession::new(PlayerSlot::One, PieceQueue::random(12345));
//! session.start(&mut clock);
//!
//! session.apply_command(Command::MoveRight, &mut clock);
//! session.apply_command(Command::HardDrop, &mut clock);
//!
//! assert_eq!(session.piece_id(), 2);
//! ```

pub mod board;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tetris_duel_types as types;

pub use board::Board;
pub use pieces::{get_shape, Piece, Position, Shape};
pub use rng::PieceQueue;
pub use scheduler::{Scheduler, Task, TaskHandle, TaskKind, VirtualClock};
pub use scoring::{apply_line_clear, line_clear_score, Progress};
pub use session::{GameSession, LockEvent};
pub use snapshot::{ActiveSnapshot, Grid, SessionSnapshot};
