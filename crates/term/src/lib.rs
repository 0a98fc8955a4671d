//! Terminal front-end for matches.
//!
//! A small game-oriented rendering layer: a [`MatchView`] paints a
//! [`MatchFrame`](tetris_duel_engine::MatchFrame) into a [`FrameBuffer`], and
//! the [`TerminalRenderer`] flushes only the cells that changed. No widget
//! toolkit is involved.

pub mod fb;
pub mod match_view;
pub mod renderer;

pub use tetris_duel_core as core;
pub use tetris_duel_engine as engine;
pub use tetris_duel_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use match_view::{piece_color, seat_banner, MatchView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
