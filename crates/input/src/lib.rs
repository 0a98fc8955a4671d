//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into per-scheme gameplay commands and
//! match controls. Which seat a scheme drives is decided by the match
//! coordinator, not here.

pub mod map;

pub use tetris_duel_types as types;

pub use map::{map_control_key, map_key, map_play_key, should_quit, InputEvent};
