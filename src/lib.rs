//! Tetris duel (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benchmarks share a single import path.

pub use tetris_duel_core as core;
pub use tetris_duel_engine as engine;
pub use tetris_duel_input as input;
pub use tetris_duel_term as term;
pub use tetris_duel_types as types;
