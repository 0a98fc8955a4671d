//! Engine layer: move search, automated play and match coordination.
//!
//! Sits on top of `tetris-duel-core`. The evaluator is a pure function of a
//! board and a piece; the [`AutoPilot`] turns its answer into one command
//! per autoplay tick; [`Match`] composes one or two sessions under a single
//! virtual clock.

pub mod autoplay;
pub mod coordinator;
pub mod evaluator;

pub use autoplay::{AutoPilot, Step};
pub use coordinator::{Match, MatchConfig, MatchFrame, MatchOutcome};
pub use evaluator::{best_placement, candidates, score_placement, Placement};
