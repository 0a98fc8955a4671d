//! RNG module - piece generation
//!
//! Pieces are drawn uniformly at random among the seven kinds (no bag), from a
//! seeded `StdRng` so a given seed always yields the same game.
//!
//! A fixed cycling sequence is also available for scripted scenarios.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pieces::Piece;
use crate::types::PieceKind;

/// Source of fresh pieces for a session.
#[derive(Debug, Clone)]
pub enum PieceQueue {
    /// Uniform random kinds.
    Random { seed: u64, rng: StdRng },
    /// Cycles through a fixed list of kinds.
    Sequence { kinds: Vec<PieceKind>, index: usize },
}

impl PieceQueue {
    /// Uniform random generator with the given seed.
    pub fn random(seed: u64) -> Self {
        PieceQueue::Random {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator that repeats `kinds` forever.
    ///
    /// An empty list falls back to a single `O`.
    pub fn sequence(kinds: &[PieceKind]) -> Self {
        let kinds = if kinds.is_empty() {
            vec![PieceKind::O]
        } else {
            kinds.to_vec()
        };
        PieceQueue::Sequence { kinds, index: 0 }
    }

    /// Produce a fresh copy of the next piece's canonical shape and colour.
    pub fn next_piece(&mut self) -> Piece {
        let kind = match self {
            PieceQueue::Random { rng, .. } => PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())],
            PieceQueue::Sequence { kinds, index } => {
                let kind = kinds[*index % kinds.len()];
                *index = (*index + 1) % kinds.len();
                kind
            }
        };
        Piece::new(kind)
    }

    /// Restart the stream from its beginning (same seed / first kind).
    pub fn rewind(&mut self) {
        match self {
            PieceQueue::Random { seed, rng } => *rng = StdRng::seed_from_u64(*seed),
            PieceQueue::Sequence { index, .. } => *index = 0,
        }
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::random(1)
    }
}
