//! RNG module - piece selection
//!
//! Every spawn asks a [`PieceSource`] for the next kind. The game uses
//! [`RandomPieces`], which picks one of the seven kinds uniformly with a
//! seedable ChaCha8 generator, so the same seed always yields the same game.
//! [`SequencePieces`] replays a fixed list and exists for scripted scenarios.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::PieceKind;

/// Supplies the kind of every spawned piece.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Uniform random piece selection over the seven kinds.
#[derive(Debug, Clone)]
pub struct RandomPieces<R = ChaCha8Rng> {
    rng: R,
    seed: u64,
}

impl RandomPieces<ChaCha8Rng> {
    /// Create a reproducible source from a seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this source was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<R: Rng> PieceSource for RandomPieces<R> {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())]
    }
}

impl Default for RandomPieces<ChaCha8Rng> {
    fn default() -> Self {
        Self::seeded(1)
    }
}

/// Replays a fixed list of kinds, wrapping around at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePieces {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequencePieces {
    /// An empty list falls back to a single I piece.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, index: 0 }
    }

    /// Number of kinds handed out so far
    pub fn drawn(&self) -> usize {
        self.index
    }
}

impl PieceSource for SequencePieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}
