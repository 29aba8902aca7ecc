//! RNG module - where new pieces come from
//!
//! The engine draws every spawned piece from a [`ShapeSource`]. Gameplay uses
//! [`RandomShapes`], a uniform pick over the seven kinds; tests inject
//! [`ScriptedShapes`] to get a fixed, repeatable sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Supplier of piece kinds for spawning
pub trait ShapeSource {
    /// Next kind to spawn
    fn next_kind(&mut self) -> PieceKind;
}

impl<S: ShapeSource + ?Sized> ShapeSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Uniformly random kinds, one of seven with equal probability
#[derive(Debug, Clone)]
pub struct RandomShapes {
    rng: StdRng,
}

impl RandomShapes {
    /// Deterministic sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl ShapeSource for RandomShapes {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}

impl Default for RandomShapes {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Fixed sequence of kinds, repeated forever
#[derive(Debug, Clone)]
pub struct ScriptedShapes {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl ScriptedShapes {
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "scripted shape sequence must not be empty");
        Self { kinds, index: 0 }
    }

    /// The same kind every time
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }

    /// Number of kinds handed out so far
    pub fn drawn(&self) -> usize {
        self.index
    }
}

impl ShapeSource for ScriptedShapes {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}
