//! Permutation for spreading payload bits over carrier units.
//!
//! The canonical generator is a Fisher-Yates shuffle running from the last index down,
//! drawing `j` uniformly from `0..=i` with a `fastrand::Rng` seeded by the password seed.
//! Embedding and extraction both rebuild it from `(seed, length)`, so the placement is never stored.

use fastrand::Rng;

use crate::seed::Seed;

/// Pseudo-random permutation of `0..length`.
///
/// The permutation is deterministic given the same seed, allowing the extraction to
/// reconstruct the same ordering used during embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    /// indices[i] = the slot the i-th payload bit is placed into
    indices: Vec<usize>,
}

impl Permutation {
    /// Create a permutation of `0..length` from a seed.
    pub fn from_seed(seed: Seed, length: usize) -> Self {
        let mut rng = Rng::with_seed(seed);
        let mut indices: Vec<usize> = (0..length).collect();

        for i in (1..length).rev() {
            let j = rng.usize(0..=i);
            indices.swap(i, j);
        }

        Permutation { indices }
    }

    /// Create an identity permutation (no shuffling).
    pub fn identity(length: usize) -> Self {
        Permutation {
            indices: (0..length).collect(),
        }
    }

    /// Get the shuffled index for an original index.
    #[inline]
    pub fn shuffled(&self, original: usize) -> usize {
        self.indices[original]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}

/// How a carrier kind orders payload bits over its valid units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// password seeded permutation over all valid units
    Scrambled,
    /// bit `i` goes to valid unit `i`
    Sequential,
}

/// The placement oracle shared by embedding and extraction.
///
/// Maps the i-th bit of the bitstream to an index into the carrier's valid units.
#[derive(Debug, Clone)]
pub enum Placement {
    Sequential(usize),
    Scrambled(Permutation),
}

impl Placement {
    pub fn derive(mode: PlacementMode, seed: Seed, length: usize) -> Self {
        match mode {
            PlacementMode::Sequential => Placement::Sequential(length),
            PlacementMode::Scrambled => Placement::Scrambled(Permutation::from_seed(seed, length)),
        }
    }

    #[inline]
    pub fn position(&self, bit_index: usize) -> usize {
        match self {
            Placement::Sequential(_) => bit_index,
            Placement::Scrambled(permutation) => permutation.shuffled(bit_index),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Placement::Sequential(length) => *length,
            Placement::Scrambled(permutation) => permutation.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
