//! Item generation: sparse random binary ensembles.
//!
//! Every item is a binary vector over N neurons where each neuron is active
//! with small probability f. Two sampling policies are provided:
//!
//! - [`BernoulliGenerator`]: every (neuron, item) cell is an independent
//!   Bernoulli(f) draw.
//! - [`SparseFillGenerator`]: exactly `round(f * N * L)` distinct cells are
//!   picked uniformly, filled with a continuous uniform value and then
//!   thresholded (nonzero becomes 1).
//!
//! Both produce statistically equivalent matrices and are interchangeable
//! for everything downstream.

use ndarray::{Array2, ArrayView2};
use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::RecallParams;
use crate::error::{RecallError, RecallResult};

const WORD_BITS: usize = 64;

/// N x L binary matrix of neuronal ensembles.
///
/// Stored column-major: each item owns `ceil(N / 64)` packed words, so the
/// overlap of two items is a popcount over their AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMatrix {
    neurons: usize,
    items: usize,
    words_per_item: usize,
    bits: Vec<u64>,
}

impl ItemMatrix {
    /// Create an all-zero matrix.
    pub fn zeros(neurons: usize, items: usize) -> Self {
        let words_per_item = neurons.div_ceil(WORD_BITS);
        Self {
            neurons,
            items,
            words_per_item,
            bits: vec![0; words_per_item * items],
        }
    }

    /// Build from a dense N x L matrix. Any nonzero cell becomes active.
    pub fn from_dense(dense: ArrayView2<'_, u8>) -> Self {
        let (neurons, items) = dense.dim();
        let mut matrix = Self::zeros(neurons, items);
        for ((feature, item), &value) in dense.indexed_iter() {
            if value != 0 {
                matrix.set(feature, item);
            }
        }
        matrix
    }

    /// Number of neurons (N).
    pub fn neurons(&self) -> usize {
        self.neurons
    }

    /// Number of items (L).
    pub fn items(&self) -> usize {
        self.items
    }

    fn column(&self, item: usize) -> &[u64] {
        let start = item * self.words_per_item;
        &self.bits[start..start + self.words_per_item]
    }

    /// Whether `feature` is active in `item`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, feature: usize, item: usize) -> bool {
        assert!(feature < self.neurons && item < self.items, "index out of bounds");
        let word = self.column(item)[feature / WORD_BITS];
        (word >> (feature % WORD_BITS)) & 1 == 1
    }

    /// Activate `feature` in `item`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn set(&mut self, feature: usize, item: usize) {
        assert!(feature < self.neurons && item < self.items, "index out of bounds");
        let idx = item * self.words_per_item + feature / WORD_BITS;
        self.bits[idx] |= 1u64 << (feature % WORD_BITS);
    }

    /// Number of active neurons in `item`.
    pub fn active_count(&self, item: usize) -> u32 {
        self.column(item).iter().map(|w| w.count_ones()).sum()
    }

    /// Total number of active cells.
    pub fn total_active(&self) -> u64 {
        self.bits.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    /// Overlap between two items: the number of neurons active in both.
    pub fn overlap(&self, a: usize, b: usize) -> u32 {
        self.column(a)
            .iter()
            .zip(self.column(b))
            .map(|(x, y)| (x & y).count_ones())
            .sum()
    }

    /// Dense N x L copy with 0/1 entries.
    pub fn to_dense(&self) -> Array2<u8> {
        Array2::from_shape_fn((self.neurons, self.items), |(feature, item)| {
            u8::from(self.get(feature, item))
        })
    }
}

/// A source of item matrices.
pub trait ItemGenerator {
    /// Sample an N x L item matrix for `params`.
    ///
    /// Parameters are validated before anything is drawn from `rng`.
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R, params: &RecallParams) -> RecallResult<ItemMatrix>;
}

/// Independent Bernoulli(f) draw per cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct BernoulliGenerator;

impl ItemGenerator for BernoulliGenerator {
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R, params: &RecallParams) -> RecallResult<ItemMatrix> {
        params.validate()?;
        let dist = Bernoulli::new(params.activation)
            .map_err(|e| RecallError::invalid_activation(e.to_string()))?;

        let mut matrix = ItemMatrix::zeros(params.neurons, params.items);
        for feature in 0..params.neurons {
            for item in 0..params.items {
                if dist.sample(rng) {
                    matrix.set(feature, item);
                }
            }
        }
        Ok(matrix)
    }
}

/// Sparse random fill at density f, thresholded to binary.
///
/// Cells are addressed in column-major order (`index = item * N + feature`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseFillGenerator;

impl SparseFillGenerator {
    /// Number of cells filled for the given shape and density.
    ///
    /// Exact halves round to even.
    pub fn fill_count(neurons: usize, items: usize, density: f64) -> usize {
        (density * (neurons * items) as f64).round_ties_even() as usize
    }
}

impl ItemGenerator for SparseFillGenerator {
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R, params: &RecallParams) -> RecallResult<ItemMatrix> {
        params.validate()?;
        let cells = params.neurons * params.items;
        let count = Self::fill_count(params.neurons, params.items, params.activation).min(cells);

        let mut matrix = ItemMatrix::zeros(params.neurons, params.items);
        for index in rand::seq::index::sample(rng, cells, count) {
            let value: f64 = rng.gen();
            if value != 0.0 {
                matrix.set(index % params.neurons, index / params.neurons);
            }
        }
        Ok(matrix)
    }
}

/// Selectable generation policy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GeneratorKind {
    /// See [`BernoulliGenerator`].
    #[default]
    Bernoulli,
    /// See [`SparseFillGenerator`].
    SparseFill,
}

impl ItemGenerator for GeneratorKind {
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R, params: &RecallParams) -> RecallResult<ItemMatrix> {
        match self {
            GeneratorKind::Bernoulli => BernoulliGenerator.generate(rng, params),
            GeneratorKind::SparseFill => SparseFillGenerator.generate(rng, params),
        }
    }
}
