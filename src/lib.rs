//! # twopoint
//!
//! Discrete-distribution sampling built on the classical *sequential
//! two-point decomposition* (alias method): an m-outcome probability vector
//! is broken, once, into exactly m−1 equal-probability buckets of two
//! outcomes each. After that setup every draw costs two uniforms and one
//! comparison.
//!
//! There are three ways in:
//!
//! 1. **Raw probability vectors** with [`AliasTable::decompose`]
//! 2. **Ad-hoc pairs** with [`OutcomeTable::from_pairs`]
//! 3. **Compile-time enums** with the [`OutcomeEnum`] derive macro (from the
//!    companion `twopoint_macros` crate)
//!
//! ## Quick start (vectors)
//!
//! ```rust,ignore
//! use twopoint::{AliasTable, pmf};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mass = pmf::binomial(20, 0.4)?;
//! let table = AliasTable::decompose(&mass)?;
//!
//! let mut rng = rand::rng();
//! let k = table.sample_index(&mut rng); // outcome in 0..=20
//! println!("drew {k} successes");
//! # Ok(()) }
//! ```
//!
//! ## Quick start (pairs)
//!
//! ```rust,ignore
//! use twopoint::OutcomeTable;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = OutcomeTable::from_pairs([
//!     ("sunny", 0.6),
//!     ("overcast", 0.3),
//!     ("rain", 0.1),
//! ])?;
//!
//! let mut rng = rand::rng();
//! println!("tomorrow: {}", table.sample(&mut rng));
//! # Ok(()) }
//! ```
//!
//! ## Performance
//! * **Build**: O(m²) — each of the m−1 steps scans the residual vector for
//!   its extrema. Fine for the table sizes this crate targets; build once,
//!   sample forever.
//! * **Sample**: O(1) per draw (2 uniforms, 1 branch).
//! * **Space**: m−1 buckets of `(usize, usize, f64)`.
//!
//! ## Gotchas
//! * Inputs are **probability vectors**: non-negative, finite, summing to 1.
//!   [`OutcomeTable::from_pairs`] normalizes arbitrary non-negative weights
//!   for you; [`AliasTable::decompose`] does not.
//! * Vectors whose support is too sparse for m−1 two-point buckets (point
//!   masses, heavily zero-padded vectors) are rejected with
//!   [`DistError::SparseSupport`]. [`CdfSampler`] handles those.
//! * Tables are for *fixed* distributions; rebuild after changing the
//!   probabilities.
//!
//! ## Testing & validation
//! Every finished table is checked against its input: averaging the m−1
//! bucket distributions must reproduce the original vector to 1e-9. The
//! test suite adds seeded empirical-histogram and chi-square checks.

mod cdf;
mod decompose;
mod error;
pub mod pmf;

pub use cdf::CdfSampler;
pub use decompose::{AliasTable, Bucket};
pub use error::DistError;

use rand::Rng;

/// A minimal interface for samplers that produce outcome indices.
/// Implemented by [`AliasTable`] (two-point buckets) and [`CdfSampler`]
/// (inverse transform).
pub trait DiscreteSampler {
    /// Number of outcomes the sampler can produce.
    fn outcomes(&self) -> usize;
    /// Draw one outcome index.
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize;
    /// Draw `draws` outcomes and tally them per index.
    fn sample_counts<R: Rng + ?Sized>(&self, rng: &mut R, draws: usize) -> Vec<usize> {
        let mut counts = vec![0usize; self.outcomes()];
        for _ in 0..draws {
            counts[self.sample_index(rng)] += 1;
        }
        counts
    }
}

impl DiscreteSampler for AliasTable {
    #[inline]
    fn outcomes(&self) -> usize {
        // inherent method, called explicitly to avoid trait recursion
        AliasTable::outcomes(self)
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        AliasTable::sample_index(self, rng)
    }
}

impl DiscreteSampler for CdfSampler {
    #[inline]
    fn outcomes(&self) -> usize {
        CdfSampler::outcomes(self)
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        CdfSampler::sample_index(self, rng)
    }
}

/// Derive macro imported from `twopoint_macros`; see the crate-level docs
/// for usage.
pub use twopoint_macros::OutcomeEnum;

/// Trait implemented by the `OutcomeEnum` derive macro.
///
/// Each variant and its probability mass is exposed via
/// [`OutcomeEnum::MASSES`], which enables building a ready-to-sample
/// [`OutcomeTable`].
pub trait OutcomeEnum: Sized + 'static {
    /// All `(variant, mass)` pairs in declaration order.
    const MASSES: &'static [(Self, f64)];

    /// Build an [`OutcomeTable`] over the annotated variants.
    ///
    /// # Errors
    /// See [`OutcomeTable::from_pairs`] and [`DistError`]: negative masses,
    /// a zero or non-finite total, fewer than two variants, or a support too
    /// sparse to decompose will error.
    fn table() -> Result<OutcomeTable<Self>, DistError>
    where
        Self: Copy,
    {
        OutcomeTable::from_pairs(Self::MASSES.iter().copied())
    }
}

/// Associates items with probability weights and samples them through an
/// internal [`AliasTable`].
///
/// Build it from any iterator of `(item, weight)` with `weight >= 0`; the
/// weights are normalized to a probability vector before decomposition.
#[derive(Debug, Clone)]
pub struct OutcomeTable<T> {
    table: AliasTable,
    items: Vec<T>,
}

impl<T> OutcomeTable<T> {
    /// Build from any `(item, weight)` iterator.
    ///
    /// # Errors
    /// * [`DistError::Negative`] if any weight is negative or non-finite.
    /// * [`DistError::BadSum`] if the weights sum to zero.
    /// * [`DistError::TooShort`] for fewer than two items.
    /// * [`DistError::SparseSupport`] if too few items carry positive weight.
    ///
    /// # Complexity
    /// O(n²) build (the decomposition), O(n) space.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, DistError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut items = Vec::new();
        let mut weights = Vec::new();
        for (t, w) in pairs {
            items.push(t);
            weights.push(w);
        }
        let mass = pmf::normalize(&weights)?;
        let table = AliasTable::decompose(&mass)?;
        Ok(Self { table, items })
    }

    /// Sample an item **by reference** (no `Clone` bound).
    pub fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &mut R) -> &'a T {
        let idx = self.table.sample_index(rng);
        &self.items[idx]
    }

    /// Sample an item **by value** (clones the chosen element).
    ///
    /// Prefer [`sample`](Self::sample) if you don't need ownership.
    pub fn sample_owned<R: Rng + ?Sized>(&self, rng: &mut R) -> T
    where
        T: Clone,
    {
        self.items[self.table.sample_index(rng)].clone()
    }

    /// Number of items in the table.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The decomposition backing this table.
    pub fn alias(&self) -> &AliasTable {
        &self.table
    }
}
