//! Inverse-transform sampling over a discrete distribution.
//!
//! The straightforward alternative to the alias table: precompute the
//! cumulative distribution, then map one uniform through its generalized
//! inverse. O(m) setup, O(log m) per draw — slower asymptotically than the
//! alias table but with no decomposition step, and it copes with point
//! masses the decomposition rejects.

use crate::error::DistError;
use crate::pmf::validate;
use rand::Rng;

/// Inverse-transform sampler: keeps the running cdf of a validated
/// probability vector. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CdfSampler {
    cdf: Vec<f64>,
}

impl CdfSampler {
    /// Precompute the cdf of `mass`. Same input contract as
    /// [`AliasTable::decompose`](crate::AliasTable::decompose), minus the
    /// support-sparsity restriction.
    pub fn new(mass: &[f64]) -> Result<Self, DistError> {
        validate(mass)?;
        let mut acc = 0.0f64;
        let mut cdf = Vec::with_capacity(mass.len());
        for &p in mass {
            acc += p;
            cdf.push(acc);
        }
        // Pin the tail to 1 so a uniform drawn just under 1 cannot fall off
        // the end of an fp-short cdf.
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }
        Ok(Self { cdf })
    }

    /// Smallest index whose cumulative mass reaches `u`. Pure.
    pub fn sample_with(&self, u: f64) -> usize {
        self.cdf
            .partition_point(|&c| c < u)
            .min(self.cdf.len() - 1)
    }

    /// Draw a single outcome from one uniform in [0, 1).
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.sample_with(rng.random())
    }

    /// Number of outcomes of the distribution.
    pub fn outcomes(&self) -> usize {
        self.cdf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pmf;
    use crate::DiscreteSampler;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            CdfSampler::new(&[1.0]),
            Err(DistError::TooShort { len: 1 })
        ));
        assert!(matches!(
            CdfSampler::new(&[-0.2, 1.2]),
            Err(DistError::Negative { index: 0, .. })
        ));
        assert!(matches!(
            CdfSampler::new(&[0.6, 0.6]),
            Err(DistError::BadSum { .. })
        ));
    }

    #[test]
    fn inverse_maps_the_cdf() {
        let s = CdfSampler::new(&[0.2, 0.3, 0.5]).unwrap();
        assert_eq!(s.sample_with(0.0), 0);
        assert_eq!(s.sample_with(0.2), 0); // F(0) ≥ u, inclusive
        assert_eq!(s.sample_with(0.21), 1);
        assert_eq!(s.sample_with(0.5), 1);
        assert_eq!(s.sample_with(0.51), 2);
        assert_eq!(s.sample_with(0.999_999), 2);
    }

    #[test]
    fn point_mass_is_fine_here() {
        // the decomposition rejects this; the cdf walk does not care
        let s = CdfSampler::new(&[1.0, 0.0, 0.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(s.sample_index(&mut rng), 0);
        }
    }

    #[test]
    fn binomial_histogram_roughly_matches() {
        let mass = pmf::binomial(20, 0.4).unwrap();
        let s = CdfSampler::new(&mass).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let draws = 100_000usize;
        let counts = s.sample_counts(&mut rng, draws);
        for (i, &c) in counts.iter().enumerate() {
            let emp = c as f64 / draws as f64;
            assert!(
                (emp - mass[i]).abs() < 0.015,
                "i={i} emp={emp} p={}",
                mass[i]
            );
        }
    }
}
