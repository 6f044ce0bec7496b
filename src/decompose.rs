//! Sequential two-point decomposition of a discrete distribution.
//!
//! An m-outcome probability vector is broken into exactly m−1 equal-weight
//! "buckets", each a two-point distribution over a `(low, high)` outcome
//! pair. Averaging the buckets reproduces the input vector, so picking a
//! bucket uniformly and then resolving between its two outcomes samples the
//! original distribution in O(1).

use crate::error::DistError;
use crate::pmf::validate;
use rand::Rng;

/// Absolute tolerance for the reconstruction post-check.
const RECON_TOL: f64 = 1e-9;
/// Slack allowed on a split mass before the input counts as too sparse.
const SPLIT_TOL: f64 = 1e-9;

/// One decomposition step: a two-point distribution over the outcome pair
/// `(low, high)`, holding `split` of its mass on `low` and `1 − split` on
/// `high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    /// Outcome that receives `split` of the bucket's mass.
    pub low: usize,
    /// Outcome that receives the remainder.
    pub high: usize,
    /// Mass assigned to `low`, in [0, 1].
    pub split: f64,
}

/// Alias table for an m-outcome distribution: exactly m−1 buckets in
/// construction order.
///
/// Immutable once built. All sampling takes `&self`, so a table can be
/// shared across threads freely; draws are independent.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTable {
    buckets: Vec<Bucket>,
    outcomes: usize,
}

/// First index of the smallest positive entry (argmin over positives,
/// earliest index wins ties).
fn lowest_positive(r: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in r.iter().enumerate() {
        if v > 0.0 {
            match best {
                Some(b) if r[b] <= v => {}
                _ => best = Some(i),
            }
        }
    }
    best
}

/// First index of the largest positive entry (argmax over positives,
/// earliest index wins ties).
fn highest_positive(r: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &v) in r.iter().enumerate() {
        if v > 0.0 {
            match best {
                Some(b) if r[b] >= v => {}
                _ => best = Some(i),
            }
        }
    }
    best
}

/// Earliest positive index other than `skip`.
fn positive_excluding(r: &[f64], skip: usize) -> Option<usize> {
    r.iter()
        .enumerate()
        .find(|&(i, &v)| i != skip && v > 0.0)
        .map(|(i, _)| i)
}

impl AliasTable {
    /// Decompose a probability vector into its alias table. O(m²): each of
    /// the m−1 steps scans the residual for its extrema.
    ///
    /// # Errors
    /// * [`DistError::TooShort`] for fewer than two outcomes.
    /// * [`DistError::Negative`] for a negative or non-finite entry.
    /// * [`DistError::BadSum`] when the entries do not sum to 1.
    /// * [`DistError::SparseSupport`] when a step cannot find two positive
    ///   entries to pair, or the minimal entry overfills a bucket — point
    ///   masses like `[1.0, 0.0, 0.0]` and heavily zero-padded vectors land
    ///   here.
    /// * [`DistError::Reconstruction`] if the finished table fails to
    ///   reproduce the input. That is an internal fault, not a caller error.
    pub fn decompose(mass: &[f64]) -> Result<Self, DistError> {
        validate(mass)?;
        let m = mass.len();
        let mut residual = mass.to_vec();
        let mut buckets = Vec::with_capacity(m - 1);

        // Steps 1..=m−2 each retire the smallest positive entry; the residual
        // is kept normalized so every step sees a probability vector again.
        for k in 1..=m - 2 {
            let low = lowest_positive(&residual).ok_or(DistError::SparseSupport { step: k })?;
            let high = match highest_positive(&residual) {
                Some(h) if h != low => h,
                // all positive entries equal (e.g. a uniform vector)
                _ => positive_excluding(&residual, low)
                    .ok_or(DistError::SparseSupport { step: k })?,
            };

            // Buckets not yet emitted, this one included. The smallest of
            // `remaining + 1` positive entries fits in one bucket; if it does
            // not, the support is too sparse for a m−1 bucket table.
            let remaining = (m - k) as f64;
            let raw = remaining * residual[low];
            if raw > 1.0 + SPLIT_TOL {
                return Err(DistError::SparseSupport { step: k });
            }
            let split = raw.min(1.0);
            buckets.push(Bucket { low, high, split });

            // R ← (R − q/remaining) · remaining/(remaining − 1), where q is
            // the bucket just emitted. The low entry is consumed exactly;
            // assigning zero outright keeps fp dust from resurrecting it as
            // a later minimum.
            residual[low] = 0.0;
            residual[high] = (residual[high] - (1.0 - split) / remaining).max(0.0);
            let rescale = remaining / (remaining - 1.0);
            for v in residual.iter_mut() {
                *v *= rescale;
            }
        }

        // Base case: the residual is itself the final two-point distribution
        // and is appended unmodified. `low == high` only when a single
        // positive entry remains (split ≈ 1).
        let low = lowest_positive(&residual).ok_or(DistError::SparseSupport { step: m - 1 })?;
        let high = match highest_positive(&residual) {
            Some(h) if h != low => h,
            _ => positive_excluding(&residual, low).unwrap_or(low),
        };
        buckets.push(Bucket {
            low,
            high,
            split: residual[low].min(1.0),
        });

        let table = Self {
            buckets,
            outcomes: m,
        };
        table.check_reconstruction(mass)?;
        Ok(table)
    }

    /// Build a table from hand-made buckets; `outcomes` is the bucket count
    /// plus one.
    ///
    /// # Errors
    /// [`DistError::EmptyTable`] for no buckets, [`DistError::SplitOutOfRange`]
    /// for a split outside [0, 1], [`DistError::BadIndex`] for an outcome
    /// index past the end of the vector.
    pub fn from_buckets(buckets: Vec<Bucket>) -> Result<Self, DistError> {
        if buckets.is_empty() {
            return Err(DistError::EmptyTable);
        }
        let outcomes = buckets.len() + 1;
        for (i, b) in buckets.iter().enumerate() {
            if !(0.0..=1.0).contains(&b.split) {
                return Err(DistError::SplitOutOfRange {
                    bucket: i,
                    split: b.split,
                });
            }
            if b.low >= outcomes {
                return Err(DistError::BadIndex {
                    bucket: i,
                    index: b.low,
                });
            }
            if b.high >= outcomes {
                return Err(DistError::BadIndex {
                    bucket: i,
                    index: b.high,
                });
            }
        }
        Ok(Self { buckets, outcomes })
    }

    /// Resolve one draw from a pair of uniforms in [0, 1). Pure: the result
    /// depends on nothing but the table and `(u1, u2)`.
    ///
    /// `u1` picks the bucket, `ceil(u1 · (m−1)) − 1` clamped into range, so
    /// `u1 = 0` lands on bucket 0 and `u1 = 1` on bucket m−2. `u2` resolves
    /// the bucket: `low` iff `u2 ≤ split`.
    pub fn sample_with(&self, u1: f64, u2: f64) -> usize {
        let nb = self.buckets.len();
        let k = ((u1 * nb as f64).ceil() as usize)
            .saturating_sub(1)
            .min(nb - 1);
        let b = &self.buckets[k];
        if u2 <= b.split { b.low } else { b.high }
    }

    /// Draw a single outcome in O(1): two fresh uniforms, one comparison.
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let u1: f64 = rng.random();
        let u2: f64 = rng.random();
        self.sample_with(u1, u2)
    }

    /// Number of outcomes (m) of the decomposed distribution.
    pub fn outcomes(&self) -> usize {
        self.outcomes
    }

    /// The m−1 buckets, in construction order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Average of the bucket-implied two-point distributions.
    fn reconstruct(&self) -> Vec<f64> {
        let mut acc = vec![0.0f64; self.outcomes];
        for b in &self.buckets {
            acc[b.low] += b.split;
            acc[b.high] += 1.0 - b.split;
        }
        let inv = 1.0 / self.buckets.len() as f64;
        for v in acc.iter_mut() {
            *v *= inv;
        }
        acc
    }

    fn check_reconstruction(&self, mass: &[f64]) -> Result<(), DistError> {
        let recon = self.reconstruct();
        for (i, (&expected, &actual)) in mass.iter().zip(recon.iter()).enumerate() {
            if (expected - actual).abs() > RECON_TOL {
                return Err(DistError::Reconstruction {
                    index: i,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pmf;
    use crate::DiscreteSampler;
    use rand::{SeedableRng, rngs::StdRng};

    fn table(mass: &[f64]) -> AliasTable {
        AliasTable::decompose(mass).unwrap()
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            AliasTable::decompose(&[]),
            Err(DistError::TooShort { len: 0 })
        ));
        assert!(matches!(
            AliasTable::decompose(&[1.0]),
            Err(DistError::TooShort { len: 1 })
        ));
        assert!(matches!(
            AliasTable::decompose(&[-0.1, 1.1]),
            Err(DistError::Negative { index: 0, .. })
        ));
        assert!(matches!(
            AliasTable::decompose(&[0.5, f64::NAN]),
            Err(DistError::Negative { index: 1, .. })
        ));
        assert!(matches!(
            AliasTable::decompose(&[0.3, 0.3]),
            Err(DistError::BadSum { .. })
        ));
    }

    #[test]
    fn always_m_minus_one_buckets() {
        let cases: Vec<Vec<f64>> = vec![
            vec![0.3, 0.7],
            vec![0.2, 0.3, 0.5],
            vec![0.1, 0.2, 0.3, 0.4],
            vec![0.25; 4],
            pmf::binomial(6, 0.3).unwrap(),
            pmf::binomial(20, 0.4).unwrap(),
        ];
        for mass in cases {
            let t = table(&mass);
            assert_eq!(t.buckets().len(), mass.len() - 1);
            assert_eq!(t.outcomes(), mass.len());
        }
    }

    #[test]
    fn reconstruction_matches_input() {
        let cases: Vec<Vec<f64>> = vec![
            vec![0.2, 0.3, 0.5],
            vec![0.5, 0.25, 0.125, 0.0625, 0.0625],
            vec![0.2, 0.2, 0.2, 0.2, 0.2],
            vec![0.2, 0.3, 0.5, 0.0], // one zero entry stays decomposable
            pmf::binomial(12, 0.35).unwrap(),
        ];
        for mass in cases {
            let recon = table(&mass).reconstruct();
            for (i, (&want, &got)) in mass.iter().zip(recon.iter()).enumerate() {
                assert!(
                    (want - got).abs() <= 1e-9,
                    "i={i} want={want} got={got} for {mass:?}"
                );
            }
        }
    }

    #[test]
    fn decompose_is_deterministic() {
        let mass = pmf::binomial(15, 0.42).unwrap();
        // bitwise-equal buckets on identical input
        assert_eq!(table(&mass), table(&mass));
    }

    #[test]
    fn two_outcomes_exact() {
        let t = table(&[0.3, 0.7]);
        assert_eq!(t.buckets().len(), 1);
        let b = t.buckets()[0];
        assert_eq!((b.low, b.high), (0, 1));
        assert!((b.split - 0.3).abs() < 1e-15);
        // u2 ≤ split is inclusive
        assert_eq!(t.sample_with(0.5, 0.29), 0);
        assert_eq!(t.sample_with(0.5, 0.3), 0);
        assert_eq!(t.sample_with(0.5, 0.31), 1);
    }

    #[test]
    fn degenerate_point_mass_rejected() {
        assert!(matches!(
            AliasTable::decompose(&[1.0, 0.0, 0.0]),
            Err(DistError::SparseSupport { step: 1 })
        ));
    }

    #[test]
    fn sparse_support_rejected() {
        // two positives cannot fill three buckets
        assert!(matches!(
            AliasTable::decompose(&[0.5, 0.5, 0.0, 0.0]),
            Err(DistError::SparseSupport { .. })
        ));
    }

    #[test]
    fn uniform_ties_break_to_lowest_index() {
        let t = table(&[0.25; 4]);
        let first = t.buckets()[0];
        assert_eq!(first.low, 0);
        assert_eq!(first.high, 1);
        for b in t.buckets() {
            assert_ne!(b.low, b.high);
            assert!((0.0..=1.0).contains(&b.split));
        }
    }

    #[test]
    fn u1_boundaries_clamp() {
        let t = table(&pmf::binomial(9, 0.5).unwrap());
        let nb = t.buckets().len();
        // u1 = 0 must land on bucket 0, u1 = 1 on the last bucket
        assert_eq!(t.sample_with(0.0, 0.0), t.buckets()[0].low);
        assert_eq!(t.sample_with(1.0, 0.0), t.buckets()[nb - 1].low);
        assert_eq!(t.sample_with(1.0, 1.0), t.buckets()[nb - 1].high);
    }

    #[test]
    fn binomial_sampling_fidelity() {
        let mass = pmf::binomial(20, 0.4).unwrap();
        let t = table(&mass);

        let mut rng = StdRng::seed_from_u64(42);
        let draws = 200_000usize;
        let counts = t.sample_counts(&mut rng, draws);

        let mut chi2 = 0.0;
        for (i, &c) in counts.iter().enumerate() {
            let emp = c as f64 / draws as f64;
            assert!(
                (emp - mass[i]).abs() < 0.01,
                "i={i} emp={emp} p={}",
                mass[i]
            );
            let expected = mass[i] * draws as f64;
            // Cochran's rule: only bins with a decent expected count
            if expected >= 5.0 {
                chi2 += (c as f64 - expected).powi(2) / expected;
            }
        }
        // critical value at the 0.001 level for ≤ 20 degrees of freedom
        assert!(chi2 < 45.31, "chi2={chi2}");
    }

    #[test]
    fn from_buckets_validation() {
        assert!(matches!(
            AliasTable::from_buckets(vec![]),
            Err(DistError::EmptyTable)
        ));
        assert!(matches!(
            AliasTable::from_buckets(vec![Bucket {
                low: 0,
                high: 1,
                split: 1.5
            }]),
            Err(DistError::SplitOutOfRange { bucket: 0, .. })
        ));
        assert!(matches!(
            AliasTable::from_buckets(vec![Bucket {
                low: 0,
                high: 5,
                split: 0.5
            }]),
            Err(DistError::BadIndex {
                bucket: 0,
                index: 5
            })
        ));

        // a decomposed table round-trips through its own buckets
        let t = table(&[0.2, 0.3, 0.5]);
        let rebuilt = AliasTable::from_buckets(t.buckets().to_vec()).unwrap();
        assert_eq!(rebuilt, t);
    }

    #[test]
    fn table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AliasTable>();
    }
}
