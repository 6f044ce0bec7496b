//! Probability-vector helpers: validation, weight normalization, and the
//! binomial mass function used by the tests and demo drivers.

use crate::error::DistError;

/// Tolerance on "sums to 1" for caller-supplied probability vectors.
pub(crate) const SUM_TOL: f64 = 1e-6;

/// Shape, entry-range, and total-mass check shared by the samplers.
pub(crate) fn validate(mass: &[f64]) -> Result<(), DistError> {
    if mass.len() < 2 {
        return Err(DistError::TooShort { len: mass.len() });
    }
    let mut sum = 0.0f64;
    for (i, &p) in mass.iter().enumerate() {
        if !p.is_finite() || p < 0.0 {
            return Err(DistError::Negative { index: i, value: p });
        }
        sum += p;
    }
    if (sum - 1.0).abs() > SUM_TOL {
        return Err(DistError::BadSum { sum });
    }
    Ok(())
}

/// Scale a non-negative weight vector so it sums to 1.
///
/// # Errors
/// [`DistError::Negative`] for a negative or non-finite weight,
/// [`DistError::BadSum`] when the total is zero or not finite.
pub fn normalize(weights: &[f64]) -> Result<Vec<f64>, DistError> {
    let mut sum = 0.0f64;
    for (i, &w) in weights.iter().enumerate() {
        if !w.is_finite() || w < 0.0 {
            return Err(DistError::Negative { index: i, value: w });
        }
        sum += w;
    }
    if !sum.is_finite() || sum == 0.0 {
        return Err(DistError::BadSum { sum });
    }
    Ok(weights.iter().map(|&w| w / sum).collect())
}

/// Binomial(n, p) mass function over the support 0..=n.
///
/// Built with the multiplicative recursion
/// `p_k = p_{k−1} · (n−k+1)/k · p/(1−p)`, so there are no factorials to
/// overflow. `p = 0` and `p = 1` give the corresponding point mass.
///
/// # Errors
/// [`DistError::BadProbability`] when `p` lies outside [0, 1].
pub fn binomial(n: u32, p: f64) -> Result<Vec<f64>, DistError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(DistError::BadProbability { value: p });
    }
    let len = n as usize + 1;
    if p == 0.0 || p == 1.0 {
        let mut point = vec![0.0; len];
        point[if p == 0.0 { 0 } else { n as usize }] = 1.0;
        return Ok(point);
    }

    let ratio = p / (1.0 - p);
    let mut mass = Vec::with_capacity(len);
    let mut pk = (1.0 - p).powi(n as i32);
    mass.push(pk);
    for k in 1..=u64::from(n) {
        pk *= (u64::from(n) - k + 1) as f64 / k as f64 * ratio;
        mass.push(pk);
    }
    Ok(mass)
}
