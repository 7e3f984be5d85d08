//! Numerical inversion of Laplace-domain solutions.
//!
//! Two of the reservoir models are defined in Laplace space with no
//! elementary time-domain inverse. This module isolates the inversion
//! algorithm behind [`GaverStehfest`] so that model logic never depends on
//! the numerical method; swapping in a different inverter touches only this
//! file.
//!
//! The Gaver–Stehfest method evaluates the transform at a handful of real
//! abscissas and combines them with precomputed weights. It is accurate for
//! the smooth, monotone transforms inverted here; callers clamp results into
//! their physical range to absorb the residual oscillation the method shows
//! near sharp fronts.

use thiserror::Error;

/// Errors from a numerical Laplace inversion.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LaplaceError {
    /// The term count must be an even integer in the supported range.
    #[error("term count {terms} is not an even number in 4..=20")]
    InvalidTermCount { terms: usize },

    /// Inversion is only defined for strictly positive time.
    #[error("inversion time must be positive, got {time}")]
    NonPositiveTime { time: f64 },

    /// The transform produced a non-finite value at one of the abscissas.
    #[error("transform evaluated to a non-finite value at s = {abscissa}")]
    NonFiniteTransform { abscissa: f64 },
}

/// Gaver–Stehfest inverse Laplace transform.
///
/// Weights are computed once at construction for a fixed even term count.
/// Fourteen terms is a good default for `f64` arithmetic: more terms improve
/// formal order but amplify rounding in the alternating weight sum.
#[derive(Debug, Clone)]
pub struct GaverStehfest {
    weights: Vec<f64>,
}

impl Default for GaverStehfest {
    fn default() -> Self {
        // Constructible for every even count accepted by `new`.
        Self {
            weights: stehfest_weights(14),
        }
    }
}

impl GaverStehfest {
    /// Creates an inverter with the given even term count (4..=20).
    ///
    /// # Errors
    ///
    /// Returns [`LaplaceError::InvalidTermCount`] for odd or out-of-range counts.
    pub fn new(terms: usize) -> Result<Self, LaplaceError> {
        if terms % 2 != 0 || !(4..=20).contains(&terms) {
            return Err(LaplaceError::InvalidTermCount { terms });
        }
        Ok(Self {
            weights: stehfest_weights(terms),
        })
    }

    /// Evaluates the time-domain function at `time` given its Laplace
    /// transform `transform`.
    ///
    /// # Errors
    ///
    /// Returns [`LaplaceError::NonPositiveTime`] for `time <= 0` or NaN, and
    /// [`LaplaceError::NonFiniteTransform`] if the transform misbehaves at
    /// any abscissa.
    pub fn invert(
        &self,
        transform: impl Fn(f64) -> f64,
        time: f64,
    ) -> Result<f64, LaplaceError> {
        if !(time > 0.0) || !time.is_finite() {
            return Err(LaplaceError::NonPositiveTime { time });
        }

        let ln2_over_t = std::f64::consts::LN_2 / time;
        let mut sum = 0.0;
        for (i, weight) in self.weights.iter().enumerate() {
            let s = (i as f64 + 1.0) * ln2_over_t;
            let value = transform(s);
            if !value.is_finite() {
                return Err(LaplaceError::NonFiniteTransform { abscissa: s });
            }
            sum += weight * value;
        }
        Ok(ln2_over_t * sum)
    }
}

fn factorial(n: usize) -> f64 {
    (1..=n).map(|k| k as f64).product()
}

fn stehfest_weights(terms: usize) -> Vec<f64> {
    let half = terms / 2;
    let mut weights = Vec::with_capacity(terms);
    for i in 1..=terms {
        let mut sum = 0.0;
        let lower = i.div_ceil(2);
        let upper = i.min(half);
        for k in lower..=upper {
            sum += (k as f64).powi(half as i32) * factorial(2 * k)
                / (factorial(half - k)
                    * factorial(k)
                    * factorial(k - 1)
                    * factorial(i - k)
                    * factorial(2 * k - i));
        }
        let sign = if (half + i) % 2 == 0 { 1.0 } else { -1.0 };
        weights.push(sign * sum);
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rejects_bad_term_counts() {
        assert!(GaverStehfest::new(7).is_err());
        assert!(GaverStehfest::new(2).is_err());
        assert!(GaverStehfest::new(22).is_err());
        assert!(GaverStehfest::new(12).is_ok());
    }

    #[test]
    fn rejects_non_positive_time() {
        let inverter = GaverStehfest::default();
        assert!(inverter.invert(|s| 1.0 / s, 0.0).is_err());
        assert!(inverter.invert(|s| 1.0 / s, -1.0).is_err());
        assert!(inverter.invert(|s| 1.0 / s, f64::NAN).is_err());
    }

    #[test]
    fn inverts_constant() {
        // L⁻¹[1/s] = 1
        let inverter = GaverStehfest::default();
        for &t in &[0.1, 1.0, 50.0] {
            let value = inverter.invert(|s| 1.0 / s, t).unwrap();
            assert_relative_eq!(value, 1.0, max_relative = 1e-8);
        }
    }

    #[test]
    fn inverts_ramp() {
        // L⁻¹[1/s²] = t
        let inverter = GaverStehfest::default();
        for &t in &[0.5, 2.0, 20.0] {
            let value = inverter.invert(|s| 1.0 / (s * s), t).unwrap();
            assert_relative_eq!(value, t, max_relative = 1e-7);
        }
    }

    #[test]
    fn inverts_exponential_decay() {
        // L⁻¹[1/(s + a)] = exp(-a t)
        let inverter = GaverStehfest::default();
        for &t in &[0.25, 1.0, 3.0] {
            let value = inverter.invert(|s| 1.0 / (s + 1.0), t).unwrap();
            assert_relative_eq!(value, (-t).exp(), max_relative = 1e-5);
        }
    }

    #[test]
    fn reports_non_finite_transform() {
        let inverter = GaverStehfest::default();
        let err = inverter.invert(|_| f64::NAN, 1.0).unwrap_err();
        assert!(matches!(err, LaplaceError::NonFiniteTransform { .. }));
    }
}
