//! Darcy friction factor for pipe flow.
//!
//! Laminar flow uses the closed form `f = 64/Re` directly. Turbulent flow
//! solves the implicit Colebrook–White relation
//!
//! ```text
//! 1/√f = −2·log₁₀( (ε/D)/3.7 + 2.51/(Re·√f) )
//! ```
//!
//! by bracketed bisection on the recompute residual: the model maps a trial
//! factor to the factor Colebrook–White implies for it, the problem reports
//! the mismatch, and the solver drives the mismatch to zero. The iteration
//! count is bounded and a non-converged solve is a typed failure carrying the
//! best residual — never a silently stale value.

use std::convert::Infallible;

use thiserror::Error;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{f64::Ratio, ratio::ratio};

/// Reynolds number below which the laminar closed form applies.
pub const LAMINAR_LIMIT: f64 = 2300.0;

/// Friction factor bracket guaranteed to contain the Colebrook–White root
/// for every physical pipe flow.
const BRACKET: [f64; 2] = [0.002, 0.8];

/// Solver configuration for the turbulent friction solve.
#[derive(Debug, Clone, Copy)]
pub struct FrictionConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the friction factor.
    pub factor_tol: f64,

    /// Absolute tolerance on the recompute residual.
    pub residual_tol: f64,
}

impl Default for FrictionConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            factor_tol: 1e-12,
            residual_tol: 1e-12,
        }
    }
}

impl FrictionConfig {
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.factor_tol,
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol,
        }
    }
}

/// Errors from the friction-factor computation.
#[derive(Debug, Error)]
pub enum FrictionError {
    /// The Reynolds number must be positive and finite.
    #[error("Reynolds number must be positive and finite, got {reynolds}")]
    InvalidReynolds { reynolds: f64 },

    /// Relative roughness must be non-negative and finite.
    #[error("relative roughness must be non-negative and finite, got {relative_roughness}")]
    InvalidRoughness { relative_roughness: f64 },

    /// The bisection solver encountered an error.
    #[error("friction bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("friction solve hit iteration limit: residual={residual}")]
    MaxIters { residual: f64, iters: usize },
}

/// Maps a trial friction factor to the factor Colebrook–White implies.
struct ColebrookModel {
    reynolds: f64,
    relative_roughness: f64,
}

impl Model for ColebrookModel {
    type Input = Ratio;
    type Output = Ratio;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let trial = input.get::<ratio>();
        let argument =
            self.relative_roughness / 3.7 + 2.51 / (self.reynolds * trial.sqrt());
        let implied = 0.25 / argument.log10().powi(2);
        Ok(Ratio::new::<ratio>(implied))
    }
}

/// Recompute-mismatch residual for the Colebrook–White fixed point.
struct ColebrookProblem;

impl EquationProblem<1> for ColebrookProblem {
    type Input = Ratio;
    type Output = Ratio;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Ratio::new::<ratio>(x[0]))
    }

    fn residuals(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.get::<ratio>() - input.get::<ratio>()])
    }
}

/// Computes the Darcy friction factor.
///
/// # Errors
///
/// Returns a [`FrictionError`] for invalid inputs or a non-converged
/// turbulent solve.
pub fn friction_factor(
    reynolds: f64,
    relative_roughness: f64,
    config: &FrictionConfig,
) -> Result<f64, FrictionError> {
    if !reynolds.is_finite() || reynolds <= 0.0 {
        return Err(FrictionError::InvalidReynolds { reynolds });
    }
    if !relative_roughness.is_finite() || relative_roughness < 0.0 {
        return Err(FrictionError::InvalidRoughness { relative_roughness });
    }

    if reynolds < LAMINAR_LIMIT {
        return Ok(64.0 / reynolds);
    }

    let model = ColebrookModel {
        reynolds,
        relative_roughness,
    };
    let problem = ColebrookProblem;

    let solution = bisection::solve(
        &model,
        &problem,
        BRACKET,
        &config.bisection(),
        |_: &bisection::Event<'_, _, _>| -> Option<bisection::Action> { None },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(FrictionError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(solution.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn laminar_is_closed_form() {
        let f = friction_factor(1000.0, 1.0e-4, &FrictionConfig::default()).unwrap();
        assert_relative_eq!(f, 64.0 / 1000.0);
    }

    #[test]
    fn smooth_turbulent_matches_colebrook() {
        // Smooth pipe at Re = 4000: f ≈ 0.0399.
        let f = friction_factor(4000.0, 0.0, &FrictionConfig::default()).unwrap();
        assert_relative_eq!(f, 0.0399, epsilon = 5e-4);
    }

    #[test]
    fn rough_turbulent_matches_colebrook() {
        // Re = 1e5, ε/D = 1e-4: f ≈ 0.0185.
        let f = friction_factor(1.0e5, 1.0e-4, &FrictionConfig::default()).unwrap();
        assert_relative_eq!(f, 0.0185, epsilon = 5e-4);
    }

    #[test]
    fn satisfies_the_implicit_relation() {
        let relative_roughness = 5.0e-4;
        for &reynolds in &[5.0e3, 5.0e4, 5.0e5, 5.0e6] {
            let f =
                friction_factor(reynolds, relative_roughness, &FrictionConfig::default())
                    .unwrap();
            let lhs = 1.0 / f.sqrt();
            let rhs = -2.0
                * (relative_roughness / 3.7 + 2.51 / (reynolds * f.sqrt())).log10();
            assert_relative_eq!(lhs, rhs, max_relative = 1e-6);
        }
    }

    #[test]
    fn roughness_increases_friction() {
        let smooth = friction_factor(1.0e5, 0.0, &FrictionConfig::default()).unwrap();
        let rough = friction_factor(1.0e5, 5.0e-3, &FrictionConfig::default()).unwrap();
        assert!(rough > smooth);
    }

    #[test]
    fn rejects_invalid_inputs() {
        let config = FrictionConfig::default();
        assert!(matches!(
            friction_factor(0.0, 1.0e-4, &config),
            Err(FrictionError::InvalidReynolds { .. })
        ));
        assert!(matches!(
            friction_factor(f64::NAN, 1.0e-4, &config),
            Err(FrictionError::InvalidReynolds { .. })
        ));
        assert!(matches!(
            friction_factor(1.0e5, -1.0e-4, &config),
            Err(FrictionError::InvalidRoughness { .. })
        ));
    }

    #[test]
    fn tight_iteration_budget_fails_loudly() {
        let config = FrictionConfig {
            max_iters: 3,
            factor_tol: 1e-15,
            residual_tol: 1e-15,
        };
        let result = friction_factor(1.0e5, 1.0e-4, &config);
        assert!(matches!(result, Err(FrictionError::MaxIters { .. })));
    }
}
