//! Special functions not covered by `statrs`.

/// Exponential integral E₁(x) for `x > 0`.
///
/// Uses the convergent power series for small arguments and a modified
/// Lentz continued-fraction evaluation for large ones (Abramowitz & Stegun
/// 5.1.11 and 5.1.22). Returns NaN for non-positive arguments, which are
/// outside the physical domain of every caller in this crate.
#[must_use]
pub fn expint_e1(x: f64) -> f64 {
    const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

    if !(x > 0.0) {
        return f64::NAN;
    }

    if x <= 1.0 {
        // E₁(x) = -γ - ln x + Σ (-1)^(k+1) xᵏ / (k·k!)
        let mut sum = 0.0;
        let mut term = 1.0;
        for k in 1..=40 {
            let kf = f64::from(k);
            term *= -x / kf;
            let contribution = -term / kf;
            sum += contribution;
            if contribution.abs() < 1e-16 * sum.abs().max(1.0) {
                break;
            }
        }
        -EULER_GAMMA - x.ln() + sum
    } else {
        // E₁(x) = e⁻ˣ · [1/(x+1- 1²/(x+3- 2²/(x+5- …)))], evaluated by the
        // modified Lentz algorithm.
        let tiny = 1e-300;
        let mut b = x + 1.0;
        let mut c = 1.0 / tiny;
        let mut d = 1.0 / b;
        let mut h = d;
        for k in 1..=100u32 {
            let kf = f64::from(k);
            let a = -kf * kf;
            b += 2.0;
            d = 1.0 / (a * d + b);
            c = b + a / c;
            let delta = c * d;
            h *= delta;
            if (delta - 1.0).abs() < 1e-15 {
                break;
            }
        }
        (-x).exp() * h
    }
}
