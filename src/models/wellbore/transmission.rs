//! Wellbore heat transmission: reservoir outlet to wellhead.
//!
//! Two modes. The transient mode is Ramey's line-source solution for a
//! vertical well producing incompressible single-phase liquid with constant
//! heat capacity: the dimensionless time function
//!
//! ```text
//! f(t) = −ln( r_w / (2·√(α_r·t·u)) ) − 0.29
//! ```
//!
//! builds up with cumulative producing time `t` (adjusted by the utilization
//! factor `u`), and the temperature drop over a well of vertical depth `D`
//! against geothermal gradient `g` is
//!
//! ```text
//! ΔT = g·( D − A·(1 − e^(−D/A)) ),   A = ṁ·c_w·f(t) / (2π·k_r)
//! ```
//!
//! Ramey's solution is not valid for deviated wells; configuration rejects
//! that combination and the constant-drop mode is the required substitute.

use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
};

/// Producing times shorter than a day are evaluated at one day; the
/// line-source function is singular at zero elapsed time.
const MIN_PRODUCING_SECONDS: f64 = 86_400.0;

/// Heat-loss model between reservoir outlet and wellhead.
#[derive(Debug, Clone)]
pub(crate) enum HeatTransmission {
    Ramey(Ramey),
    ConstantDrop { drop_kelvin: f64 },
}

/// Precomputed inputs for Ramey's transient solution.
#[derive(Debug, Clone)]
pub(crate) struct Ramey {
    /// Geothermal gradient, K/m.
    pub gradient: f64,
    /// True vertical depth, m.
    pub depth: f64,
    /// Production casing inner radius, m.
    pub radius: f64,
    /// Rock thermal diffusivity, m²/s.
    pub diffusivity: f64,
    /// Rock thermal conductivity, W/(m·K).
    pub conductivity: f64,
    /// Utilization factor applied to producing time.
    pub utilization: f64,
    /// Per-production-well ṁ·c_w, W/K.
    pub capacitance_rate: f64,
}

impl HeatTransmission {
    /// Wellhead temperature for a given reservoir outlet temperature after
    /// `producing_seconds` of cumulative production.
    pub(crate) fn wellhead_temperature(
        &self,
        reservoir: ThermodynamicTemperature,
        producing_seconds: f64,
    ) -> ThermodynamicTemperature {
        let reservoir_celsius = reservoir.get::<degree_celsius>();
        let drop = match self {
            Self::Ramey(ramey) => ramey.temperature_drop(producing_seconds),
            Self::ConstantDrop { drop_kelvin } => *drop_kelvin,
        };
        ThermodynamicTemperature::new::<degree_celsius>(reservoir_celsius - drop)
    }

    /// The drop itself, for reporting.
    pub(crate) fn temperature_drop(&self, producing_seconds: f64) -> TemperatureInterval {
        let kelvin = match self {
            Self::Ramey(ramey) => ramey.temperature_drop(producing_seconds),
            Self::ConstantDrop { drop_kelvin } => *drop_kelvin,
        };
        TemperatureInterval::new::<delta_kelvin>(kelvin)
    }
}

impl Ramey {
    fn time_function(&self, producing_seconds: f64) -> f64 {
        let effective = (producing_seconds * self.utilization).max(MIN_PRODUCING_SECONDS);
        -(self.radius / (2.0 * (self.diffusivity * effective).sqrt())).ln() - 0.29
    }

    fn temperature_drop(&self, producing_seconds: f64) -> f64 {
        let relaxation = self.capacitance_rate * self.time_function(producing_seconds)
            / (2.0 * std::f64::consts::PI * self.conductivity);
        self.gradient
            * (self.depth - relaxation * (1.0 - (-self.depth / relaxation).exp()))
    }
}
