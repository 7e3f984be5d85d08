//! Reservoir thermal-drawdown models.
//!
//! Nine mutually exclusive models predict the reservoir outlet temperature as
//! a function of elapsed *reservoir age* — the clock that resets when a well
//! pair is redrilled. They share one capability, [`ReservoirModel::temperature_at`],
//! and are dispatched through a sum type selected once at configuration time;
//! each variant owns its parameter validation and numeric method.
//!
//! | Variant | Method |
//! |---|---|
//! | [`ParallelFractures`] | Laplace-space solution, numerically inverted |
//! | [`LinearHeatSweep`] | Laplace-space porous-bed sweep, numerically inverted |
//! | [`SingleFracture`] | closed form in the error function (m/A loading) |
//! | [`PercentageDrawdown`] | linear algebraic decline |
//! | [`UserProfile`] | strict interpolation of a supplied table |
//! | [`ExternalSimulator`] | out-of-process run, then strict interpolation |
//! | [`Cylindrical`] | lumped cylinder with conduction recharge |
//! | [`SlenderBody`] | transient line source via the exponential integral |
//! | [`ThermalStorage`] | cyclic storage with per-cycle recovery factor |
//!
//! Every variant returns exactly the initial temperature at age zero and
//! never exceeds it; drawdown-only variants decline monotonically.
//! [`UserProfile`] and [`ThermalStorage`] may be non-monotonic by design.

mod config;
mod cylindrical;
mod error;
mod external;
mod linear_sweep;
mod parallel_fractures;
mod percentage;
mod profile;
mod single_fracture;
mod slender_body;
mod storage;

pub mod geometry;

pub use config::{ReservoirConfig, ReservoirModelConfig, RockProperties};
pub use cylindrical::Cylindrical;
pub use error::{ReservoirConfigError, ReservoirError};
pub use external::{ExternalHandoff, ExternalSimulator};
pub use linear_sweep::LinearHeatSweep;
pub use parallel_fractures::ParallelFractures;
pub use percentage::PercentageDrawdown;
pub use profile::UserProfile;
pub use single_fracture::SingleFracture;
pub use slender_body::SlenderBody;
pub use storage::ThermalStorage;

use twine_core::Model;
use uom::si::{
    f64::{ThermodynamicTemperature, Time, Volume},
    thermodynamic_temperature::degree_celsius,
    time::second,
};

/// A validated reservoir thermal model.
///
/// Construct through [`ReservoirConfig::build`], or build a variant directly
/// and wrap it.
#[derive(Debug, Clone)]
pub enum ReservoirModel {
    ParallelFractures(ParallelFractures),
    LinearHeatSweep(LinearHeatSweep),
    SingleFracture(SingleFracture),
    PercentageDrawdown(PercentageDrawdown),
    UserProfile(UserProfile),
    ExternalSimulator(ExternalSimulator),
    Cylindrical(Cylindrical),
    SlenderBody(SlenderBody),
    ThermalStorage(ThermalStorage),
}

impl ReservoirModel {
    /// Reservoir outlet temperature after `age` of production since the last
    /// (re)drill.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirError`] for negative or non-finite ages, failed
    /// numerical inversion, or out-of-domain table lookups.
    pub fn temperature_at(
        &self,
        age: Time,
    ) -> Result<ThermodynamicTemperature, ReservoirError> {
        match self {
            Self::ParallelFractures(model) => model.temperature_at(age),
            Self::LinearHeatSweep(model) => model.temperature_at(age),
            Self::SingleFracture(model) => model.temperature_at(age),
            Self::PercentageDrawdown(model) => model.temperature_at(age),
            Self::UserProfile(model) => model.temperature_at(age),
            Self::ExternalSimulator(model) => model.temperature_at(age),
            Self::Cylindrical(model) => model.temperature_at(age),
            Self::SlenderBody(model) => model.temperature_at(age),
            Self::ThermalStorage(model) => model.temperature_at(age),
        }
    }

    /// The outlet temperature at age zero, which doubles as the physical
    /// upper bound for every later query.
    #[must_use]
    pub fn initial_temperature(&self) -> ThermodynamicTemperature {
        match self {
            Self::ParallelFractures(model) => model.initial_temperature(),
            Self::LinearHeatSweep(model) => model.initial_temperature(),
            Self::SingleFracture(model) => model.initial_temperature(),
            Self::PercentageDrawdown(model) => model.initial_temperature(),
            Self::UserProfile(model) => model.initial_temperature(),
            Self::ExternalSimulator(model) => model.initial_temperature(),
            Self::Cylindrical(model) => model.initial_temperature(),
            Self::SlenderBody(model) => model.initial_temperature(),
            Self::ThermalStorage(model) => model.initial_temperature(),
        }
    }

    /// The reservoir volume, when the variant derives one.
    ///
    /// Used for the heat-in-place accounting; table-backed and purely
    /// algebraic variants have no volume to report.
    #[must_use]
    pub fn volume(&self) -> Option<Volume> {
        match self {
            Self::ParallelFractures(model) => Some(model.volume()),
            Self::LinearHeatSweep(model) => Some(model.volume()),
            Self::Cylindrical(model) => Some(model.volume()),
            Self::ThermalStorage(model) => Some(model.volume()),
            Self::SingleFracture(_)
            | Self::PercentageDrawdown(_)
            | Self::UserProfile(_)
            | Self::ExternalSimulator(_)
            | Self::SlenderBody(_) => None,
        }
    }
}

/// Thin adapter exposing the reservoir family as a callable model.
impl Model for ReservoirModel {
    type Input = Time;
    type Output = ThermodynamicTemperature;
    type Error = ReservoirError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.temperature_at(*input)
    }
}

/// Validates a reservoir-age query and returns it in seconds.
pub(crate) fn checked_age(age: Time) -> Result<f64, ReservoirError> {
    let age_seconds = age.get::<second>();
    if age_seconds.is_finite() && age_seconds >= 0.0 {
        Ok(age_seconds)
    } else {
        Err(ReservoirError::InvalidAge { age_seconds })
    }
}

/// Mean of two absolute temperatures, used to evaluate fluid properties at
/// representative circulation conditions.
pub(crate) fn mean_temperature(
    a: ThermodynamicTemperature,
    b: ThermodynamicTemperature,
) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(
        0.5 * (a.get::<degree_celsius>() + b.get::<degree_celsius>()),
    )
}

/// Applies a clamped drawdown fraction between the initial and injection
/// temperatures.
///
/// The clamp absorbs the small oscillation numerical Laplace inversion shows
/// near sharp thermal fronts, keeping the result inside its physical bounds.
pub(crate) fn drawdown_temperature(
    initial_celsius: f64,
    injection_celsius: f64,
    fraction: f64,
) -> ThermodynamicTemperature {
    let fraction = fraction.clamp(0.0, 1.0);
    ThermodynamicTemperature::new::<degree_celsius>(
        initial_celsius - fraction * (initial_celsius - injection_celsius),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::time::year;

    #[test]
    fn checked_age_rejects_bad_queries() {
        assert!(checked_age(Time::new::<second>(-1.0)).is_err());
        assert!(checked_age(Time::new::<second>(f64::NAN)).is_err());
        assert!(checked_age(Time::new::<year>(5.0)).is_ok());
    }

    #[test]
    fn drawdown_is_clamped_to_physical_bounds() {
        let above = drawdown_temperature(188.0, 70.0, -0.01);
        assert_eq!(above.get::<degree_celsius>(), 188.0);

        let below = drawdown_temperature(188.0, 70.0, 1.5);
        assert_eq!(below.get::<degree_celsius>(), 70.0);
    }
}
