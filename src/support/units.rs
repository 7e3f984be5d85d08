//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units crossing public API
//! boundaries (temperature, pressure, power, flow). This module provides
//! extensions that are useful for modeling but aren't included in [`uom`].
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait provides a [`minus`](TemperatureDifference::minus)
//! method for subtracting one absolute temperature from another to get a
//! temperature interval, a distinction `uom` enforces but does not bridge:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use wellfield::support::units::TemperatureDifference;
//!
//! let t1 = ThermodynamicTemperature::new::<kelvin>(300.0);
//! let t2 = ThermodynamicTemperature::new::<kelvin>(250.0);
//! let delta_t = t1.minus(t2);
//! // delta_t is a TemperatureInterval, not a ThermodynamicTemperature
//! ```

use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// Subtracts two [`ThermodynamicTemperature`] values (absolute temperatures)
/// and returns a [`TemperatureInterval`] (temperature difference).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}
