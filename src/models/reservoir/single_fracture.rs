//! Single-fracture (m/A) thermal drawdown model.
//!
//! Uniform fluid sweep across one rectangular fracture in conductive rock.
//! The governing parameter is the mass loading `m/A` — mass flow per unit
//! fracture area — and the outlet temperature has the closed form
//!
//! ```text
//! T(t) = T_inj + (T₀ − T_inj) · erf( k_r / ((m/A)·c_w·√(α_r·t)) )
//! ```
//!
//! No numerical inversion is needed; the error function comes from `statrs`.

use statrs::function::erf::erf;
use uom::si::{
    f64::{ThermodynamicTemperature, Time},
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    water,
};

use super::{
    RockProperties, checked_age,
    error::{ReservoirConfigError, ReservoirError},
    mean_temperature,
};

/// Single rectangular fracture, m/A drawdown model.
#[derive(Debug, Clone)]
pub struct SingleFracture {
    initial_celsius: f64,
    injection_celsius: f64,
    /// `k_r / ((m/A)·c_w)`, in meters.
    loading_length: f64,
    /// Rock thermal diffusivity, m²/s.
    diffusivity: f64,
}

impl SingleFracture {
    /// Builds the model from the mass loading in kg/(s·m²).
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirConfigError`] if the injection temperature is not
    /// below the initial temperature.
    pub fn new(
        mass_loading: Constrained<f64, StrictlyPositive>,
        rock: &RockProperties,
        initial_temperature: ThermodynamicTemperature,
        injection_temperature: ThermodynamicTemperature,
    ) -> Result<Self, ReservoirConfigError> {
        if injection_temperature >= initial_temperature {
            return Err(ReservoirConfigError::InjectionNotBelowInitial {
                injection: injection_temperature,
                initial: initial_temperature,
            });
        }

        let mean = mean_temperature(initial_temperature, injection_temperature);
        let cw = water::specific_heat(mean).get::<joule_per_kilogram_kelvin>();
        let conductivity = rock.conductivity.get::<watt_per_meter_kelvin>();

        Ok(Self {
            initial_celsius: initial_temperature.get::<degree_celsius>(),
            injection_celsius: injection_temperature.get::<degree_celsius>(),
            loading_length: conductivity / (mass_loading.into_inner() * cw),
            diffusivity: rock.diffusivity(),
        })
    }

    /// Reservoir outlet temperature after `age` of production.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirError`] for invalid ages.
    pub fn temperature_at(
        &self,
        age: Time,
    ) -> Result<ThermodynamicTemperature, ReservoirError> {
        let seconds = checked_age(age)?;
        if seconds == 0.0 {
            return Ok(self.initial_temperature());
        }

        let argument = self.loading_length / (self.diffusivity * seconds).sqrt();
        let delta = self.initial_celsius - self.injection_celsius;
        Ok(ThermodynamicTemperature::new::<degree_celsius>(
            self.injection_celsius + delta * erf(argument),
        ))
    }

    /// The outlet temperature at age zero.
    #[must_use]
    pub fn initial_temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.initial_celsius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::year;

    fn model() -> SingleFracture {
        SingleFracture::new(
            StrictlyPositive::new(2.0e-5).unwrap(),
            &RockProperties::granite(),
            ThermodynamicTemperature::new::<degree_celsius>(109.5),
            ThermodynamicTemperature::new::<degree_celsius>(60.0),
        )
        .unwrap()
    }

    #[test]
    fn starts_at_initial_temperature() {
        let model = model();
        let t0 = model.temperature_at(Time::new::<year>(0.0)).unwrap();
        assert_relative_eq!(t0.get::<degree_celsius>(), 109.5);
    }

    #[test]
    fn declines_slowly_at_low_mass_loading() {
        // At m/A = 2e-5 kg/(s·m²) the 30-year decline stays within a few
        // degrees of bottom-hole temperature.
        let model = model();
        let t30 = model.temperature_at(Time::new::<year>(30.0)).unwrap();
        assert!(t30.get::<degree_celsius>() > 100.0);
        assert!(t30.get::<degree_celsius>() < 109.5);
    }

    #[test]
    fn monotonically_non_increasing() {
        let model = model();
        let mut previous = model.temperature_at(Time::new::<year>(0.0)).unwrap();
        for &years in &[0.25, 1.0, 5.0, 10.0, 20.0, 30.0, 50.0] {
            let current = model.temperature_at(Time::new::<year>(years)).unwrap();
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn higher_loading_draws_down_faster() {
        let slow = model();
        let fast = SingleFracture::new(
            StrictlyPositive::new(2.0e-4).unwrap(),
            &RockProperties::granite(),
            ThermodynamicTemperature::new::<degree_celsius>(109.5),
            ThermodynamicTemperature::new::<degree_celsius>(60.0),
        )
        .unwrap();

        let at = Time::new::<year>(20.0);
        assert!(fast.temperature_at(at).unwrap() < slow.temperature_at(at).unwrap());
    }
}
