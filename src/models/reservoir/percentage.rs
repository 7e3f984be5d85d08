//! Percentage thermal drawdown model.
//!
//! The simplest variant: a linear — not exponential — decline of the outlet
//! temperature by a fixed fraction of the initial temperature per year,
//! `T(t) = T₀·(1 − rate·t)`. No floor is applied; the drawdown/redrill
//! policy is the intended guard against unphysical late-life temperatures.

use uom::si::{
    f64::{ThermodynamicTemperature, Time},
    thermodynamic_temperature::degree_celsius,
    time::year,
};

use crate::support::constraint::{Constrained, UnitIntervalOpen};

use super::{checked_age, error::ReservoirError};

/// Linear annual-percentage drawdown model.
#[derive(Debug, Clone)]
pub struct PercentageDrawdown {
    initial_celsius: f64,
    annual_rate: f64,
}

impl PercentageDrawdown {
    /// Builds the model from the fractional decline per year (e.g. 0.005 for
    /// 0.5 %/yr).
    #[must_use]
    pub fn new(
        annual_rate: Constrained<f64, UnitIntervalOpen>,
        initial_temperature: ThermodynamicTemperature,
    ) -> Self {
        Self {
            initial_celsius: initial_temperature.get::<degree_celsius>(),
            annual_rate: annual_rate.into_inner(),
        }
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
        checked_age(age)?;
        let years = age.get::<year>();
        Ok(ThermodynamicTemperature::new::<degree_celsius>(
            self.initial_celsius * (1.0 - self.annual_rate * years),
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

    fn model() -> PercentageDrawdown {
        PercentageDrawdown::new(
            UnitIntervalOpen::new(0.005).unwrap(),
            ThermodynamicTemperature::new::<degree_celsius>(145.0),
        )
    }

    #[test]
    fn declines_linearly() {
        let model = model();

        let t0 = model.temperature_at(Time::new::<year>(0.0)).unwrap();
        assert_relative_eq!(t0.get::<degree_celsius>(), 145.0);

        let t10 = model.temperature_at(Time::new::<year>(10.0)).unwrap();
        assert_relative_eq!(t10.get::<degree_celsius>(), 145.0 * 0.95);

        let t30 = model.temperature_at(Time::new::<year>(30.0)).unwrap();
        assert_relative_eq!(t30.get::<degree_celsius>(), 145.0 * 0.85);
    }

    #[test]
    fn decline_is_linear_not_exponential() {
        let model = model();
        let t20 = model.temperature_at(Time::new::<year>(20.0)).unwrap();
        // Exponential decline would give 145·0.995²⁰ ≈ 131.2 °C.
        assert_relative_eq!(t20.get::<degree_celsius>(), 130.5, epsilon = 1e-9);
    }

    #[test]
    fn rejects_invalid_age() {
        let model = model();
        assert!(model.temperature_at(Time::new::<year>(-0.1)).is_err());
        assert!(
            model
                .temperature_at(Time::new::<year>(f64::INFINITY))
                .is_err()
        );
    }
}
