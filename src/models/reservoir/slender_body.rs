//! Slender-body closed-loop borehole model.
//!
//! A closed-loop lateral is treated as a slender transient line source in
//! infinite rock. The rock-side thermal resistance per unit length grows with
//! time as
//!
//! ```text
//! R(t) = E₁(r_b² / 4α_r t) / (4π k_r)
//! ```
//!
//! and the outlet temperature follows from exchanger effectiveness along the
//! lateral length `L`:
//!
//! ```text
//! T(t) = T_inj + (T₀ − T_inj)·(1 − exp(−L / (ṁ·c_w·R(t))))
//! ```
//!
//! At early time the resistance vanishes and the loop produces rock
//! temperature; drawdown is the slow logarithmic growth of `R`.

use uom::si::{
    f64::{Length, MassRate, ThermodynamicTemperature, Time},
    length::meter,
    mass_rate::kilogram_per_second,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{special::expint_e1, water};

use super::{
    RockProperties, checked_age,
    error::{ReservoirConfigError, ReservoirError},
    geometry::GeometryError,
    mean_temperature,
};

/// Transient line-source closed-loop model.
#[derive(Debug, Clone)]
pub struct SlenderBody {
    initial_celsius: f64,
    injection_celsius: f64,
    /// `r_b² / 4α_r`, seconds.
    source_time: f64,
    /// `4π·k_r·L`, W/K.
    conductance_scale: f64,
    /// `ṁ·c_w`, W/K.
    capacitance_rate: f64,
}

impl SlenderBody {
    /// Builds the model from the lateral length and borehole radius.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirConfigError`] for non-positive dimensions, a
    /// non-positive flow, or an injection temperature at or above the initial
    /// temperature.
    pub fn new(
        lateral_length: Length,
        borehole_radius: Length,
        rock: &RockProperties,
        initial_temperature: ThermodynamicTemperature,
        injection_temperature: ThermodynamicTemperature,
        total_flow: MassRate,
    ) -> Result<Self, ReservoirConfigError> {
        let length = lateral_length.get::<meter>();
        let radius = borehole_radius.get::<meter>();
        if !(length > 0.0) {
            return Err(GeometryError::NonPositive {
                name: "lateral length",
            }
            .into());
        }
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositive {
                name: "borehole radius",
            }
            .into());
        }

        let flow = total_flow.get::<kilogram_per_second>();
        if !(flow > 0.0) {
            return Err(ReservoirConfigError::NonPositiveFlow);
        }
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
            source_time: radius * radius / (4.0 * rock.diffusivity()),
            conductance_scale: 4.0 * std::f64::consts::PI * conductivity * length,
            capacitance_rate: flow * cw,
        })
    }

    /// Loop outlet temperature after `age` of production.
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

        let resistance_term = expint_e1(self.source_time / seconds);
        // E₁ underflows to zero at very early time; the conductance is then
        // unbounded and the loop produces undisturbed rock temperature.
        let effectiveness = if resistance_term > 0.0 {
            let conductance = self.conductance_scale / resistance_term;
            1.0 - (-conductance / self.capacitance_rate).exp()
        } else {
            1.0
        };

        let delta = self.initial_celsius - self.injection_celsius;
        Ok(ThermodynamicTemperature::new::<degree_celsius>(
            self.injection_celsius + delta * effectiveness,
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
    use uom::si::time::{hour, year};

    fn model() -> SlenderBody {
        SlenderBody::new(
            Length::new::<meter>(5000.0),
            Length::new::<meter>(0.11),
            &RockProperties::granite(),
            ThermodynamicTemperature::new::<degree_celsius>(150.0),
            ThermodynamicTemperature::new::<degree_celsius>(60.0),
            MassRate::new::<kilogram_per_second>(20.0),
        )
        .unwrap()
    }

    #[test]
    fn starts_at_rock_temperature() {
        let model = model();
        let t0 = model.temperature_at(Time::new::<year>(0.0)).unwrap();
        assert_relative_eq!(t0.get::<degree_celsius>(), 150.0);

        let minutes_old = model.temperature_at(Time::new::<hour>(0.05)).unwrap();
        assert_relative_eq!(
            minutes_old.get::<degree_celsius>(),
            150.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn resistance_growth_draws_the_loop_down() {
        let model = model();
        let t1 = model.temperature_at(Time::new::<year>(1.0)).unwrap();
        let t10 = model.temperature_at(Time::new::<year>(10.0)).unwrap();
        let t30 = model.temperature_at(Time::new::<year>(30.0)).unwrap();

        assert!(t1 < model.initial_temperature());
        assert!(t10 < t1);
        assert!(t30 < t10);
        assert!(t30.get::<degree_celsius>() > 60.0);
    }

    #[test]
    fn longer_laterals_produce_hotter() {
        let short = model();
        let long = SlenderBody::new(
            Length::new::<meter>(12_000.0),
            Length::new::<meter>(0.11),
            &RockProperties::granite(),
            ThermodynamicTemperature::new::<degree_celsius>(150.0),
            ThermodynamicTemperature::new::<degree_celsius>(60.0),
            MassRate::new::<kilogram_per_second>(20.0),
        )
        .unwrap();

        let at = Time::new::<year>(10.0);
        assert!(long.temperature_at(at).unwrap() > short.temperature_at(at).unwrap());
    }
}
