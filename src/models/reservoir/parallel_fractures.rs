//! Multiple parallel fractures (Gringarten-type) drawdown model.
//!
//! Heat is mined by 1-D fluid sweep along equidistant vertical fractures in
//! otherwise impermeable rock. Each fracture face is fed by a rock slab of
//! half-thickness `x_E = separation / 2` with a no-flux plane midway to the
//! neighboring fracture. Solving conduction in the slab coupled to advection
//! along the fracture gives the dimensionless outlet drawdown in Laplace
//! space:
//!
//! ```text
//! Ĝ(s) = (1/s) · exp(−C · √s · tanh √s),   C = 2·k_r·H / (ṁ′·c_w·x_E)
//! ```
//!
//! with dimensionless time `t_D = α_r·t / x_E²`, fracture height `H`, and
//! `ṁ′` the mass flow per fracture per unit width. The transform has no
//! elementary inverse and is inverted numerically. Fracture water storage is
//! neglected, the classical Gringarten assumption.

use uom::si::{
    f64::{MassRate, ThermodynamicTemperature, Time, Volume},
    length::meter,
    mass_rate::kilogram_per_second,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{laplace::GaverStehfest, water};

use super::{
    RockProperties, checked_age, drawdown_temperature,
    error::{ReservoirConfigError, ReservoirError},
    geometry::FractureGeometry,
    mean_temperature,
};

/// Gringarten-type multiple parallel fractures model.
#[derive(Debug, Clone)]
pub struct ParallelFractures {
    initial_celsius: f64,
    injection_celsius: f64,
    /// `C` in the Laplace-space exponent.
    coefficient: f64,
    /// Seconds per unit of dimensionless time, `x_E²/α_r`.
    diffusion_time: f64,
    inverter: GaverStehfest,
    volume: Volume,
}

impl ParallelFractures {
    /// Builds the model from derived geometry and shared reservoir inputs.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirConfigError`] for a non-positive flow or an
    /// injection temperature at or above the initial temperature.
    pub fn new(
        geometry: &FractureGeometry,
        rock: &RockProperties,
        initial_temperature: ThermodynamicTemperature,
        injection_temperature: ThermodynamicTemperature,
        total_flow: MassRate,
    ) -> Result<Self, ReservoirConfigError> {
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

        let half_separation = 0.5 * geometry.separation.get::<meter>();
        let height = geometry.height.get::<meter>();
        let width = geometry.width.get::<meter>();
        let conductivity = rock.conductivity.get::<watt_per_meter_kelvin>();

        // Mass flow per fracture per unit width; the geometry derivation
        // guarantees count >= 1 and positive lengths.
        let flow_per_width = flow / f64::from(geometry.count) / width;

        let coefficient =
            2.0 * conductivity * height / (flow_per_width * cw * half_separation);
        let diffusion_time = half_separation * half_separation / rock.diffusivity();

        Ok(Self {
            initial_celsius: initial_temperature.get::<degree_celsius>(),
            injection_celsius: injection_temperature.get::<degree_celsius>(),
            coefficient,
            diffusion_time,
            inverter: GaverStehfest::default(),
            volume: geometry.volume,
        })
    }

    /// Reservoir outlet temperature after `age` of production.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirError`] for invalid ages or a failed inversion.
    pub fn temperature_at(
        &self,
        age: Time,
    ) -> Result<ThermodynamicTemperature, ReservoirError> {
        let seconds = checked_age(age)?;
        if seconds == 0.0 {
            return Ok(self.initial_temperature());
        }

        let dimensionless_time = seconds / self.diffusion_time;
        let coefficient = self.coefficient;
        let drawdown = self.inverter.invert(
            |s| {
                let root = s.sqrt();
                (-(coefficient * root * root.tanh())).exp() / s
            },
            dimensionless_time,
        )?;

        Ok(drawdown_temperature(
            self.initial_celsius,
            self.injection_celsius,
            drawdown,
        ))
    }

    /// The outlet temperature at age zero.
    #[must_use]
    pub fn initial_temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.initial_celsius)
    }

    /// Stimulated reservoir volume spanned by the fracture array.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, time::year};

    use crate::models::reservoir::geometry::{FractureGeometryInput, FractureShape};

    fn model() -> ParallelFractures {
        let geometry = FractureGeometryInput {
            shape: FractureShape::Square {
                side: Length::new::<meter>(160.0),
            },
            fracture_count: Some(100),
            separation: Some(Length::new::<meter>(10.0)),
            volume: None,
        }
        .derive()
        .unwrap();

        ParallelFractures::new(
            &geometry,
            &RockProperties::granite(),
            ThermodynamicTemperature::new::<degree_celsius>(188.0),
            ThermodynamicTemperature::new::<degree_celsius>(70.0),
            MassRate::new::<kilogram_per_second>(41.0),
        )
        .unwrap()
    }

    #[test]
    fn starts_at_initial_temperature() {
        let model = model();
        let t0 = model.temperature_at(Time::new::<year>(0.0)).unwrap();
        assert_relative_eq!(t0.get::<degree_celsius>(), 188.0);
    }

    #[test]
    fn early_drawdown_is_negligible_before_breakthrough() {
        // The thermal front for this geometry arrives after roughly a decade;
        // a two-year-old reservoir is still essentially undisturbed.
        let model = model();
        let t = model.temperature_at(Time::new::<year>(2.0)).unwrap();
        assert!(t.get::<degree_celsius>() > 186.0);
    }

    #[test]
    fn drawdown_grows_after_breakthrough() {
        let model = model();
        let mid = model.temperature_at(Time::new::<year>(10.0)).unwrap();
        let late = model.temperature_at(Time::new::<year>(40.0)).unwrap();

        assert!(late < mid);
        assert!(late.get::<degree_celsius>() < 185.0);
        // Never below the recharge temperature.
        assert!(late.get::<degree_celsius>() >= 70.0);
    }

    #[test]
    fn never_exceeds_initial_temperature() {
        let model = model();
        for &years in &[0.1, 0.5, 1.0, 5.0, 12.0, 25.0, 60.0] {
            let t = model.temperature_at(Time::new::<year>(years)).unwrap();
            assert!(t.get::<degree_celsius>() <= 188.0);
        }
    }

    #[test]
    fn rejects_negative_age() {
        let model = model();
        assert!(model.temperature_at(Time::new::<year>(-1.0)).is_err());
    }
}
