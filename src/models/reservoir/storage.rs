//! Reservoir thermal energy storage (RTES) model.
//!
//! Heat is parked in an aquifer and produced back in seasonal cycles. Each
//! cycle starts from a recharged bubble whose temperature excess over the
//! ambient aquifer has been scaled by the per-cycle thermal recovery factor;
//! within a cycle the produced temperature declines exponentially as the
//! bubble is drawn down:
//!
//! ```text
//! T(t) = T_amb + (T₀ − T_amb)·η^n·exp(−t_c/τ),   n = ⌊t/cycle⌋
//! ```
//!
//! with `τ` the stored-volume drawdown time constant. The profile recovers at
//! every recharge, so this variant is non-monotonic by design and is excluded
//! from the drawdown-only monotonicity property.

use uom::si::{
    f64::{MassRate, ThermodynamicTemperature, Time, Volume},
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::degree_celsius,
    time::second,
    volume::cubic_meter,
};

use crate::support::{
    constraint::{Constrained, UnitIntervalOpen},
    water,
};

use super::{
    RockProperties, checked_age,
    error::{ReservoirConfigError, ReservoirError},
    geometry::GeometryError,
    mean_temperature,
};

/// Cyclic storage model with per-cycle thermal recovery.
#[derive(Debug, Clone)]
pub struct ThermalStorage {
    stored_celsius: f64,
    ambient_celsius: f64,
    recovery_factor: f64,
    cycle_seconds: f64,
    /// In-cycle drawdown time constant, seconds.
    decline_seconds: f64,
    volume: Volume,
}

impl ThermalStorage {
    /// Builds the model from the storage cycle description.
    ///
    /// The configured initial temperature plays the role of the fully-charged
    /// storage temperature.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirConfigError`] for a non-positive cycle length or
    /// volume, a non-positive flow, or an ambient temperature at or above the
    /// stored temperature.
    pub fn new(
        ambient_temperature: ThermodynamicTemperature,
        recovery_factor: Constrained<f64, UnitIntervalOpen>,
        cycle_length: Time,
        stored_volume: Volume,
        rock: &RockProperties,
        stored_temperature: ThermodynamicTemperature,
        total_flow: MassRate,
    ) -> Result<Self, ReservoirConfigError> {
        let cycle_seconds = cycle_length.get::<second>();
        if !(cycle_seconds > 0.0) {
            return Err(GeometryError::NonPositive {
                name: "storage cycle length",
            }
            .into());
        }
        let volume_m3 = stored_volume.get::<cubic_meter>();
        if !(volume_m3 > 0.0) {
            return Err(GeometryError::NonPositive {
                name: "stored volume",
            }
            .into());
        }
        let flow = total_flow.get::<kilogram_per_second>();
        if !(flow > 0.0) {
            return Err(ReservoirConfigError::NonPositiveFlow);
        }
        if ambient_temperature >= stored_temperature {
            return Err(ReservoirConfigError::AmbientNotBelowStored {
                ambient: ambient_temperature,
                stored: stored_temperature,
            });
        }

        let mean = mean_temperature(stored_temperature, ambient_temperature);
        let cw = water::specific_heat(mean).get::<joule_per_kilogram_kelvin>();
        let rho_w = water::density(mean).get::<kilogram_per_cubic_meter>();

        let porosity = rock.porosity.as_ref().get::<ratio>();
        let rho_c_bulk = porosity * rho_w * cw
            + (1.0 - porosity)
                * rock.density.get::<kilogram_per_cubic_meter>()
                * rock.specific_heat.get::<joule_per_kilogram_kelvin>();

        Ok(Self {
            stored_celsius: stored_temperature.get::<degree_celsius>(),
            ambient_celsius: ambient_temperature.get::<degree_celsius>(),
            recovery_factor: recovery_factor.into_inner(),
            cycle_seconds,
            decline_seconds: rho_c_bulk * volume_m3 / (flow * cw),
            volume: stored_volume,
        })
    }

    /// Produced temperature after `age` of storage operation.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirError`] for invalid ages.
    pub fn temperature_at(
        &self,
        age: Time,
    ) -> Result<ThermodynamicTemperature, ReservoirError> {
        let seconds = checked_age(age)?;
        let cycles = (seconds / self.cycle_seconds).floor();
        let in_cycle = seconds - cycles * self.cycle_seconds;

        let excess = (self.stored_celsius - self.ambient_celsius)
            * self.recovery_factor.powf(cycles)
            * (-in_cycle / self.decline_seconds).exp();

        Ok(ThermodynamicTemperature::new::<degree_celsius>(
            self.ambient_celsius + excess,
        ))
    }

    /// The produced temperature at the start of the first cycle.
    #[must_use]
    pub fn initial_temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.stored_celsius)
    }

    /// Stored bubble volume.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::year;

    fn model() -> ThermalStorage {
        ThermalStorage::new(
            ThermodynamicTemperature::new::<degree_celsius>(30.0),
            UnitIntervalOpen::new(0.8).unwrap(),
            Time::new::<year>(1.0),
            Volume::new::<cubic_meter>(2.0e6),
            &RockProperties::granite(),
            ThermodynamicTemperature::new::<degree_celsius>(90.0),
            MassRate::new::<kilogram_per_second>(25.0),
        )
        .unwrap()
    }

    #[test]
    fn starts_fully_charged() {
        let model = model();
        let t0 = model.temperature_at(Time::new::<year>(0.0)).unwrap();
        assert_relative_eq!(t0.get::<degree_celsius>(), 90.0);
    }

    #[test]
    fn declines_within_a_cycle_and_recovers_at_recharge() {
        let model = model();
        let late_first_cycle = model.temperature_at(Time::new::<year>(0.9)).unwrap();
        let second_cycle_start = model.temperature_at(Time::new::<year>(1.0)).unwrap();

        assert!(late_first_cycle < model.initial_temperature());
        // Recharge recovers most, but not all, of the stored excess.
        assert!(second_cycle_start > late_first_cycle);
        assert_relative_eq!(
            second_cycle_start.get::<degree_celsius>(),
            30.0 + 60.0 * 0.8,
            epsilon = 1e-9
        );
    }

    #[test]
    fn cycle_peaks_decay_geometrically() {
        let model = model();
        for n in 0..4 {
            let peak = model
                .temperature_at(Time::new::<year>(f64::from(n)))
                .unwrap();
            assert_relative_eq!(
                peak.get::<degree_celsius>(),
                30.0 + 60.0 * 0.8f64.powi(n),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn never_exceeds_stored_temperature() {
        let model = model();
        for &years in &[0.0, 0.3, 0.7, 1.2, 2.5, 6.0] {
            let t = model.temperature_at(Time::new::<year>(years)).unwrap();
            assert!(t <= model.initial_temperature());
        }
    }

    #[test]
    fn ambient_must_be_below_stored() {
        let result = ThermalStorage::new(
            ThermodynamicTemperature::new::<degree_celsius>(95.0),
            UnitIntervalOpen::new(0.8).unwrap(),
            Time::new::<year>(1.0),
            Volume::new::<cubic_meter>(2.0e6),
            &RockProperties::granite(),
            ThermodynamicTemperature::new::<degree_celsius>(90.0),
            MassRate::new::<kilogram_per_second>(25.0),
        );
        assert!(matches!(
            result,
            Err(ReservoirConfigError::AmbientNotBelowStored { .. })
        ));
    }
}
