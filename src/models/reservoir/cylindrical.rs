//! Cylindrical reservoir model for non-fractured well geometries.
//!
//! The produced volume is a vertical cylinder of rock and pore fluid treated
//! as a single lumped thermal mass. Heat leaves with the circulating water
//! and is partially replenished by steady radial conduction from the far
//! field through a surrounding shell, giving a closed-form exponential
//! relaxation toward the mixing steady state:
//!
//! ```text
//! T(t)  = T_ss + (T₀ − T_ss)·e^(−t/τ)
//! T_ss  = (ṁ·c_w·T_inj + U·T₀) / (ṁ·c_w + U)
//! U     = 2π·k_r·H / ln(R_far/R)
//! τ     = (φ·ρ_w c_w + (1−φ)·ρ_r c_r)·π·R²·H / (ṁ·c_w + U)
//! ```

use uom::si::{
    f64::{Length, MassRate, ThermodynamicTemperature, Time, Volume},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
    volume::cubic_meter,
};

use crate::diagnostics::Advisory;
use crate::support::{constraint::ConstraintError, water};

use super::{
    RockProperties, checked_age,
    error::{ReservoirConfigError, ReservoirError},
    geometry::GeometryError,
    mean_temperature,
};

/// Far-field to reservoir radius ratio merged in when not supplied.
const DEFAULT_FAR_FIELD_RATIO: f64 = 10.0;

/// Lumped cylindrical reservoir with conduction recharge.
#[derive(Debug, Clone)]
pub struct Cylindrical {
    initial_celsius: f64,
    steady_celsius: f64,
    /// Relaxation time constant, seconds.
    time_constant: f64,
    volume: Volume,
}

impl Cylindrical {
    /// Builds the model from the cylinder dimensions.
    ///
    /// A missing far-field ratio is defaulted and reported as an advisory.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirConfigError`] for non-positive dimensions, a
    /// far-field ratio at or below one, a non-positive flow, or an injection
    /// temperature at or above the initial temperature.
    pub fn new(
        radius: Length,
        length: Length,
        far_field_ratio: Option<f64>,
        rock: &RockProperties,
        initial_temperature: ThermodynamicTemperature,
        injection_temperature: ThermodynamicTemperature,
        total_flow: MassRate,
        advisories: &mut Vec<Advisory>,
    ) -> Result<Self, ReservoirConfigError> {
        let radius_m = radius.get::<meter>();
        let length_m = length.get::<meter>();
        if !(radius_m > 0.0) {
            return Err(GeometryError::NonPositive {
                name: "reservoir radius",
            }
            .into());
        }
        if !(length_m > 0.0) {
            return Err(GeometryError::NonPositive {
                name: "reservoir length",
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

        let ratio_far = match far_field_ratio {
            Some(value) => {
                if !(value > 1.0) {
                    return Err(ReservoirConfigError::Parameter {
                        parameter: "far-field radius ratio",
                        source: ConstraintError::BelowMinimum,
                    });
                }
                value
            }
            None => {
                let advisory = Advisory::DefaultedFarFieldRatio {
                    value: DEFAULT_FAR_FIELD_RATIO,
                };
                advisory.emit();
                advisories.push(advisory);
                DEFAULT_FAR_FIELD_RATIO
            }
        };

        let mean = mean_temperature(initial_temperature, injection_temperature);
        let cw = water::specific_heat(mean).get::<joule_per_kilogram_kelvin>();
        let rho_w = water::density(mean).get::<kilogram_per_cubic_meter>();

        let porosity = rock.porosity.as_ref().get::<ratio>();
        let conductivity = rock.conductivity.get::<watt_per_meter_kelvin>();
        let rho_c_bulk = porosity * rho_w * cw
            + (1.0 - porosity)
                * rock.density.get::<kilogram_per_cubic_meter>()
                * rock.specific_heat.get::<joule_per_kilogram_kelvin>();

        let extraction = flow * cw;
        let recharge =
            2.0 * std::f64::consts::PI * conductivity * length_m / ratio_far.ln();

        let initial_celsius = initial_temperature.get::<degree_celsius>();
        let injection_celsius = injection_temperature.get::<degree_celsius>();
        let steady_celsius = (extraction * injection_celsius + recharge * initial_celsius)
            / (extraction + recharge);

        let cylinder_volume =
            std::f64::consts::PI * radius_m * radius_m * length_m;
        let time_constant = rho_c_bulk * cylinder_volume / (extraction + recharge);

        Ok(Self {
            initial_celsius,
            steady_celsius,
            time_constant,
            volume: Volume::new::<cubic_meter>(cylinder_volume),
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
        let decay = (-seconds / self.time_constant).exp();
        Ok(ThermodynamicTemperature::new::<degree_celsius>(
            self.steady_celsius + (self.initial_celsius - self.steady_celsius) * decay,
        ))
    }

    /// The outlet temperature at age zero.
    #[must_use]
    pub fn initial_temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.initial_celsius)
    }

    /// Cylinder volume.
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

    fn model(advisories: &mut Vec<Advisory>) -> Cylindrical {
        Cylindrical::new(
            Length::new::<meter>(250.0),
            Length::new::<meter>(400.0),
            None,
            &RockProperties::granite(),
            ThermodynamicTemperature::new::<degree_celsius>(160.0),
            ThermodynamicTemperature::new::<degree_celsius>(70.0),
            MassRate::new::<kilogram_per_second>(30.0),
            advisories,
        )
        .unwrap()
    }

    #[test]
    fn starts_at_initial_and_relaxes_toward_steady_state() {
        let mut advisories = Vec::new();
        let model = model(&mut advisories);

        let t0 = model.temperature_at(Time::new::<year>(0.0)).unwrap();
        assert_relative_eq!(t0.get::<degree_celsius>(), 160.0);

        let t20 = model.temperature_at(Time::new::<year>(20.0)).unwrap();
        let t200 = model.temperature_at(Time::new::<year>(200.0)).unwrap();
        assert!(t20 < t0);
        assert!(t200 < t20);
        // Conduction recharge keeps the steady state above injection.
        assert!(t200.get::<degree_celsius>() > 70.0);
    }

    #[test]
    fn defaulted_far_field_ratio_is_advisory() {
        let mut advisories = Vec::new();
        let _ = model(&mut advisories);
        assert!(matches!(
            advisories.as_slice(),
            [Advisory::DefaultedFarFieldRatio { .. }]
        ));
    }

    #[test]
    fn rejects_degenerate_far_field_ratio() {
        let mut advisories = Vec::new();
        let result = Cylindrical::new(
            Length::new::<meter>(250.0),
            Length::new::<meter>(400.0),
            Some(1.0),
            &RockProperties::granite(),
            ThermodynamicTemperature::new::<degree_celsius>(160.0),
            ThermodynamicTemperature::new::<degree_celsius>(70.0),
            MassRate::new::<kilogram_per_second>(30.0),
            &mut advisories,
        );
        assert!(matches!(
            result,
            Err(ReservoirConfigError::Parameter { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let mut advisories = Vec::new();
        let result = Cylindrical::new(
            Length::new::<meter>(0.0),
            Length::new::<meter>(400.0),
            None,
            &RockProperties::granite(),
            ThermodynamicTemperature::new::<degree_celsius>(160.0),
            ThermodynamicTemperature::new::<degree_celsius>(70.0),
            MassRate::new::<kilogram_per_second>(30.0),
            &mut advisories,
        );
        assert!(matches!(result, Err(ReservoirConfigError::Geometry(_))));
    }
}
