//! Reservoir configuration and model construction.

use std::path::PathBuf;

use uom::si::{
    f64::{
        HeatTransfer, Length, MassDensity, MassRate, Ratio, SpecificHeatCapacity,
        ThermalConductivity, ThermodynamicTemperature, Time, Volume,
    },
    mass_density::kilogram_per_cubic_meter,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::diagnostics::Advisory;
use crate::support::constraint::{Constrained, StrictlyPositive, UnitInterval, UnitIntervalOpen};

use super::{
    Cylindrical, ExternalSimulator, LinearHeatSweep, ParallelFractures, PercentageDrawdown,
    ReservoirModel, SingleFracture, SlenderBody, ThermalStorage, UserProfile,
    error::ReservoirConfigError,
    external::ExternalHandoff,
    geometry::FractureGeometryInput,
};

/// Thermo-physical rock properties.
///
/// An explicit, immutable default set exists for granite-like basement rock;
/// merging it is the caller's visible choice, never a hidden global.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RockProperties {
    pub density: MassDensity,
    pub specific_heat: SpecificHeatCapacity,
    pub conductivity: ThermalConductivity,
    pub porosity: Constrained<Ratio, UnitInterval>,
}

impl RockProperties {
    /// Granite-like defaults: 2700 kg/m³, 1000 J/(kg·K), 3.0 W/(m·K), 4% porosity.
    #[must_use]
    pub fn granite() -> Self {
        Self {
            density: MassDensity::new::<kilogram_per_cubic_meter>(2700.0),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1000.0),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(3.0),
            porosity: UnitInterval::new(Ratio::new::<ratio>(0.04))
                .expect("0.04 lies inside the unit interval"),
        }
    }

    /// Thermal diffusivity `k / (ρ·c)` in m²/s.
    #[must_use]
    pub fn diffusivity(&self) -> f64 {
        self.conductivity.get::<watt_per_meter_kelvin>()
            / (self.density.get::<kilogram_per_cubic_meter>()
                * self.specific_heat.get::<joule_per_kilogram_kelvin>())
    }
}

/// Variant selector with the variant-specific parameters.
#[derive(Debug, Clone)]
pub enum ReservoirModelConfig {
    /// Gringarten-type multiple parallel fractures; requires geometry.
    ParallelFractures,

    /// Schumann-type porous sweep; requires geometry.
    LinearHeatSweep {
        /// Water-to-block film coefficient; defaulted with an advisory when absent.
        film_coefficient: Option<HeatTransfer>,
    },

    /// Single-fracture m/A drawdown; mass loading in kg/(s·m²).
    SingleFracture {
        mass_loading: Constrained<f64, StrictlyPositive>,
    },

    /// Linear percentage decline per year (fraction, e.g. 0.005).
    PercentageDrawdown {
        annual_rate: Constrained<f64, UnitIntervalOpen>,
    },

    /// Whitespace-delimited time/temperature table (years, °C).
    UserProfile { path: PathBuf, value_column: usize },

    /// Out-of-process simulator handoff.
    ExternalSimulator(ExternalHandoff),

    /// Lumped cylinder with conduction recharge.
    Cylindrical {
        radius: Length,
        length: Length,
        /// Far-field to reservoir radius ratio; defaulted with an advisory when absent.
        far_field_ratio: Option<f64>,
    },

    /// Transient line-source closed loop.
    SlenderBody {
        lateral_length: Length,
        borehole_radius: Length,
    },

    /// Cyclic reservoir thermal energy storage.
    ThermalStorage {
        ambient_temperature: ThermodynamicTemperature,
        recovery_factor: Constrained<f64, UnitIntervalOpen>,
        cycle_length: Time,
        stored_volume: Volume,
    },
}

impl ReservoirModelConfig {
    fn name(&self) -> &'static str {
        match self {
            Self::ParallelFractures => "parallel fractures",
            Self::LinearHeatSweep { .. } => "linear heat sweep",
            Self::SingleFracture { .. } => "single fracture (m/A)",
            Self::PercentageDrawdown { .. } => "percentage drawdown",
            Self::UserProfile { .. } => "user profile",
            Self::ExternalSimulator(_) => "external simulator",
            Self::Cylindrical { .. } => "cylindrical",
            Self::SlenderBody { .. } => "slender body",
            Self::ThermalStorage { .. } => "thermal storage",
        }
    }
}

/// Complete reservoir-side configuration.
///
/// Immutable once a run starts; [`ReservoirConfig::build`] validates it and
/// produces the model plus any advisories raised along the way.
#[derive(Debug, Clone)]
pub struct ReservoirConfig {
    /// Initial (bottom-hole) reservoir temperature; also the physical upper
    /// bound for every produced temperature.
    pub initial_temperature: ThermodynamicTemperature,
    /// Recharge/injection reference temperature seen by the drawdown models.
    pub injection_temperature: ThermodynamicTemperature,
    pub rock: RockProperties,
    /// Fracture geometry; required by fracture-based models, advisory
    /// elsewhere.
    pub geometry: Option<FractureGeometryInput>,
    pub model: ReservoirModelConfig,
}

impl ReservoirConfig {
    /// Validates this configuration and constructs the selected model.
    ///
    /// `total_flow` is the whole-field circulation rate (flow per production
    /// well times the number of production wells).
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirConfigError`] for incompatible model/parameter
    /// combinations, missing required parameters, or failed model
    /// construction (file reads, external runs).
    pub fn build(
        &self,
        total_flow: MassRate,
        advisories: &mut Vec<Advisory>,
    ) -> Result<ReservoirModel, ReservoirConfigError> {
        let model = match &self.model {
            ReservoirModelConfig::ParallelFractures => {
                let geometry = self.required_geometry()?;
                ReservoirModel::ParallelFractures(ParallelFractures::new(
                    &geometry,
                    &self.rock,
                    self.initial_temperature,
                    self.injection_temperature,
                    total_flow,
                )?)
            }
            ReservoirModelConfig::LinearHeatSweep { film_coefficient } => {
                let geometry = self.required_geometry()?;
                ReservoirModel::LinearHeatSweep(LinearHeatSweep::new(
                    &geometry,
                    &self.rock,
                    *film_coefficient,
                    self.initial_temperature,
                    self.injection_temperature,
                    total_flow,
                    advisories,
                )?)
            }
            ReservoirModelConfig::SingleFracture { mass_loading } => {
                self.warn_unused_geometry(advisories);
                ReservoirModel::SingleFracture(SingleFracture::new(
                    *mass_loading,
                    &self.rock,
                    self.initial_temperature,
                    self.injection_temperature,
                )?)
            }
            ReservoirModelConfig::PercentageDrawdown { annual_rate } => {
                self.warn_unused_geometry(advisories);
                ReservoirModel::PercentageDrawdown(PercentageDrawdown::new(
                    *annual_rate,
                    self.initial_temperature,
                ))
            }
            ReservoirModelConfig::UserProfile { path, value_column } => {
                self.warn_unused_geometry(advisories);
                ReservoirModel::UserProfile(UserProfile::from_file(
                    path,
                    *value_column,
                    self.initial_temperature,
                    advisories,
                )?)
            }
            ReservoirModelConfig::ExternalSimulator(handoff) => {
                self.warn_unused_geometry(advisories);
                ReservoirModel::ExternalSimulator(ExternalSimulator::run(
                    handoff,
                    self.initial_temperature,
                    advisories,
                )?)
            }
            ReservoirModelConfig::Cylindrical {
                radius,
                length,
                far_field_ratio,
            } => {
                self.warn_unused_geometry(advisories);
                ReservoirModel::Cylindrical(Cylindrical::new(
                    *radius,
                    *length,
                    *far_field_ratio,
                    &self.rock,
                    self.initial_temperature,
                    self.injection_temperature,
                    total_flow,
                    advisories,
                )?)
            }
            ReservoirModelConfig::SlenderBody {
                lateral_length,
                borehole_radius,
            } => {
                self.warn_unused_geometry(advisories);
                ReservoirModel::SlenderBody(SlenderBody::new(
                    *lateral_length,
                    *borehole_radius,
                    &self.rock,
                    self.initial_temperature,
                    self.injection_temperature,
                    total_flow,
                )?)
            }
            ReservoirModelConfig::ThermalStorage {
                ambient_temperature,
                recovery_factor,
                cycle_length,
                stored_volume,
            } => {
                self.warn_unused_geometry(advisories);
                ReservoirModel::ThermalStorage(ThermalStorage::new(
                    *ambient_temperature,
                    *recovery_factor,
                    *cycle_length,
                    *stored_volume,
                    &self.rock,
                    self.initial_temperature,
                    total_flow,
                )?)
            }
        };
        Ok(model)
    }

    fn required_geometry(
        &self,
    ) -> Result<super::geometry::FractureGeometry, ReservoirConfigError> {
        let input = self
            .geometry
            .as_ref()
            .ok_or(ReservoirConfigError::MissingGeometry {
                model: self.model.name(),
            })?;
        Ok(input.derive()?)
    }

    fn warn_unused_geometry(&self, advisories: &mut Vec<Advisory>) {
        if self.geometry.is_some() {
            let advisory = Advisory::UnusedGeometry {
                model: self.model.name(),
            };
            advisory.emit();
            advisories.push(advisory);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        length::meter, mass_rate::kilogram_per_second,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::models::reservoir::geometry::FractureShape;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    fn geometry() -> FractureGeometryInput {
        FractureGeometryInput {
            shape: FractureShape::Square {
                side: Length::new::<meter>(160.0),
            },
            fracture_count: Some(100),
            separation: Some(Length::new::<meter>(10.0)),
            volume: None,
        }
    }

    #[test]
    fn fracture_model_requires_geometry() {
        let config = ReservoirConfig {
            initial_temperature: celsius(188.0),
            injection_temperature: celsius(70.0),
            rock: RockProperties::granite(),
            geometry: None,
            model: ReservoirModelConfig::ParallelFractures,
        };

        let mut advisories = Vec::new();
        let result = config.build(
            MassRate::new::<kilogram_per_second>(41.0),
            &mut advisories,
        );
        assert!(matches!(
            result,
            Err(ReservoirConfigError::MissingGeometry { .. })
        ));
    }

    #[test]
    fn geometry_supplied_to_algebraic_model_is_advisory() {
        let config = ReservoirConfig {
            initial_temperature: celsius(145.0),
            injection_temperature: celsius(70.0),
            rock: RockProperties::granite(),
            geometry: Some(geometry()),
            model: ReservoirModelConfig::PercentageDrawdown {
                annual_rate: UnitIntervalOpen::new(0.005).unwrap(),
            },
        };

        let mut advisories = Vec::new();
        let model = config
            .build(
                MassRate::new::<kilogram_per_second>(41.0),
                &mut advisories,
            )
            .unwrap();

        assert!(matches!(model, ReservoirModel::PercentageDrawdown(_)));
        assert!(matches!(
            advisories.as_slice(),
            [Advisory::UnusedGeometry { .. }]
        ));
    }

    #[test]
    fn over_determined_geometry_is_rejected_at_build() {
        let mut over_determined = geometry();
        over_determined.volume = Some(Volume::new::<uom::si::volume::cubic_meter>(1.0e8));

        let config = ReservoirConfig {
            initial_temperature: celsius(188.0),
            injection_temperature: celsius(70.0),
            rock: RockProperties::granite(),
            geometry: Some(over_determined),
            model: ReservoirModelConfig::ParallelFractures,
        };

        let mut advisories = Vec::new();
        let result = config.build(
            MassRate::new::<kilogram_per_second>(41.0),
            &mut advisories,
        );
        assert!(matches!(result, Err(ReservoirConfigError::Geometry(_))));
    }

    #[test]
    fn granite_diffusivity_is_about_one_micro() {
        let rock = RockProperties::granite();
        approx::assert_relative_eq!(rock.diffusivity(), 1.111e-6, max_relative = 1e-3);
    }
}
