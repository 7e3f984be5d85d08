//! Wellbore configuration and model construction.

use uom::si::{
    f64::{Length, MassRate, Pressure, Ratio, TemperatureInterval, ThermodynamicTemperature},
    length::meter,
    mass_rate::kilogram_per_second,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::models::reservoir::RockProperties;
use crate::support::{
    constraint::{Constrained, StrictlyPositive, UnitIntervalLowerOpen},
    water,
};

use super::{
    WellboreModel,
    error::WellboreConfigError,
    friction::FrictionConfig,
    hydraulics::{Hydraulics, ReservoirHydraulics},
    transmission::{HeatTransmission, Ramey},
};

/// Well trajectory.
///
/// Deviated wells carry both the true vertical depth (hydrostatics) and the
/// measured depth (friction path); the transient Ramey mode is rejected for
/// them at configuration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WellPath {
    Vertical {
        depth: Length,
    },
    Deviated {
        true_vertical_depth: Length,
        measured_depth: Length,
    },
}

impl WellPath {
    /// True vertical depth.
    #[must_use]
    pub fn vertical_depth(&self) -> Length {
        match *self {
            Self::Vertical { depth } => depth,
            Self::Deviated {
                true_vertical_depth,
                ..
            } => true_vertical_depth,
        }
    }

    /// Along-hole flow-path length.
    #[must_use]
    pub fn measured_depth(&self) -> Length {
        match *self {
            Self::Vertical { depth } => depth,
            Self::Deviated { measured_depth, .. } => measured_depth,
        }
    }

    fn validate(&self) -> Result<(), WellboreConfigError> {
        let vertical = self.vertical_depth().get::<meter>();
        let measured = self.measured_depth().get::<meter>();
        if !(vertical > 0.0) {
            return Err(WellboreConfigError::NonPositive {
                name: "well depth",
            });
        }
        if measured < vertical {
            return Err(WellboreConfigError::MeasuredShorterThanVertical);
        }
        Ok(())
    }
}

/// Injection temperature specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InjectionTemperature {
    /// Fixed injection temperature.
    Constant(ThermodynamicTemperature),
    /// Fixed gain above the surface ambient temperature, resolved to a
    /// constant at validation time.
    GainAboveSurface(TemperatureInterval),
}

/// Heat transmission mode between reservoir outlet and wellhead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransmissionConfig {
    /// Ramey's transient line-source solution; vertical wells only.
    Ramey,
    /// Fixed temperature drop; always valid.
    ConstantDrop(TemperatureInterval),
}

/// Reservoir hydraulic specification.
#[derive(Debug, Clone, Copy)]
pub enum HydraulicsConfig {
    /// Lumped impedance in Pa·s/m³.
    Impedance {
        impedance: Constrained<f64, StrictlyPositive>,
    },
    /// Productivity and injectivity indices in kg/(s·Pa), evaluated per well
    /// with no closed-loop communication assumed.
    Indices {
        productivity: Constrained<f64, StrictlyPositive>,
        injectivity: Constrained<f64, StrictlyPositive>,
    },
}

/// Complete wellbore-side configuration. Immutable once a run starts.
#[derive(Debug, Clone)]
pub struct WellboreConfig {
    pub production_wells: u32,
    pub injection_wells: u32,
    pub production_diameter: Length,
    pub injection_diameter: Length,
    pub path: WellPath,
    pub flow_per_production_well: MassRate,
    /// Absolute casing roughness.
    pub roughness: Length,
    pub surface_temperature: ThermodynamicTemperature,
    /// Geothermal gradient in K/m, used by the Ramey mode.
    pub geothermal_gradient: Constrained<f64, StrictlyPositive>,
    pub injection_temperature: InjectionTemperature,
    pub transmission: TransmissionConfig,
    pub hydraulics: HydraulicsConfig,
    /// Fraction of the year the plant produces.
    pub utilization: Constrained<Ratio, UnitIntervalLowerOpen>,
    pub pump_efficiency: Constrained<Ratio, UnitIntervalLowerOpen>,
    /// Production wellhead pressure.
    pub wellhead_pressure: Pressure,
    /// Net positive suction head margin for the cavitation check.
    pub npsh_margin: Pressure,
    pub friction: FrictionConfig,
}

impl WellboreConfig {
    /// The injection temperature resolved to a constant.
    #[must_use]
    pub fn resolved_injection_temperature(&self) -> ThermodynamicTemperature {
        match self.injection_temperature {
            InjectionTemperature::Constant(temperature) => temperature,
            InjectionTemperature::GainAboveSurface(gain) => {
                ThermodynamicTemperature::new::<degree_celsius>(
                    self.surface_temperature.get::<degree_celsius>()
                        + gain.get::<delta_kelvin>(),
                )
            }
        }
    }

    /// Whole-field circulation rate.
    #[must_use]
    pub fn total_flow(&self) -> MassRate {
        f64::from(self.production_wells) * self.flow_per_production_well
    }

    /// Validates this configuration and constructs the wellbore model.
    ///
    /// Rock properties supply the thermal diffusivity and conductivity the
    /// Ramey mode needs; `mean_loop_temperature` fixes where the circulating
    /// water's heat capacity is evaluated.
    ///
    /// # Errors
    ///
    /// Returns a [`WellboreConfigError`] for incompatible combinations
    /// (deviated path with Ramey mode) or invalid dimensions.
    pub fn build(
        &self,
        rock: &RockProperties,
        mean_loop_temperature: ThermodynamicTemperature,
    ) -> Result<WellboreModel, WellboreConfigError> {
        self.path.validate()?;
        if self.production_wells == 0 {
            return Err(WellboreConfigError::NoWells { kind: "production" });
        }
        if self.injection_wells == 0 {
            return Err(WellboreConfigError::NoWells { kind: "injection" });
        }

        let positive = |value: f64, name: &'static str| {
            if value > 0.0 {
                Ok(value)
            } else {
                Err(WellboreConfigError::NonPositive { name })
            }
        };
        let production_diameter = positive(
            self.production_diameter.get::<meter>(),
            "production casing diameter",
        )?;
        let injection_diameter = positive(
            self.injection_diameter.get::<meter>(),
            "injection casing diameter",
        )?;
        let flow = positive(
            self.flow_per_production_well.get::<kilogram_per_second>(),
            "flow rate per production well",
        )?;
        let roughness = self.roughness.get::<meter>();
        if !(roughness >= 0.0) {
            return Err(WellboreConfigError::NonPositive {
                name: "casing roughness",
            });
        }

        let cw = water::specific_heat(mean_loop_temperature)
            .get::<joule_per_kilogram_kelvin>();

        let transmission = match self.transmission {
            TransmissionConfig::ConstantDrop(drop) => HeatTransmission::ConstantDrop {
                drop_kelvin: drop.get::<delta_kelvin>(),
            },
            TransmissionConfig::Ramey => {
                if !matches!(self.path, WellPath::Vertical { .. }) {
                    return Err(WellboreConfigError::RameyRequiresVertical);
                }
                HeatTransmission::Ramey(Ramey {
                    gradient: *self.geothermal_gradient.as_ref(),
                    depth: self.path.vertical_depth().get::<meter>(),
                    radius: 0.5 * production_diameter,
                    diffusivity: rock.diffusivity(),
                    conductivity: rock
                        .conductivity
                        .get::<uom::si::thermal_conductivity::watt_per_meter_kelvin>(),
                    utilization: self.utilization.as_ref().get::<ratio>(),
                    capacitance_rate: flow * cw,
                })
            }
        };

        let reservoir = match self.hydraulics {
            HydraulicsConfig::Impedance { impedance } => ReservoirHydraulics::Impedance {
                impedance: impedance.into_inner(),
            },
            HydraulicsConfig::Indices {
                productivity,
                injectivity,
            } => ReservoirHydraulics::Indices {
                productivity: productivity.into_inner(),
                injectivity: injectivity.into_inner(),
            },
        };

        let hydraulics = Hydraulics {
            production_wells: f64::from(self.production_wells),
            injection_wells: f64::from(self.injection_wells),
            flow_per_production_well: flow,
            production_diameter,
            injection_diameter,
            measured_length: self.path.measured_depth().get::<meter>(),
            vertical_depth: self.path.vertical_depth().get::<meter>(),
            roughness,
            reservoir,
            friction: self.friction,
            pump_efficiency: self.pump_efficiency.as_ref().get::<ratio>(),
            wellhead_pressure: self.wellhead_pressure.get::<pascal>(),
            npsh_margin: self.npsh_margin.get::<pascal>(),
        };

        Ok(WellboreModel::from_parts(
            transmission,
            hydraulics,
            self.resolved_injection_temperature(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::ratio::ratio;

    fn base_config() -> WellboreConfig {
        WellboreConfig {
            production_wells: 1,
            injection_wells: 1,
            production_diameter: Length::new::<meter>(0.2),
            injection_diameter: Length::new::<meter>(0.2),
            path: WellPath::Vertical {
                depth: Length::new::<meter>(3000.0),
            },
            flow_per_production_well: MassRate::new::<kilogram_per_second>(41.0),
            roughness: Length::new::<meter>(5.0e-5),
            surface_temperature: ThermodynamicTemperature::new::<degree_celsius>(20.0),
            geothermal_gradient: StrictlyPositive::new(0.056).unwrap(),
            injection_temperature: InjectionTemperature::Constant(
                ThermodynamicTemperature::new::<degree_celsius>(70.0),
            ),
            transmission: TransmissionConfig::Ramey,
            hydraulics: HydraulicsConfig::Impedance {
                impedance: StrictlyPositive::new(1.0e8).unwrap(),
            },
            utilization: UnitIntervalLowerOpen::new(Ratio::new::<ratio>(1.0)).unwrap(),
            pump_efficiency: UnitIntervalLowerOpen::new(Ratio::new::<ratio>(0.75)).unwrap(),
            wellhead_pressure: Pressure::new::<pascal>(200_000.0),
            npsh_margin: Pressure::new::<pascal>(50_000.0),
            friction: FrictionConfig::default(),
        }
    }

    #[test]
    fn ramey_rejects_deviated_wells() {
        let mut config = base_config();
        config.path = WellPath::Deviated {
            true_vertical_depth: Length::new::<meter>(3000.0),
            measured_depth: Length::new::<meter>(4200.0),
        };

        let mean = ThermodynamicTemperature::new::<degree_celsius>(120.0);
        let result = config.build(&RockProperties::granite(), mean);
        assert!(matches!(
            result,
            Err(WellboreConfigError::RameyRequiresVertical)
        ));
    }

    #[test]
    fn constant_drop_accepts_deviated_wells() {
        let mut config = base_config();
        config.path = WellPath::Deviated {
            true_vertical_depth: Length::new::<meter>(3000.0),
            measured_depth: Length::new::<meter>(4200.0),
        };
        config.transmission =
            TransmissionConfig::ConstantDrop(TemperatureInterval::new::<delta_kelvin>(4.0));

        let mean = ThermodynamicTemperature::new::<degree_celsius>(120.0);
        assert!(config.build(&RockProperties::granite(), mean).is_ok());
    }

    #[test]
    fn measured_depth_must_cover_vertical_depth() {
        let mut config = base_config();
        config.path = WellPath::Deviated {
            true_vertical_depth: Length::new::<meter>(3000.0),
            measured_depth: Length::new::<meter>(2500.0),
        };
        config.transmission =
            TransmissionConfig::ConstantDrop(TemperatureInterval::new::<delta_kelvin>(4.0));

        let mean = ThermodynamicTemperature::new::<degree_celsius>(120.0);
        assert!(matches!(
            config.build(&RockProperties::granite(), mean),
            Err(WellboreConfigError::MeasuredShorterThanVertical)
        ));
    }

    #[test]
    fn gain_mode_resolves_against_surface_temperature() {
        let mut config = base_config();
        config.injection_temperature =
            InjectionTemperature::GainAboveSurface(TemperatureInterval::new::<delta_kelvin>(
                50.0,
            ));

        assert_relative_eq!(
            config
                .resolved_injection_temperature()
                .get::<degree_celsius>(),
            70.0
        );
    }

    #[test]
    fn total_flow_counts_production_wells() {
        let mut config = base_config();
        config.production_wells = 3;
        assert_relative_eq!(
            config.total_flow().get::<kilogram_per_second>(),
            123.0
        );
    }

    #[test]
    fn zero_wells_is_rejected() {
        let mut config = base_config();
        config.injection_wells = 0;
        let mean = ThermodynamicTemperature::new::<degree_celsius>(120.0);
        assert!(matches!(
            config.build(&RockProperties::granite(), mean),
            Err(WellboreConfigError::NoWells { kind: "injection" })
        ));
    }
}
