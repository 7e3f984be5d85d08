//! Well-field hydraulics: pressure-drop components, pumping power, and the
//! pump setting depth.
//!
//! The pump pressure is assembled from three components:
//!
//! 1. **Friction** per production and injection well via Darcy–Weisbach,
//!    with the friction factor from [`super::friction`].
//! 2. **Buoyancy**: the density difference between the cold injection column
//!    and the hot production column offsets part of the lift.
//! 3. **Reservoir**: either a lumped impedance relating volumetric rate to
//!    pressure drop, or independent productivity/injectivity indices with no
//!    closed-loop hydraulic communication assumed between the well sets.
//!
//! The pump setting depth is where the column pressure clears the water
//! vapor pressure plus an NPSH margin; beyond 600 m a line-shaft pump is
//! outside its guideline and the caller raises an advisory.

use uom::si::{
    f64::{Length, Power, Pressure, ThermodynamicTemperature},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    dynamic_viscosity::pascal_second,
    power::watt,
    pressure::pascal,
};

use crate::support::water;

use super::{
    error::WellboreError,
    friction::{FrictionConfig, friction_factor},
};

/// Standard gravity, m/s².
const GRAVITY: f64 = 9.80665;

/// Line-shaft pump setting-depth guideline, m.
pub const PUMP_DEPTH_GUIDELINE_M: f64 = 600.0;

/// Pressure-drop components for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureBreakdown {
    /// Frictional drop across one production well.
    pub production_friction: Pressure,
    /// Frictional drop across one injection well.
    pub injection_friction: Pressure,
    /// Buoyancy assist from the injection/production density contrast.
    pub buoyancy: Pressure,
    /// Reservoir drop from impedance or productivity/injectivity indices.
    pub reservoir: Pressure,
}

impl PressureBreakdown {
    /// Net pressure the pumps must supply; negative values mean artesian
    /// (self-flowing) conditions.
    #[must_use]
    pub fn pump(&self) -> Pressure {
        self.production_friction + self.injection_friction + self.reservoir - self.buoyancy
    }
}

/// Reservoir hydraulic description.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ReservoirHydraulics {
    /// Lumped impedance, Pa·s/m³ of volumetric rate.
    Impedance { impedance: f64 },
    /// Independent well indices, kg/(s·Pa) per well.
    Indices { productivity: f64, injectivity: f64 },
}

/// Precomputed hydraulic inputs for the well field.
#[derive(Debug, Clone)]
pub(crate) struct Hydraulics {
    pub production_wells: f64,
    pub injection_wells: f64,
    /// Mass flow per production well, kg/s.
    pub flow_per_production_well: f64,
    /// Production/injection casing inner diameters, m.
    pub production_diameter: f64,
    pub injection_diameter: f64,
    /// Flow-path length per well (measured depth), m.
    pub measured_length: f64,
    /// True vertical depth, m.
    pub vertical_depth: f64,
    /// Absolute surface roughness, m.
    pub roughness: f64,
    pub reservoir: ReservoirHydraulics,
    pub friction: FrictionConfig,
    /// Pump drive efficiency.
    pub pump_efficiency: f64,
    /// Production wellhead pressure, Pa.
    pub wellhead_pressure: f64,
    /// Net positive suction head margin, Pa.
    pub npsh_margin: f64,
}

/// Hydraulic results for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydraulicsOutput {
    pub pressure: PressureBreakdown,
    pub pump_power: Power,
    pub pump_depth: Length,
}

impl Hydraulics {
    /// Evaluates the field hydraulics at the given column temperatures.
    ///
    /// # Errors
    ///
    /// Returns a [`WellboreError`] if a friction solve fails.
    pub(crate) fn evaluate(
        &self,
        production_temperature: ThermodynamicTemperature,
        injection_temperature: ThermodynamicTemperature,
    ) -> Result<HydraulicsOutput, WellboreError> {
        let rho_production = water::density(production_temperature)
            .get::<kilogram_per_cubic_meter>();
        let rho_injection =
            water::density(injection_temperature).get::<kilogram_per_cubic_meter>();

        let total_flow = self.flow_per_production_well * self.production_wells;
        let flow_per_injection_well = total_flow / self.injection_wells;

        let production_friction = self.well_friction(
            self.flow_per_production_well,
            self.production_diameter,
            production_temperature,
        )?;
        let injection_friction = self.well_friction(
            flow_per_injection_well,
            self.injection_diameter,
            injection_temperature,
        )?;

        let buoyancy =
            (rho_injection - rho_production) * GRAVITY * self.vertical_depth;

        let reservoir = match self.reservoir {
            ReservoirHydraulics::Impedance { impedance } => {
                // Volumetric rate at the mean of the two column densities.
                let rho_mean = 0.5 * (rho_production + rho_injection);
                impedance * total_flow / rho_mean
            }
            ReservoirHydraulics::Indices {
                productivity,
                injectivity,
            } => {
                self.flow_per_production_well / productivity
                    + flow_per_injection_well / injectivity
            }
        };

        let pressure = PressureBreakdown {
            production_friction: Pressure::new::<pascal>(production_friction.drop),
            injection_friction: Pressure::new::<pascal>(injection_friction.drop),
            buoyancy: Pressure::new::<pascal>(buoyancy),
            reservoir: Pressure::new::<pascal>(reservoir),
        };

        let pump_pascal = pressure.pump().get::<pascal>().max(0.0);
        let volumetric_rate = total_flow / rho_production;
        let pump_power =
            Power::new::<watt>(pump_pascal * volumetric_rate / self.pump_efficiency);

        let pump_depth = self.pump_depth(
            production_temperature,
            rho_production,
            production_friction.gradient,
        );

        Ok(HydraulicsOutput {
            pressure,
            pump_power,
            pump_depth,
        })
    }

    fn well_friction(
        &self,
        mass_flow: f64,
        diameter: f64,
        temperature: ThermodynamicTemperature,
    ) -> Result<WellFriction, WellboreError> {
        let rho = water::density(temperature).get::<kilogram_per_cubic_meter>();
        let mu = water::viscosity(temperature).get::<pascal_second>();

        let area = 0.25 * std::f64::consts::PI * diameter * diameter;
        let velocity = mass_flow / (rho * area);
        let reynolds = rho * velocity * diameter / mu;
        let factor = friction_factor(reynolds, self.roughness / diameter, &self.friction)?;

        // Pa per meter of pipe, and the full measured-length drop.
        let gradient = factor * 0.5 * rho * velocity * velocity / diameter;
        Ok(WellFriction {
            drop: gradient * self.measured_length,
            gradient,
        })
    }

    /// Pump setting depth required to keep the suction above the vapor
    /// pressure plus the NPSH margin.
    fn pump_depth(
        &self,
        production_temperature: ThermodynamicTemperature,
        rho_production: f64,
        friction_gradient: f64,
    ) -> Length {
        let vapor = water::vapor_pressure(production_temperature).get::<pascal>();
        let required = vapor + self.npsh_margin - self.wellhead_pressure;
        if required <= 0.0 {
            return Length::new::<meter>(0.0);
        }

        let static_gradient = rho_production * GRAVITY - friction_gradient;
        Length::new::<meter>(required / static_gradient)
    }
}

struct WellFriction {
    /// Full-length frictional drop, Pa.
    drop: f64,
    /// Drop per meter, Pa/m.
    gradient: f64,
}
