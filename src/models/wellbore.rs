//! Wellbore heat-loss and pressure model.
//!
//! Maps the reservoir outlet temperature to the produced wellhead
//! temperature (transient Ramey or constant-drop transmission) and computes
//! the pressure-drop breakdown, pumping power, and pump setting depth for
//! the well field at each step.
//!
//! The model assumes incompressible single-phase liquid water with
//! properties from [`crate::support::water`]. Construct through
//! [`WellboreConfig::build`].

mod config;
mod error;
mod hydraulics;
mod transmission;

pub mod friction;

pub use config::{
    HydraulicsConfig, InjectionTemperature, TransmissionConfig, WellPath, WellboreConfig,
};
pub use error::{WellboreConfigError, WellboreError};
pub use hydraulics::{HydraulicsOutput, PUMP_DEPTH_GUIDELINE_M, PressureBreakdown};

use twine_core::Model;
use uom::si::f64::{Length, Power, ThermodynamicTemperature, Time, TemperatureInterval};
use uom::si::time::second;

use hydraulics::Hydraulics;
use transmission::HeatTransmission;

/// A validated wellbore model.
#[derive(Debug, Clone)]
pub struct WellboreModel {
    transmission: HeatTransmission,
    hydraulics: Hydraulics,
    injection_temperature: ThermodynamicTemperature,
}

/// Per-step wellbore inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WellboreInput {
    /// Reservoir outlet temperature at the current reservoir age.
    pub reservoir_temperature: ThermodynamicTemperature,
    /// Cumulative producing time since the project started (never reset by
    /// redrilling).
    pub producing_time: Time,
}

/// Per-step wellbore results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WellboreOutput {
    /// Produced temperature at the wellhead.
    pub wellhead_temperature: ThermodynamicTemperature,
    /// Heat loss between reservoir outlet and wellhead.
    pub transmission_drop: TemperatureInterval,
    pub pressure: PressureBreakdown,
    pub pump_power: Power,
    pub pump_depth: Length,
}

impl WellboreModel {
    pub(crate) fn from_parts(
        transmission: HeatTransmission,
        hydraulics: Hydraulics,
        injection_temperature: ThermodynamicTemperature,
    ) -> Self {
        Self {
            transmission,
            hydraulics,
            injection_temperature,
        }
    }

    /// Evaluates heat transmission and hydraulics for one step.
    ///
    /// # Errors
    ///
    /// Returns a [`WellboreError`] if the friction solve fails.
    pub fn produce(&self, input: WellboreInput) -> Result<WellboreOutput, WellboreError> {
        let producing_seconds = input.producing_time.get::<second>();
        let wellhead_temperature = self
            .transmission
            .wellhead_temperature(input.reservoir_temperature, producing_seconds);
        let transmission_drop = self.transmission.temperature_drop(producing_seconds);

        let hydraulics = self
            .hydraulics
            .evaluate(wellhead_temperature, self.injection_temperature)?;

        Ok(WellboreOutput {
            wellhead_temperature,
            transmission_drop,
            pressure: hydraulics.pressure,
            pump_power: hydraulics.pump_power,
            pump_depth: hydraulics.pump_depth,
        })
    }

    /// The constant injection temperature the loop runs against.
    #[must_use]
    pub fn injection_temperature(&self) -> ThermodynamicTemperature {
        self.injection_temperature
    }
}

/// Thin adapter exposing the wellbore as a callable model.
impl Model for WellboreModel {
    type Input = WellboreInput;
    type Output = WellboreOutput;
    type Error = WellboreError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.produce(*input)
    }
}
