//! Production profile: the run's output contract.
//!
//! An append-only sequence of per-step records plus annualized aggregates.
//! This is the sole data handed to surface-plant and economics consumers; it
//! is returned by value from a fully successful run and read-only from then
//! on.

use uom::si::{
    f64::{Energy, Length, Power, Ratio, ThermodynamicTemperature, Time},
    thermodynamic_temperature::degree_celsius,
};

use crate::diagnostics::Advisory;
use crate::models::wellbore::PressureBreakdown;

/// One simulation step's results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    /// Project-elapsed time at the end of this step; never reset.
    pub elapsed: Time,
    /// Reservoir age at the end of this step; resets on redrilling.
    pub reservoir_age: Time,
    /// Reservoir outlet temperature.
    pub reservoir_temperature: ThermodynamicTemperature,
    /// Produced temperature at the wellhead.
    pub wellhead_temperature: ThermodynamicTemperature,
    /// Pressure-drop components.
    pub pressure: PressureBreakdown,
    /// Pump power for the whole field.
    pub pump_power: Power,
    /// Required pump setting depth.
    pub pump_depth: Length,
}

/// Aggregates for one calendar year (the final year may be partial).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualSummary {
    /// One-based calendar year.
    pub year: u32,
    /// Heat extracted from the reservoir over the year, adjusted for
    /// utilization.
    pub heat_extracted: Energy,
    /// Mean wellhead temperature over the year's steps.
    pub average_wellhead_temperature: ThermodynamicTemperature,
}

/// Ordered per-step records plus end-of-run aggregates.
#[derive(Debug, Clone)]
pub struct ProductionProfile {
    steps: Vec<StepRecord>,
    /// Redrills performed during the run.
    pub redrill_count: u32,
    /// Per-year aggregates, in order.
    pub annual: Vec<AnnualSummary>,
    /// Fraction of the in-place heat mined over the run, when the reservoir
    /// volume is known.
    pub heat_mined_fraction: Option<Ratio>,
    /// Advisories raised while stepping (e.g. pump depth guideline).
    pub advisories: Vec<Advisory>,
}

impl ProductionProfile {
    pub(crate) fn new() -> Self {
        Self {
            steps: Vec::new(),
            redrill_count: 0,
            annual: Vec::new(),
            heat_mined_fraction: None,
            advisories: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: StepRecord) {
        self.steps.push(record);
    }

    /// The per-step records, in step order.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Mean wellhead temperature over the whole run.
    #[must_use]
    pub fn average_wellhead_temperature(&self) -> Option<ThermodynamicTemperature> {
        if self.steps.is_empty() {
            return None;
        }
        let sum: f64 = self
            .steps
            .iter()
            .map(|record| record.wellhead_temperature.get::<degree_celsius>())
            .sum();
        Some(ThermodynamicTemperature::new::<degree_celsius>(
            sum / self.steps.len() as f64,
        ))
    }

    /// Lowest wellhead temperature over the whole run.
    #[must_use]
    pub fn minimum_wellhead_temperature(&self) -> Option<ThermodynamicTemperature> {
        self.steps
            .iter()
            .map(|record| record.wellhead_temperature)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}
