//! Run-boundary error types.
//!
//! Errors are detected component-locally and bubble here untouched: a run
//! either fully succeeds with a complete profile or fully fails with one of
//! these, never returning a partial or corrupted profile.

use thiserror::Error;
use uom::si::f64::ThermodynamicTemperature;

use crate::models::reservoir::{ReservoirConfigError, ReservoirError};
use crate::models::wellbore::{WellboreConfigError, WellboreError};

use super::clock::ScheduleError;

/// Errors detected before a run starts.
#[derive(Debug, Error)]
pub enum FieldConfigError {
    #[error("invalid reservoir configuration")]
    Reservoir(#[from] ReservoirConfigError),

    #[error("invalid wellbore configuration")]
    Wellbore(#[from] WellboreConfigError),

    #[error("invalid schedule")]
    Schedule(#[from] ScheduleError),
}

/// Fatal conditions during a run, identified by the failing step.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The reservoir model failed.
    #[error("reservoir model failed at step {step}")]
    Reservoir {
        step: usize,
        #[source]
        source: ReservoirError,
    },

    /// The wellbore model failed.
    #[error("wellbore model failed at step {step}")]
    Wellbore {
        step: usize,
        #[source]
        source: WellboreError,
    },

    /// A produced temperature exceeded the configured maximum. This
    /// indicates bad input or a modeling defect, not a recoverable runtime
    /// condition.
    #[error("temperature {temperature:?} exceeds the maximum {maximum:?} at step {step}")]
    TemperatureBound {
        step: usize,
        temperature: ThermodynamicTemperature,
        maximum: ThermodynamicTemperature,
    },
}
