//! Error types for the reservoir model family.

use std::path::PathBuf;

use thiserror::Error;
use uom::si::f64::ThermodynamicTemperature;

use crate::support::{
    constraint::ConstraintError, interpolate::TableError, laplace::LaplaceError,
};

use super::geometry::GeometryError;

/// Errors detected while validating a reservoir configuration.
///
/// All of these abort before a simulation starts.
#[derive(Debug, Error)]
pub enum ReservoirConfigError {
    /// Geometry derivation failed.
    #[error("invalid fracture geometry")]
    Geometry(#[from] GeometryError),

    /// The selected model needs fracture geometry and none was supplied.
    #[error("the {model} model requires fracture geometry")]
    MissingGeometry { model: &'static str },

    /// Drawdown models need a positive temperature difference to work with.
    #[error(
        "injection temperature {injection:?} must be below the initial reservoir temperature {initial:?}"
    )]
    InjectionNotBelowInitial {
        injection: ThermodynamicTemperature,
        initial: ThermodynamicTemperature,
    },

    /// Storage models need the ambient temperature below the stored one.
    #[error(
        "ambient aquifer temperature {ambient:?} must be below the stored temperature {stored:?}"
    )]
    AmbientNotBelowStored {
        ambient: ThermodynamicTemperature,
        stored: ThermodynamicTemperature,
    },

    /// The well field must circulate a positive flow.
    #[error("total circulation flow must be strictly positive")]
    NonPositiveFlow,

    /// A scalar parameter violated its constraint.
    #[error("invalid {parameter}")]
    Parameter {
        parameter: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// A temperature profile file could not be read.
    #[error("cannot read temperature profile {path}")]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A temperature profile or simulator output table is malformed.
    #[error("invalid temperature table")]
    Table(#[from] TableError),

    /// The external simulator executable does not exist.
    #[error("external simulator executable {path} not found")]
    MissingExecutable { path: PathBuf },

    /// The external simulator could not be launched.
    #[error("failed to launch external simulator {path}")]
    SimulatorLaunch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external simulator exited unsuccessfully.
    #[error("external simulator {path} exited with status {code:?}")]
    SimulatorExit { path: PathBuf, code: Option<i32> },
}

/// Errors from querying a constructed reservoir model.
///
/// These indicate configuration or numerical-method defects and are fatal
/// for the run that encounters them.
#[derive(Debug, Error)]
pub enum ReservoirError {
    /// Reservoir age must be a finite, non-negative time.
    #[error("reservoir age must be finite and non-negative, got {age_seconds} s")]
    InvalidAge { age_seconds: f64 },

    /// Numerical Laplace inversion failed.
    #[error("Laplace inversion failed")]
    Laplace(#[from] LaplaceError),

    /// A table-backed model was queried outside its supplied domain.
    #[error("temperature table lookup failed")]
    Table(#[from] TableError),
}
