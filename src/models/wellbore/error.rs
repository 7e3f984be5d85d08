//! Error types for the wellbore model.

use thiserror::Error;

use super::friction::FrictionError;

/// Errors detected while validating a wellbore configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WellboreConfigError {
    /// Ramey's transient solution assumes a vertical well.
    #[error(
        "transient (Ramey) heat transmission is not valid for deviated wells; use a constant drop"
    )]
    RameyRequiresVertical,

    /// Well counts must be at least one on each side of the loop.
    #[error("at least one {kind} well is required")]
    NoWells { kind: &'static str },

    /// A dimension or rate must be strictly positive.
    #[error("{name} must be strictly positive")]
    NonPositive { name: &'static str },

    /// A deviated well cannot have a measured depth shorter than its
    /// true vertical depth.
    #[error("measured depth must be at least the true vertical depth")]
    MeasuredShorterThanVertical,
}

/// Errors from evaluating the wellbore model during a run.
#[derive(Debug, Error)]
pub enum WellboreError {
    /// The friction-factor solve failed.
    #[error("friction factor computation failed")]
    Friction(#[from] FrictionError),
}
