//! Advisory diagnostics surfaced during validation and simulation.
//!
//! Advisories are conditions worth telling the user about that do not stop a
//! run: defaulted reservoir properties, parameters a model ignores, or the
//! pump-depth guideline. They are returned as typed values from validation
//! and also emitted through [`tracing`] so subscribers see them without
//! plumbing.
//!
//! Hard failures never travel this path; they are typed errors on the
//! operation that detected them.

use std::fmt;

use uom::si::{
    f64::{HeatTransfer, Length, ThermodynamicTemperature},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    thermodynamic_temperature::degree_celsius,
};

/// A non-fatal warning surfaced to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// A rock-block film coefficient was not supplied; the documented default
    /// was merged in.
    DefaultedFilmCoefficient { value: HeatTransfer },

    /// A cylindrical far-field radius ratio was not supplied; the documented
    /// default was merged in.
    DefaultedFarFieldRatio { value: f64 },

    /// Fracture geometry was supplied to a reservoir model that ignores it.
    UnusedGeometry { model: &'static str },

    /// The configured initial temperature disagrees with the first entry of
    /// a supplied temperature profile.
    ProfileInitialMismatch {
        configured: ThermodynamicTemperature,
        table: ThermodynamicTemperature,
    },

    /// The computed pump setting depth exceeds the line-shaft guideline.
    PumpDepthExceedsGuideline { depth: Length, guideline: Length },
}

impl Advisory {
    /// Emits this advisory as a `tracing` warning.
    pub fn emit(&self) {
        tracing::warn!(advisory = %self);
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultedFilmCoefficient { value } => write!(
                f,
                "rock-block film coefficient defaulted to {:.0} W/(m²·K)",
                value.get::<watt_per_square_meter_kelvin>()
            ),
            Self::DefaultedFarFieldRatio { value } => {
                write!(f, "cylindrical far-field radius ratio defaulted to {value}")
            }
            Self::UnusedGeometry { model } => {
                write!(f, "fracture geometry is ignored by the {model} model")
            }
            Self::ProfileInitialMismatch { configured, table } => write!(
                f,
                "configured initial temperature {:.1} °C differs from the profile's first entry {:.1} °C",
                configured.get::<degree_celsius>(),
                table.get::<degree_celsius>()
            ),
            Self::PumpDepthExceedsGuideline { depth, guideline } => write!(
                f,
                "pump setting depth {:.0} m exceeds the {:.0} m line-shaft guideline",
                depth.get::<meter>(),
                guideline.get::<meter>()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_human_readable() {
        let advisory = Advisory::PumpDepthExceedsGuideline {
            depth: Length::new::<meter>(715.0),
            guideline: Length::new::<meter>(600.0),
        };
        assert_eq!(
            advisory.to_string(),
            "pump setting depth 715 m exceeds the 600 m line-shaft guideline"
        );
    }
}
