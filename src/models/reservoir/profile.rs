//! User-provided temperature profile model.
//!
//! Interpolates a whitespace-delimited time/temperature table supplied by the
//! user: column 0 is time in years, the configured value column (commonly 1)
//! is the outlet temperature in °C, and extra channels are ignored. The table
//! is read once at configuration time.
//!
//! Queries are exact at the supplied knots and linear between them. Queries
//! outside the supplied domain are an error; silent edge extrapolation can
//! produce wildly implausible temperatures and is deliberately unsupported.

use std::path::{Path, PathBuf};

use uom::si::{
    f64::{ThermodynamicTemperature, Time},
    thermodynamic_temperature::degree_celsius,
    time::year,
};

use crate::diagnostics::Advisory;
use crate::support::interpolate::TimeTable;

use super::{
    checked_age,
    error::{ReservoirConfigError, ReservoirError},
};

/// How far the configured initial temperature may drift from the table's
/// first entry before an advisory is raised.
const INITIAL_MISMATCH_TOLERANCE: f64 = 0.5; // K

/// Interpolated user-supplied temperature profile.
#[derive(Debug, Clone)]
pub struct UserProfile {
    table: TimeTable,
    initial_celsius: f64,
}

impl UserProfile {
    /// Reads and validates the profile file.
    ///
    /// An advisory is raised when the configured initial temperature
    /// disagrees with the table's first entry; the table wins.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirConfigError`] if the file cannot be read or the
    /// table is malformed.
    pub fn from_file(
        path: &Path,
        value_column: usize,
        configured_initial: ThermodynamicTemperature,
        advisories: &mut Vec<Advisory>,
    ) -> Result<Self, ReservoirConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            ReservoirConfigError::ProfileRead {
                path: PathBuf::from(path),
                source,
            }
        })?;
        let table = TimeTable::parse_columns(&text, value_column)?;
        Self::from_table(table, configured_initial, advisories)
    }

    /// Builds the model from an already-parsed table.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirConfigError`] if the table cannot be sampled at
    /// its own start.
    pub fn from_table(
        table: TimeTable,
        configured_initial: ThermodynamicTemperature,
        advisories: &mut Vec<Advisory>,
    ) -> Result<Self, ReservoirConfigError> {
        let initial_celsius = table.sample(table.start())?;

        let configured_celsius = configured_initial.get::<degree_celsius>();
        if (configured_celsius - initial_celsius).abs() > INITIAL_MISMATCH_TOLERANCE {
            let advisory = Advisory::ProfileInitialMismatch {
                configured: configured_initial,
                table: ThermodynamicTemperature::new::<degree_celsius>(initial_celsius),
            };
            advisory.emit();
            advisories.push(advisory);
        }

        Ok(Self {
            table,
            initial_celsius,
        })
    }

    /// Reservoir outlet temperature after `age` of production.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirError`] for invalid ages or queries outside the
    /// supplied table domain.
    pub fn temperature_at(
        &self,
        age: Time,
    ) -> Result<ThermodynamicTemperature, ReservoirError> {
        checked_age(age)?;
        let value = self.table.sample(age.get::<year>())?;
        Ok(ThermodynamicTemperature::new::<degree_celsius>(value))
    }

    /// The table's first entry, which serves as the initial temperature.
    #[must_use]
    pub fn initial_temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.initial_celsius)
    }
}
