//! External-simulator adapter.
//!
//! Delegates the reservoir response to an out-of-process subsurface
//! simulator through a file-based handoff: the adapter invokes the
//! executable against a prepared input deck at configuration time, reads
//! back its fixed-format output time series (time in years, temperature in
//! °C), and then serves [`ExternalSimulator::temperature_at`] by the same
//! strict interpolation the user-profile model uses.
//!
//! A missing executable or a failing exit status is a hard, user-visible
//! configuration error — never a silent fallback.

use std::path::PathBuf;
use std::process::Command;

use uom::si::f64::{ThermodynamicTemperature, Time};

use crate::diagnostics::Advisory;
use crate::support::interpolate::TimeTable;

use super::{
    error::{ReservoirConfigError, ReservoirError},
    profile::UserProfile,
};

/// File-based handoff description for the external simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalHandoff {
    /// Simulator executable.
    pub executable: PathBuf,
    /// Input deck passed as the executable's sole argument.
    pub input_deck: PathBuf,
    /// Output time-series file the simulator writes.
    pub output_file: PathBuf,
    /// Column of the output file holding the production temperature.
    pub value_column: usize,
}

/// Adapter serving an external simulator's output time series.
#[derive(Debug, Clone)]
pub struct ExternalSimulator {
    profile: UserProfile,
}

impl ExternalSimulator {
    /// Runs the simulator once and loads its output series.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirConfigError`] if the executable is absent, cannot
    /// be launched, exits unsuccessfully, or produces an unreadable or
    /// malformed output series.
    pub fn run(
        handoff: &ExternalHandoff,
        configured_initial: ThermodynamicTemperature,
        advisories: &mut Vec<Advisory>,
    ) -> Result<Self, ReservoirConfigError> {
        if !handoff.executable.exists() {
            return Err(ReservoirConfigError::MissingExecutable {
                path: handoff.executable.clone(),
            });
        }

        let status = Command::new(&handoff.executable)
            .arg(&handoff.input_deck)
            .status()
            .map_err(|source| ReservoirConfigError::SimulatorLaunch {
                path: handoff.executable.clone(),
                source,
            })?;
        if !status.success() {
            return Err(ReservoirConfigError::SimulatorExit {
                path: handoff.executable.clone(),
                code: status.code(),
            });
        }

        let text = std::fs::read_to_string(&handoff.output_file).map_err(|source| {
            ReservoirConfigError::ProfileRead {
                path: handoff.output_file.clone(),
                source,
            }
        })?;
        let table = TimeTable::parse_columns(&text, handoff.value_column)?;
        let profile = UserProfile::from_table(table, configured_initial, advisories)?;

        Ok(Self { profile })
    }

    /// Reservoir outlet temperature after `age` of production.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirError`] for invalid ages or queries outside the
    /// simulator's output domain.
    pub fn temperature_at(
        &self,
        age: Time,
    ) -> Result<ThermodynamicTemperature, ReservoirError> {
        self.profile.temperature_at(age)
    }

    /// The first entry of the simulator's series.
    #[must_use]
    pub fn initial_temperature(&self) -> ThermodynamicTemperature {
        self.profile.initial_temperature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::thermodynamic_temperature::degree_celsius;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn missing_executable_is_a_hard_error() {
        let handoff = ExternalHandoff {
            executable: PathBuf::from("/nonexistent/simulator"),
            input_deck: PathBuf::from("/nonexistent/deck.in"),
            output_file: PathBuf::from("/nonexistent/out.dat"),
            value_column: 1,
        };

        let mut advisories = Vec::new();
        let result = ExternalSimulator::run(&handoff, celsius(150.0), &mut advisories);
        assert!(matches!(
            result,
            Err(ReservoirConfigError::MissingExecutable { .. })
        ));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        use approx::assert_relative_eq;
        use uom::si::time::year;

        fn write_script(dir: &std::path::Path, body: &str) -> PathBuf {
            let path = dir.join("fake-simulator.sh");
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "#!/bin/sh\n{body}").unwrap();
            let mut permissions = file.metadata().unwrap().permissions();
            permissions.set_mode(0o755);
            std::fs::set_permissions(&path, permissions).unwrap();
            path
        }

        #[test]
        fn round_trips_a_simulator_series() {
            let dir = tempfile::tempdir().unwrap();
            let output = dir.path().join("out.dat");
            let script = write_script(
                dir.path(),
                &format!(
                    "printf '0.0 150.0\\n10.0 140.0\\n30.0 118.0\\n' > {}",
                    output.display()
                ),
            );

            let handoff = ExternalHandoff {
                executable: script,
                input_deck: dir.path().join("deck.in"),
                output_file: output,
                value_column: 1,
            };

            let mut advisories = Vec::new();
            let model =
                ExternalSimulator::run(&handoff, celsius(150.0), &mut advisories).unwrap();

            let t = model.temperature_at(Time::new::<year>(10.0)).unwrap();
            assert_relative_eq!(t.get::<degree_celsius>(), 140.0);

            let mid = model.temperature_at(Time::new::<year>(20.0)).unwrap();
            assert_relative_eq!(mid.get::<degree_celsius>(), 129.0);
        }

        #[test]
        fn failing_simulator_is_a_hard_error() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "exit 3");

            let handoff = ExternalHandoff {
                executable: script,
                input_deck: dir.path().join("deck.in"),
                output_file: dir.path().join("out.dat"),
                value_column: 1,
            };

            let mut advisories = Vec::new();
            let result = ExternalSimulator::run(&handoff, celsius(150.0), &mut advisories);
            assert!(matches!(
                result,
                Err(ReservoirConfigError::SimulatorExit { code: Some(3), .. })
            ));
        }
    }
}
