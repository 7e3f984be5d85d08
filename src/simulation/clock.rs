//! Simulation schedule and clock.

use thiserror::Error;
use uom::si::{
    f64::Time,
    time::year,
};

/// Errors from validating a [`Schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The plant lifetime must be strictly positive.
    #[error("plant lifetime must be strictly positive")]
    NonPositiveLifetime,

    /// The sub-annual resolution must be at least one step per year.
    #[error("steps per year must be at least 1")]
    ZeroStepsPerYear,

    /// The lifetime is shorter than a single step.
    #[error("schedule produces no steps; lengthen the lifetime or refine the resolution")]
    NoSteps,
}

/// Project schedule: lifetime and sub-annual resolution.
///
/// The default resolution is four steps per year; seasonal or finer analyses
/// raise it. A lifetime that is not a whole number of steps is truncated to
/// the last complete step rather than overrun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub plant_lifetime: Time,
    pub steps_per_year: u32,
}

impl Schedule {
    /// Checks the schedule and returns the truncated step count.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] for a degenerate schedule.
    pub fn step_count(&self) -> Result<usize, ScheduleError> {
        let lifetime_years = self.plant_lifetime.get::<year>();
        if !(lifetime_years > 0.0) || !lifetime_years.is_finite() {
            return Err(ScheduleError::NonPositiveLifetime);
        }
        if self.steps_per_year == 0 {
            return Err(ScheduleError::ZeroStepsPerYear);
        }

        let steps = (lifetime_years * f64::from(self.steps_per_year)).floor();
        if steps < 1.0 {
            return Err(ScheduleError::NoSteps);
        }
        Ok(steps as usize)
    }

    /// Duration of one step.
    #[must_use]
    pub fn step_duration(&self) -> Time {
        Time::new::<year>(1.0 / f64::from(self.steps_per_year))
    }
}

/// The run's clock: project-elapsed time plus the reservoir-age counter that
/// resets on redrilling.
///
/// Total elapsed project time never resets; only the physical reservoir-age
/// input to the thermal model does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    step_duration: Time,
    total_steps: usize,
    step: usize,
    elapsed: Time,
    reservoir_age: Time,
}

impl SimulationClock {
    /// Creates a clock for the given schedule.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] for a degenerate schedule.
    pub fn new(schedule: &Schedule) -> Result<Self, ScheduleError> {
        Ok(Self {
            step_duration: schedule.step_duration(),
            total_steps: schedule.step_count()?,
            step: 0,
            elapsed: Time::new::<year>(0.0),
            reservoir_age: Time::new::<year>(0.0),
        })
    }

    /// Moves to the end of the next step, advancing both clocks.
    pub fn advance(&mut self) {
        self.step += 1;
        self.elapsed = self.elapsed + self.step_duration;
        self.reservoir_age = self.reservoir_age + self.step_duration;
    }

    /// Resets the reservoir age after a redrill; the project clock keeps
    /// running.
    pub fn reset_reservoir_age(&mut self) {
        self.reservoir_age = Time::new::<year>(0.0);
    }

    /// True when the final step has been processed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.step >= self.total_steps
    }

    /// One-based index of the current step (zero before the first advance).
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    #[must_use]
    pub fn step_duration(&self) -> Time {
        self.step_duration
    }

    /// Project-elapsed time at the end of the current step.
    #[must_use]
    pub fn elapsed(&self) -> Time {
        self.elapsed
    }

    /// Reservoir age at the end of the current step.
    #[must_use]
    pub fn reservoir_age(&self) -> Time {
        self.reservoir_age
    }
}
