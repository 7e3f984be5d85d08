//! The time-stepping simulation loop.
//!
//! A run advances the project clock step by step (default four steps per
//! year, configurable down to seasonal or finer resolutions): at each step it
//! queries the reservoir model at the current reservoir age, passes the
//! outlet temperature through the wellbore model, appends the results to the
//! [`ProductionProfile`], and applies the drawdown-triggered redrilling
//! policy. Redrilling resets the reservoir-age clock only; project-elapsed
//! time and cumulative extraction keep running.
//!
//! A run is strictly sequential — each step depends on the previous step's
//! reservoir age and redrill state — but holds no shared mutable state, so
//! independent runs are embarrassingly parallel for an external driver.

mod clock;
mod error;
mod profile;
mod redrill;
mod run;

pub use clock::{Schedule, ScheduleError, SimulationClock};
pub use error::{FieldConfigError, SimulationError};
pub use profile::{AnnualSummary, ProductionProfile, StepRecord};
pub use redrill::{RedrillPolicy, RedrillState};
pub use run::{FieldConfig, Simulator};
