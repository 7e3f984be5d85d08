//! Drawdown-triggered redrilling policy and state.

use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

use crate::support::constraint::{Constrained, UnitIntervalOpen};

/// When cumulative thermal drawdown reaches `max_drawdown`, the well pair is
/// redrilled: the reservoir age resets to zero and the redrill counter
/// increments. Project-lifetime counters are untouched.
#[derive(Debug, Clone, Copy)]
pub struct RedrillPolicy {
    /// Maximum tolerated drawdown fraction of the initial temperature,
    /// with both temperatures on the °C scale.
    pub max_drawdown: Constrained<f64, UnitIntervalOpen>,
}

/// Mutable drawdown bookkeeping for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedrillState {
    drawdown_fraction: f64,
    count: u32,
}

impl RedrillState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawdown fraction accumulated since the last redrill.
    #[must_use]
    pub fn drawdown_fraction(&self) -> f64 {
        self.drawdown_fraction
    }

    /// Redrills performed so far.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Updates the drawdown fraction and fires the policy when the threshold
    /// is reached. Returns true when a redrill was triggered; the caller
    /// resets the reservoir-age clock.
    pub fn observe(
        &mut self,
        policy: &RedrillPolicy,
        initial: ThermodynamicTemperature,
        current: ThermodynamicTemperature,
    ) -> bool {
        let initial_celsius = initial.get::<degree_celsius>();
        let current_celsius = current.get::<degree_celsius>();
        self.drawdown_fraction =
            ((initial_celsius - current_celsius) / initial_celsius).max(0.0);

        if self.drawdown_fraction >= *policy.max_drawdown.as_ref() {
            self.count += 1;
            self.drawdown_fraction = 0.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn triggers_at_the_threshold() {
        let policy = RedrillPolicy {
            max_drawdown: UnitIntervalOpen::new(0.1).unwrap(),
        };
        let mut state = RedrillState::new();

        assert!(!state.observe(&policy, celsius(145.0), celsius(132.0)));
        assert_eq!(state.count(), 0);

        // 14.5 degrees is exactly 10% of 145.
        assert!(state.observe(&policy, celsius(145.0), celsius(130.5)));
        assert_eq!(state.count(), 1);
        assert_eq!(state.drawdown_fraction(), 0.0);
    }

    #[test]
    fn recovered_temperature_clears_the_fraction() {
        let policy = RedrillPolicy {
            max_drawdown: UnitIntervalOpen::new(0.2).unwrap(),
        };
        let mut state = RedrillState::new();

        state.observe(&policy, celsius(145.0), celsius(140.0));
        assert!(state.drawdown_fraction() > 0.0);

        state.observe(&policy, celsius(145.0), celsius(145.0));
        assert_eq!(state.drawdown_fraction(), 0.0);
        assert_eq!(state.count(), 0);
    }
}
