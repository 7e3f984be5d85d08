//! Field configuration validation and the time-stepping run loop.

use uom::si::{
    f64::{Energy, MassRate, Ratio, ThermodynamicTemperature},
    energy::joule,
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::degree_celsius,
    time::second,
    volume::cubic_meter,
};

use crate::diagnostics::Advisory;
use crate::models::reservoir::{ReservoirConfig, ReservoirModel, mean_temperature};
use crate::models::wellbore::{
    PUMP_DEPTH_GUIDELINE_M, WellboreConfig, WellboreInput, WellboreModel,
};
use crate::support::water;

use super::{
    clock::{Schedule, SimulationClock},
    error::{FieldConfigError, SimulationError},
    profile::{AnnualSummary, ProductionProfile, StepRecord},
    redrill::{RedrillPolicy, RedrillState},
};

/// Tolerance above the initial temperature before a bound violation is
/// declared, absorbing numerical inversion noise.
const BOUND_TOLERANCE_KELVIN: f64 = 0.1;

/// Complete configuration for one simulation run. Immutable; validation
/// produces a [`Simulator`].
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub reservoir: ReservoirConfig,
    pub wellbore: WellboreConfig,
    pub schedule: Schedule,
    /// Drawdown-triggered redrilling; absent means wells are never replaced.
    pub redrill: Option<RedrillPolicy>,
}

impl FieldConfig {
    /// Validates the configuration and constructs a ready-to-run simulator.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldConfigError`] naming the offending component; nothing
    /// is partially constructed.
    pub fn validate(&self) -> Result<Simulator, FieldConfigError> {
        let clock = SimulationClock::new(&self.schedule)?;

        let mut advisories = Vec::new();
        let total_flow = self.wellbore.total_flow();
        let reservoir = self.reservoir.build(total_flow, &mut advisories)?;

        let injection = self.wellbore.resolved_injection_temperature();
        let mean_loop = mean_temperature(reservoir.initial_temperature(), injection);
        let wellbore = self.wellbore.build(&self.reservoir.rock, mean_loop)?;

        let accounting = Accounting::new(
            &self.reservoir,
            &reservoir,
            total_flow,
            injection,
            self.wellbore.utilization.as_ref().get::<ratio>(),
            mean_loop,
        );

        Ok(Simulator {
            reservoir,
            wellbore,
            clock,
            redrill: self.redrill,
            advisories,
            accounting,
        })
    }
}

/// Heat-accounting inputs frozen at validation time.
#[derive(Debug, Clone, Copy)]
struct Accounting {
    /// Whole-field circulation, kg/s.
    total_flow: f64,
    /// Circulating water heat capacity at the mean loop temperature, J/(kg·K).
    specific_heat: f64,
    injection_celsius: f64,
    utilization: f64,
    /// Heat in place above the injection temperature, J; absent when the
    /// model reports no volume.
    heat_in_place: Option<f64>,
}

impl Accounting {
    fn new(
        config: &ReservoirConfig,
        model: &ReservoirModel,
        total_flow: MassRate,
        injection: ThermodynamicTemperature,
        utilization: f64,
        mean_loop: ThermodynamicTemperature,
    ) -> Self {
        let cw = water::specific_heat(mean_loop).get::<joule_per_kilogram_kelvin>();
        let rho_w = water::density(mean_loop).get::<kilogram_per_cubic_meter>();

        let heat_in_place = model.volume().map(|volume| {
            let porosity = config.rock.porosity.as_ref().get::<ratio>();
            let bulk_capacity = porosity * rho_w * cw
                + (1.0 - porosity)
                    * config.rock.density.get::<kilogram_per_cubic_meter>()
                    * config
                        .rock
                        .specific_heat
                        .get::<joule_per_kilogram_kelvin>();
            let delta = model.initial_temperature().get::<degree_celsius>()
                - injection.get::<degree_celsius>();
            bulk_capacity * volume.get::<cubic_meter>() * delta
        });

        Self {
            total_flow: total_flow.get::<kilogram_per_second>(),
            specific_heat: cw,
            injection_celsius: injection.get::<degree_celsius>(),
            utilization,
            heat_in_place,
        }
    }

    /// Heat extracted over one step, J.
    fn step_heat(&self, wellhead_celsius: f64, step_seconds: f64) -> f64 {
        self.total_flow
            * self.specific_heat
            * (wellhead_celsius - self.injection_celsius)
            * step_seconds
            * self.utilization
    }
}

/// A validated, ready-to-run simulation.
///
/// `run` borrows the simulator immutably: all step state lives in the run's
/// own clock, redrill state, and profile, so independent runs from the same
/// simulator (or independent simulators) may proceed concurrently.
#[derive(Debug, Clone)]
pub struct Simulator {
    reservoir: ReservoirModel,
    wellbore: WellboreModel,
    clock: SimulationClock,
    redrill: Option<RedrillPolicy>,
    advisories: Vec<Advisory>,
    accounting: Accounting,
}

impl Simulator {
    /// Advisories raised during validation.
    #[must_use]
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// The validated reservoir model.
    #[must_use]
    pub fn reservoir(&self) -> &ReservoirModel {
        &self.reservoir
    }

    /// Runs the simulation to completion.
    ///
    /// The loop advances step by step: reservoir query at the current
    /// reservoir age, wellbore transmission and hydraulics, bookkeeping, then
    /// the redrill policy (which resets only the reservoir-age clock). It
    /// either returns the complete profile or the first fatal error; no
    /// partial profile escapes.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] identifying the failing step.
    pub fn run(&self) -> Result<ProductionProfile, SimulationError> {
        let mut clock = self.clock;
        let mut redrill_state = RedrillState::new();
        let mut profile = ProductionProfile::new();
        let mut depth_advisory_raised = false;

        let initial = self.reservoir.initial_temperature();
        let maximum = ThermodynamicTemperature::new::<degree_celsius>(
            initial.get::<degree_celsius>() + BOUND_TOLERANCE_KELVIN,
        );

        while !clock.is_complete() {
            clock.advance();
            let step = clock.step();

            let reservoir_temperature = self
                .reservoir
                .temperature_at(clock.reservoir_age())
                .map_err(|source| SimulationError::Reservoir { step, source })?;
            if reservoir_temperature > maximum {
                return Err(SimulationError::TemperatureBound {
                    step,
                    temperature: reservoir_temperature,
                    maximum: initial,
                });
            }

            let output = self
                .wellbore
                .produce(WellboreInput {
                    reservoir_temperature,
                    producing_time: clock.elapsed(),
                })
                .map_err(|source| SimulationError::Wellbore { step, source })?;

            if !depth_advisory_raised
                && output.pump_depth.get::<meter>() > PUMP_DEPTH_GUIDELINE_M
            {
                depth_advisory_raised = true;
                let advisory = Advisory::PumpDepthExceedsGuideline {
                    depth: output.pump_depth,
                    guideline: uom::si::f64::Length::new::<meter>(PUMP_DEPTH_GUIDELINE_M),
                };
                advisory.emit();
                profile.advisories.push(advisory);
            }

            profile.push(StepRecord {
                elapsed: clock.elapsed(),
                reservoir_age: clock.reservoir_age(),
                reservoir_temperature,
                wellhead_temperature: output.wellhead_temperature,
                pressure: output.pressure,
                pump_power: output.pump_power,
                pump_depth: output.pump_depth,
            });

            if let Some(policy) = &self.redrill
                && redrill_state.observe(policy, initial, reservoir_temperature)
            {
                clock.reset_reservoir_age();
            }
        }

        profile.redrill_count = redrill_state.count();
        self.finalize(&mut profile);
        Ok(profile)
    }

    fn finalize(&self, profile: &mut ProductionProfile) {
        let steps_per_year = (1.0
            / self.clock.step_duration().get::<uom::si::time::year>())
        .round() as usize;
        let step_seconds = self.clock.step_duration().get::<second>();

        let mut annual = Vec::new();
        let mut total_heat = 0.0;
        for (index, chunk) in profile.steps().chunks(steps_per_year).enumerate() {
            let mut heat = 0.0;
            let mut temperature_sum = 0.0;
            for record in chunk {
                let wellhead = record.wellhead_temperature.get::<degree_celsius>();
                heat += self.accounting.step_heat(wellhead, step_seconds);
                temperature_sum += wellhead;
            }
            total_heat += heat;
            annual.push(AnnualSummary {
                year: index as u32 + 1,
                heat_extracted: Energy::new::<joule>(heat),
                average_wellhead_temperature: ThermodynamicTemperature::new::<degree_celsius>(
                    temperature_sum / chunk.len() as f64,
                ),
            });
        }

        profile.annual = annual;
        profile.heat_mined_fraction = self
            .accounting
            .heat_in_place
            .map(|in_place| Ratio::new::<ratio>(total_heat / in_place));
    }
}
