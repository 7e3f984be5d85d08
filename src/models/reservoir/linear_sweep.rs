//! 1-D linear heat sweep through a porous, blocky reservoir.
//!
//! The reservoir is a bed of rock blocks exchanging heat with water swept
//! through the pore space — a Schumann-style two-temperature model. The
//! governing parameters are the number of transfer units (NTU) between water
//! and blocks and the fluid-to-rock heat-storage ratio γ, both derived from
//! an effective rock-block radius and a Biot number. Boundary conditions are
//! fixed: constant recharge temperature far upstream and zero external heat
//! flux.
//!
//! In capacity-normalized throughput time τ the outlet drawdown is, in
//! Laplace space,
//!
//! ```text
//! θ̂(s) = (1/s) · exp(−NTU·s / (s + NTU))
//! ```
//!
//! which is inverted numerically. Fluid storage retards the throughput clock
//! by a factor (1 + γ).

use uom::si::{
    f64::{HeatTransfer, MassRate, ThermodynamicTemperature, Time, Volume},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
    volume::cubic_meter,
};

use crate::diagnostics::Advisory;
use crate::support::{laplace::GaverStehfest, water};

use super::{
    RockProperties, checked_age, drawdown_temperature,
    error::{ReservoirConfigError, ReservoirError},
    geometry::FractureGeometry,
    mean_temperature,
};

/// Sphericity-style geometry factor relating block volume to exchange radius.
const GEOMETRY_FACTOR: f64 = 0.83;

/// Ratio of the internal conduction path to the effective block radius.
const CONDUCTION_PATH_RATIO: f64 = 0.2;

/// Film coefficient merged in when the user does not supply one.
const DEFAULT_FILM_COEFFICIENT: f64 = 400.0; // W/(m²·K)

/// 1-D linear heat sweep model.
#[derive(Debug, Clone)]
pub struct LinearHeatSweep {
    initial_celsius: f64,
    injection_celsius: f64,
    ntu: f64,
    /// Throughput time accumulated per second of production.
    throughput_rate: f64,
    inverter: GaverStehfest,
    volume: Volume,
}

impl LinearHeatSweep {
    /// Builds the model, deriving NTU and γ from the block geometry.
    ///
    /// A missing film coefficient is defaulted and reported as an advisory.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirConfigError`] for a non-positive flow or an
    /// injection temperature at or above the initial temperature.
    pub fn new(
        geometry: &FractureGeometry,
        rock: &RockProperties,
        film_coefficient: Option<HeatTransfer>,
        initial_temperature: ThermodynamicTemperature,
        injection_temperature: ThermodynamicTemperature,
        total_flow: MassRate,
        advisories: &mut Vec<Advisory>,
    ) -> Result<Self, ReservoirConfigError> {
        let flow = total_flow.get::<kilogram_per_second>();
        if !(flow > 0.0) {
            return Err(ReservoirConfigError::NonPositiveFlow);
        }
        if injection_temperature >= initial_temperature {
            return Err(ReservoirConfigError::InjectionNotBelowInitial {
                injection: injection_temperature,
                initial: initial_temperature,
            });
        }

        let film = match film_coefficient {
            Some(value) => value.get::<watt_per_square_meter_kelvin>(),
            None => {
                let advisory = Advisory::DefaultedFilmCoefficient {
                    value: HeatTransfer::new::<watt_per_square_meter_kelvin>(
                        DEFAULT_FILM_COEFFICIENT,
                    ),
                };
                advisory.emit();
                advisories.push(advisory);
                DEFAULT_FILM_COEFFICIENT
            }
        };

        let mean = mean_temperature(initial_temperature, injection_temperature);
        let cw = water::specific_heat(mean).get::<joule_per_kilogram_kelvin>();
        let rho_w = water::density(mean).get::<kilogram_per_cubic_meter>();

        let porosity = rock.porosity.as_ref().get::<ratio>();
        let rho_rock = rock.density.get::<kilogram_per_cubic_meter>();
        let c_rock = rock.specific_heat.get::<joule_per_kilogram_kelvin>();
        let conductivity = rock.conductivity.get::<watt_per_meter_kelvin>();

        let separation = geometry.separation.get::<meter>();
        let reservoir_volume = geometry.volume.get::<cubic_meter>();

        // Mean block volume and its effective exchange radius.
        let block_volume = separation.powi(3);
        let radius =
            (3.0 * block_volume / (4.0 * std::f64::consts::PI)).cbrt() / GEOMETRY_FACTOR;

        // Film and internal conduction resistances in series via the Biot number.
        let biot = film * CONDUCTION_PATH_RATIO * radius / conductivity;
        let overall = film / (1.0 + biot);

        let block_area = 4.0 * std::f64::consts::PI * radius * radius;
        let block_count = (1.0 - porosity) * reservoir_volume / block_volume;
        let ntu = overall * block_count * block_area / (flow * cw);

        // Heat-storage ratio of pore fluid to rock.
        let gamma = porosity * rho_w * cw / ((1.0 - porosity) * rho_rock * c_rock);
        let rock_capacity = (1.0 - porosity) * rho_rock * c_rock * reservoir_volume;
        let throughput_rate = flow * cw / (rock_capacity * (1.0 + gamma));

        Ok(Self {
            initial_celsius: initial_temperature.get::<degree_celsius>(),
            injection_celsius: injection_temperature.get::<degree_celsius>(),
            ntu,
            throughput_rate,
            inverter: GaverStehfest::default(),
            volume: geometry.volume,
        })
    }

    /// Reservoir outlet temperature after `age` of production.
    ///
    /// # Errors
    ///
    /// Returns a [`ReservoirError`] for invalid ages or a failed inversion.
    pub fn temperature_at(
        &self,
        age: Time,
    ) -> Result<ThermodynamicTemperature, ReservoirError> {
        let seconds = checked_age(age)?;
        if seconds == 0.0 {
            return Ok(self.initial_temperature());
        }

        let throughput = self.throughput_rate * seconds;
        let ntu = self.ntu;
        let drawdown = self.inverter.invert(
            |s| (-(ntu * s) / (s + ntu)).exp() / s,
            throughput,
        )?;

        Ok(drawdown_temperature(
            self.initial_celsius,
            self.injection_celsius,
            drawdown,
        ))
    }

    /// The outlet temperature at age zero.
    #[must_use]
    pub fn initial_temperature(&self) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(self.initial_celsius)
    }

    /// Swept reservoir volume.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Number of transfer units between water and rock blocks.
    #[must_use]
    pub fn ntu(&self) -> f64 {
        self.ntu
    }
}
