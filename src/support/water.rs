//! Liquid water property correlations.
//!
//! Geothermal circulation in this crate is single-phase liquid water, so the
//! fluid layer is a set of engineering correlations in temperature rather
//! than a full equation of state. Each function takes an absolute temperature
//! and returns a typed quantity; the fits are intended for 0–300 °C liquid
//! conditions, the range spanned by hydrothermal and EGS projects.
//!
//! Pressure dependence is not modeled: density enters through buoyancy and
//! Reynolds numbers, where the temperature term dominates at reservoir
//! conditions.

use uom::si::{
    f64::{DynamicViscosity, MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    dynamic_viscosity::pascal_second,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::degree_celsius,
};

/// Density of liquid water (Thiesen–Scheel–Diesselhorst form).
#[must_use]
pub fn density(temperature: ThermodynamicTemperature) -> MassDensity {
    let t = temperature.get::<degree_celsius>();
    let rho = 1000.0 * (1.0 - (t + 288.9414) / (508_929.2 * (t + 68.12963)) * (t - 3.9863).powi(2));
    MassDensity::new::<kilogram_per_cubic_meter>(rho)
}

/// Dynamic viscosity of liquid water.
#[must_use]
pub fn viscosity(temperature: ThermodynamicTemperature) -> DynamicViscosity {
    let t = temperature.get::<degree_celsius>();
    let mu = 2.414e-5 * 10f64.powf(247.8 / (t + 133.15));
    DynamicViscosity::new::<pascal_second>(mu)
}

/// Isobaric specific heat capacity of liquid water.
///
/// Quadratic fit through saturation-line values at 25, 150, and 250 °C;
/// within about 1% of tabulated data across the fit range.
#[must_use]
pub fn specific_heat(temperature: ThermodynamicTemperature) -> SpecificHeatCapacity {
    let t = temperature.get::<degree_celsius>();
    let cp = 4230.8 - 2.498 * t + 0.02017 * t * t;
    SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp)
}

/// Saturation (vapor) pressure of water, two-range Antoine correlation.
#[must_use]
pub fn vapor_pressure(temperature: ThermodynamicTemperature) -> Pressure {
    let t = temperature.get::<degree_celsius>();
    let (a, b, c) = if t <= 100.0 {
        (8.07131, 1730.63, 233.426)
    } else {
        (8.14019, 1810.94, 244.485)
    };
    let mmhg = 10f64.powf(a - b / (c + t));
    Pressure::new::<pascal>(mmhg * 133.322)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn density_reference_points() {
        assert_relative_eq!(
            density(celsius(20.0)).get::<kilogram_per_cubic_meter>(),
            998.2,
            epsilon = 0.5
        );
        assert_relative_eq!(
            density(celsius(150.0)).get::<kilogram_per_cubic_meter>(),
            917.0,
            epsilon = 3.0
        );
    }

    #[test]
    fn viscosity_reference_points() {
        assert_relative_eq!(
            viscosity(celsius(20.0)).get::<pascal_second>(),
            1.002e-3,
            max_relative = 0.01
        );
        assert_relative_eq!(
            viscosity(celsius(150.0)).get::<pascal_second>(),
            1.83e-4,
            max_relative = 0.02
        );
    }

    #[test]
    fn specific_heat_reference_points() {
        assert_relative_eq!(
            specific_heat(celsius(25.0)).get::<joule_per_kilogram_kelvin>(),
            4181.0,
            max_relative = 0.01
        );
        assert_relative_eq!(
            specific_heat(celsius(150.0)).get::<joule_per_kilogram_kelvin>(),
            4310.0,
            max_relative = 0.01
        );
    }

    #[test]
    fn vapor_pressure_boils_at_one_atmosphere() {
        assert_relative_eq!(
            vapor_pressure(celsius(100.0)).get::<pascal>(),
            101_325.0,
            max_relative = 0.02
        );
    }

    #[test]
    fn density_decreases_with_temperature() {
        assert!(density(celsius(40.0)) < density(celsius(10.0)));
        assert!(density(celsius(200.0)) < density(celsius(100.0)));
    }
}
