// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Wind turbine feed-in from a density-corrected power curve.

use super::{interpolate, KELVIN};
use crate::catalog::WindTurbine;
use crate::context::WeatherData;

/// Height of the wind speed measurement, m.
const WIND_SPEED_HEIGHT: f64 = 10.0;
/// Height of the temperature measurement, m.
const TEMPERATURE_HEIGHT: f64 = 2.0;
/// Air density of the standard atmosphere, kg/m³.
const STANDARD_DENSITY: f64 = 1.225;
/// Specific gas constant of dry air, J/(kg·K).
const GAS_CONSTANT_AIR: f64 = 287.058;

/// Wind speed at hub height from the logarithmic wind profile.
pub(crate) fn hub_wind_speed(wind_speed: f64, roughness_length: f64, hub_height: f64) -> f64 {
    if roughness_length <= 0.0 || wind_speed <= 0.0 {
        return 0.0;
    }
    wind_speed * (hub_height / roughness_length).ln() / (WIND_SPEED_HEIGHT / roughness_length).ln()
}

/// Air density at hub height from the barometric height formula and a
/// linear temperature gradient.
///
/// Falls back to the standard density when no pressure is given.
pub(crate) fn hub_density(pressure: f64, temperature: f64, hub_height: f64) -> f64 {
    if pressure <= 0.0 {
        return STANDARD_DENSITY;
    }
    let temperature = temperature + KELVIN - 0.0065 * (hub_height - TEMPERATURE_HEIGHT);
    let pressure = (pressure / 100.0 - hub_height / 8.0) * 100.0;
    pressure / (GAS_CONSTANT_AIR * temperature)
}

/// Exponent of the power curve density correction.
fn density_exponent(wind_speed: f64) -> f64 {
    if wind_speed <= 7.5 {
        1.0 / 3.0
    } else if wind_speed >= 12.5 {
        2.0 / 3.0
    } else {
        (wind_speed - 7.5) / 15.0 + 1.0 / 3.0
    }
}

/// Shifts the wind speeds of a power curve to a site with the given air
/// density.
fn density_corrected_curve(power_curve: &[(f64, f64)], density: f64) -> Vec<(f64, f64)> {
    power_curve
        .iter()
        .map(|&(speed, power)| {
            (
                speed * (STANDARD_DENSITY / density).powf(density_exponent(speed)),
                power,
            )
        })
        .collect()
}

/// Returns the turbine output relative to its nominal power for every
/// timestep.
pub(crate) fn feedin(turbine: &WindTurbine, hub_height: f64, weather: &WeatherData) -> Vec<f64> {
    (0..weather.len())
        .map(|t| {
            let speed = hub_wind_speed(weather.windspeed[t], weather.z0[t], hub_height);
            let density = hub_density(weather.pressure[t], weather.temperature[t], hub_height);
            let curve = density_corrected_curve(&turbine.power_curve, density);
            interpolate(&curve, speed) / turbine.nominal_power
        })
        .collect()
}
