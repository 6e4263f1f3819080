// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Collector heat of flat plate and concentrating solar thermal collectors.

use chrono::Duration;

use super::solar_position::{plane_of_array, SolarPosition};
use crate::component_category::SolarCollector;
use crate::context::{ScenarioSettings, WeatherData};

/// Parameters of a solar thermal collector field.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CollectorParameters {
    pub latitude: f64,
    pub longitude: f64,
    pub tilt: f64,
    pub azimuth: f64,
    pub eta_0: f64,
    pub a_1: f64,
    pub a_2: f64,
    pub c_1: f64,
    pub c_2: f64,
    pub cleanliness: f64,
    /// °C.
    pub temperature_inlet: f64,
    /// Temperature rise across the collector, K.
    pub temperature_difference: f64,
}

/// Efficiency of a flat plate collector.
fn flat_plate_efficiency(params: &CollectorParameters, irradiance: f64, temp_amb: f64) -> f64 {
    if irradiance <= 0.0 {
        return 0.0;
    }
    let delta_t = params.temperature_inlet + params.temperature_difference - temp_amb;
    (params.eta_0
        - params.a_1 * delta_t / irradiance
        - params.a_2 * delta_t.powi(2) / irradiance)
        .max(0.0)
}

/// Efficiency of a concentrating collector, with an incidence angle
/// modifier that is quadratic in the angle of incidence.
fn concentrating_efficiency(
    params: &CollectorParameters,
    irradiance: f64,
    incidence_angle: f64,
    temp_amb: f64,
) -> f64 {
    if irradiance <= 0.0 {
        return 0.0;
    }
    let iam = 1.0 - params.a_1 * incidence_angle.abs() - params.a_2 * incidence_angle.powi(2);
    let temp_outlet = params.temperature_inlet + params.temperature_difference;
    let delta_t = (params.temperature_inlet + temp_outlet) / 2.0 - temp_amb;
    (params.eta_0 * iam * params.cleanliness
        - params.c_1 * delta_t / irradiance
        - params.c_2 * delta_t.powi(2) / irradiance)
        .max(0.0)
}

/// Returns the collected heat per m² of collector area for every timestep,
/// kW/m².
pub(crate) fn collector_heat(
    collector: SolarCollector,
    params: &CollectorParameters,
    settings: &ScenarioSettings,
    weather: &WeatherData,
) -> Vec<f64> {
    let half_step = Duration::seconds(settings.resolution.seconds() as i64 / 2);

    settings
        .timestamps()
        .enumerate()
        .map(|(t, time)| {
            let position = SolarPosition::at(time + half_step, params.latitude, params.longitude);
            let temp_amb = weather.temperature[t];
            let heat = match collector {
                SolarCollector::FlatPlate => {
                    let irradiance = plane_of_array(
                        &position,
                        weather.dirhi[t],
                        weather.dhi[t],
                        params.tilt,
                        params.azimuth,
                        0.0,
                    );
                    flat_plate_efficiency(params, irradiance, temp_amb) * irradiance
                }
                SolarCollector::Concentrating => {
                    let irradiance =
                        position.beam_on_surface(weather.dirhi[t], params.tilt, params.azimuth);
                    let incidence = position
                        .cos_incidence(params.tilt, params.azimuth)
                        .clamp(-1.0, 1.0)
                        .acos()
                        .to_degrees();
                    concentrating_efficiency(params, irradiance, incidence, temp_amb) * irradiance
                }
            };
            heat / 1000.0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> CollectorParameters {
        CollectorParameters {
            eta_0: 0.8,
            a_1: 3.0,
            a_2: 0.01,
            temperature_inlet: 40.0,
            temperature_difference: 10.0,
            cleanliness: 0.9,
            c_1: 0.1,
            c_2: 0.001,
            ..Default::default()
        }
    }

    #[test]
    fn test_flat_plate_efficiency() {
        // delta_t = 40 + 10 - 20 = 30
        let eta = flat_plate_efficiency(&params(), 900.0, 20.0);
        assert!((eta - (0.8 - 3.0 * 30.0 / 900.0 - 0.01 * 900.0 / 900.0)).abs() < 1e-12);
        assert_eq!(flat_plate_efficiency(&params(), 0.0, 20.0), 0.0);
        assert_eq!(flat_plate_efficiency(&params(), 10.0, -20.0), 0.0);
    }

    #[test]
    fn test_concentrating_efficiency() {
        let params = CollectorParameters {
            a_1: 0.001,
            a_2: 0.0001,
            ..params()
        };
        // delta_t = (40 + 50) / 2 - 25 = 20, iam = 1 - 0.01 - 0.01
        let eta = concentrating_efficiency(&params, 800.0, 10.0, 25.0);
        let expected = 0.8 * 0.98 * 0.9 - 0.1 * 20.0 / 800.0 - 0.001 * 400.0 / 800.0;
        assert!((eta - expected).abs() < 1e-12);
    }
}
