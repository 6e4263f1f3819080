// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Photovoltaic feed-in per kW peak.

use chrono::Duration;

use super::solar_position::{plane_of_array, SolarPosition};
use crate::catalog::{PvInverter, PvModule};
use crate::context::{ScenarioSettings, WeatherData};

/// Irradiance at standard test conditions, W/m².
const STC_IRRADIANCE: f64 = 1000.0;
/// Cell temperature at standard test conditions, °C.
const STC_TEMPERATURE: f64 = 25.0;

/// Orientation and location of a photovoltaic system.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PvSystem<'a> {
    pub module: &'a PvModule,
    pub inverter: &'a PvInverter,
    pub tilt: f64,
    pub azimuth: f64,
    pub albedo: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl PvSystem<'_> {
    /// Returns the AC output per kW of installed module peak power for every
    /// timestep.
    ///
    /// The sun position is evaluated in the middle of each timestep.  Values
    /// are not clipped.
    pub(crate) fn feedin(&self, settings: &ScenarioSettings, weather: &WeatherData) -> Vec<f64> {
        let half_step = Duration::seconds(settings.resolution.seconds() as i64 / 2);
        let inverter_limit = if self.inverter.pdc0 > 0.0 {
            self.inverter.paco / self.inverter.pdc0
        } else {
            f64::INFINITY
        };

        settings
            .timestamps()
            .enumerate()
            .map(|(t, time)| {
                let position = SolarPosition::at(time + half_step, self.latitude, self.longitude);
                let poa = plane_of_array(
                    &position,
                    weather.dirhi[t],
                    weather.dhi[t],
                    self.tilt,
                    self.azimuth,
                    self.albedo,
                );
                let cell_temperature =
                    weather.temperature[t] + (self.module.noct - 20.0) / 800.0 * poa;
                let dc = poa / STC_IRRADIANCE
                    * (1.0
                        + self.module.temperature_coefficient
                            * (cell_temperature - STC_TEMPERATURE));
                (dc * self.inverter.efficiency).min(inverter_limit)
            })
            .collect()
    }
}
