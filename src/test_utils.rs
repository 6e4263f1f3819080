// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by the tests of all builders:
//!
//! - row constructors with the fields every row of a kind needs,
//! - the `ScenarioBuilder`, which can declaratively build scenarios for use
//!   in tests.

use chrono::NaiveDate;

use crate::catalog::{
    AbsorptionChillerParameters, ElectricitySlpRow, HeatSlpHourlyRow, HeatSlpRow, PvInverter,
    PvModule, WindTurbineRow,
};
use crate::context::ScenarioContext;
use crate::rows::{
    BusRow, EnergySystemRow, LinkRow, SinkRow, SourceRow, StorageRow, TransformerRow, WeatherRow,
};
use crate::scenario::Scenario;

/// An active, unfixed source row.
pub(crate) fn source_row(label: &str, technology: &str, output: &str) -> SourceRow {
    SourceRow {
        label: label.to_string(),
        active: true,
        fixed: "0".to_string(),
        technology: technology.to_string(),
        output: output.to_string(),
        ..Default::default()
    }
}

/// An active, unfixed sink row.
pub(crate) fn sink_row(label: &str, load_profile: &str, input: &str) -> SinkRow {
    SinkRow {
        label: label.to_string(),
        active: true,
        fixed: "0".to_string(),
        input: input.to_string(),
        load_profile: load_profile.to_string(),
        ..Default::default()
    }
}

pub(crate) fn transformer_row(
    label: &str,
    transformer_type: &str,
    input: &str,
    output: &str,
) -> TransformerRow {
    TransformerRow {
        label: label.to_string(),
        active: true,
        transformer_type: transformer_type.to_string(),
        input: input.to_string(),
        output: output.to_string(),
        ..Default::default()
    }
}

pub(crate) fn storage_row(label: &str, storage_type: &str, bus: &str) -> StorageRow {
    StorageRow {
        label: label.to_string(),
        active: true,
        storage_type: storage_type.to_string(),
        bus: bus.to_string(),
        ..Default::default()
    }
}

pub(crate) fn link_row(label: &str, bus_1: &str, bus_2: &str, directedness: &str) -> LinkRow {
    LinkRow {
        label: label.to_string(),
        active: true,
        bus_1: bus_1.to_string(),
        bus_2: bus_2.to_string(),
        directedness: directedness.to_string(),
        efficiency: 1.0,
        ..Default::default()
    }
}

/// A builder for creating scenarios easily, for use in tests.
///
/// Scenarios start on 2012-01-01 at hourly resolution, with mild and calm
/// weather and sunshine from 8:00 to 17:00.
pub(crate) struct ScenarioBuilder {
    scenario: Scenario,
}

impl ScenarioBuilder {
    /// Creates a new `ScenarioBuilder` with the given number of hourly
    /// periods.
    pub(crate) fn new(periods: usize) -> Self {
        let weather = (0..periods)
            .map(|t| {
                let sunny = (8..17).contains(&(t % 24));
                WeatherRow {
                    dhi: if sunny { 100.0 } else { 0.0 },
                    dirhi: if sunny { 300.0 } else { 0.0 },
                    pressure: 101325.0,
                    temperature: 10.0,
                    windspeed: 5.0,
                    z0: 0.1,
                    ground_temp: 10.0,
                    groundwater_temp: 10.0,
                    water_temp: 10.0,
                }
            })
            .collect();
        let start = NaiveDate::from_ymd_opt(2012, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();

        ScenarioBuilder {
            scenario: Scenario {
                energy_system: EnergySystemRow {
                    start_date: start.format("%Y-%m-%d %H:%M:%S").to_string(),
                    temporal_resolution: "h".to_string(),
                    periods: periods as f64,
                },
                weather,
                ..Default::default()
            },
        }
    }

    /// Adds an active bus without excess or shortage.
    pub(crate) fn bus(mut self, label: &str) -> Self {
        self.scenario.buses.push(BusRow {
            label: label.to_string(),
            active: true,
            ..Default::default()
        });
        self
    }

    pub(crate) fn source(mut self, row: SourceRow) -> Self {
        self.scenario.sources.push(row);
        self
    }

    pub(crate) fn sink(mut self, row: SinkRow) -> Self {
        self.scenario.sinks.push(row);
        self
    }

    pub(crate) fn transformer(mut self, row: TransformerRow) -> Self {
        self.scenario.transformers.push(row);
        self
    }

    pub(crate) fn storage(mut self, row: StorageRow) -> Self {
        self.scenario.storages.push(row);
        self
    }

    pub(crate) fn link(mut self, row: LinkRow) -> Self {
        self.scenario.links.push(row);
        self
    }

    /// Adds a column to the time series table.
    pub(crate) fn time_series(mut self, name: &str, values: Vec<f64>) -> Self {
        self.scenario.time_series.insert(name, values);
        self
    }

    /// Edits the weather row of every timestep.
    pub(crate) fn weather_column<F>(mut self, mut edit: F) -> Self
    where
        F: FnMut(&mut WeatherRow, usize),
    {
        for (t, row) in self.scenario.weather.iter_mut().enumerate() {
            edit(row, t);
        }
        self
    }

    pub(crate) fn pv_module(mut self, module: PvModule) -> Self {
        self.scenario.catalogs.pv_modules.push(module);
        self
    }

    pub(crate) fn pv_inverter(mut self, inverter: PvInverter) -> Self {
        self.scenario.catalogs.pv_inverters.push(inverter);
        self
    }

    /// Adds a wind turbine with the given power curve, in m/s and W.
    pub(crate) fn wind_turbine(
        mut self,
        turbine_type: &str,
        nominal_power: f64,
        power_curve: &[(f64, f64)],
    ) -> Self {
        self.scenario
            .catalogs
            .wind_turbines
            .extend(power_curve.iter().map(|&(wind_speed, power)| WindTurbineRow {
                turbine_type: turbine_type.to_string(),
                nominal_power,
                wind_speed,
                power,
            }));
        self
    }

    pub(crate) fn absorption_chiller(mut self, chiller: AbsorptionChillerParameters) -> Self {
        self.scenario.catalogs.absorption_chillers.push(chiller);
        self
    }

    pub(crate) fn electricity_slp(mut self, row: ElectricitySlpRow) -> Self {
        self.scenario.catalogs.electricity_slp.push(row);
        self
    }

    pub(crate) fn heat_slp(mut self, row: HeatSlpRow) -> Self {
        self.scenario.catalogs.heat_slp.push(row);
        self
    }

    pub(crate) fn heat_slp_hourly(mut self, row: HeatSlpHourlyRow) -> Self {
        self.scenario.catalogs.heat_slp_hourly.push(row);
        self
    }

    pub(crate) fn build(self) -> Scenario {
        self.scenario
    }

    /// Builds the scenario and resolves its context.
    pub(crate) fn context(self) -> ScenarioContext {
        self.scenario.context().unwrap()
    }
}
