// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Loading a scenario from a directory of CSV tables.

use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::catalog::{CatalogRows, Catalogs};
use crate::context::{ScenarioContext, ScenarioSettings, TimeSeriesTable, WeatherData};
use crate::rows::{
    BusRow, EnergySystemRow, LinkRow, SinkRow, SourceRow, StorageRow, TransformerRow, WeatherRow,
};
use crate::Error;

/// All tables of a scenario, as typed rows.
#[derive(Clone, Debug, Default)]
pub struct Scenario {
    pub energy_system: EnergySystemRow,
    pub buses: Vec<BusRow>,
    pub sources: Vec<SourceRow>,
    pub sinks: Vec<SinkRow>,
    pub transformers: Vec<TransformerRow>,
    pub storages: Vec<StorageRow>,
    pub links: Vec<LinkRow>,
    pub time_series: TimeSeriesTable,
    pub weather: Vec<WeatherRow>,
    pub catalogs: CatalogRows,
}

impl Scenario {
    /// Reads a scenario from the CSV files in `dir`, one file per table.
    ///
    /// `energysystem.csv` and `buses.csv` are required. Every other table is
    /// empty when its file is missing.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref();

        let energy_system = read_table::<EnergySystemRow>(dir, "energysystem", true)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid_table("energysystem: the table has no rows"))?;

        let time_series_path = dir.join("time_series.csv");
        let time_series = if time_series_path.exists() {
            let file = File::open(&time_series_path)
                .map_err(|e| Error::invalid_table(format!("time_series: {e}")))?;
            TimeSeriesTable::from_csv(file)?
        } else {
            TimeSeriesTable::default()
        };

        let scenario = Self {
            energy_system,
            buses: read_table(dir, "buses", true)?,
            sources: read_table(dir, "sources", false)?,
            sinks: read_table(dir, "demand", false)?,
            transformers: read_table(dir, "transformers", false)?,
            storages: read_table(dir, "storages", false)?,
            links: read_table(dir, "links", false)?,
            time_series,
            weather: read_table(dir, "weather_data", false)?,
            catalogs: CatalogRows {
                pv_modules: read_table(dir, "pv_modules", false)?,
                pv_inverters: read_table(dir, "pv_inverters", false)?,
                wind_turbines: read_table(dir, "wind_turbines", false)?,
                absorption_chillers: read_table(dir, "characteristic_parameters", false)?,
                electricity_slp: read_table(dir, "electricity_slp", false)?,
                heat_slp: read_table(dir, "heat_slp", false)?,
                heat_slp_hourly: read_table(dir, "heat_slp_hourly", false)?,
            },
        };

        tracing::info!(
            "Loaded scenario from {}: {} buses, {} sources, {} sinks, {} transformers, \
             {} storages, {} links.",
            dir.display(),
            scenario.buses.len(),
            scenario.sources.len(),
            scenario.sinks.len(),
            scenario.transformers.len(),
            scenario.storages.len(),
            scenario.links.len(),
        );
        Ok(scenario)
    }

    /// Resolves the scenario settings, weather data, time series and
    /// catalogs shared by all builders.
    pub fn context(&self) -> Result<ScenarioContext, Error> {
        let settings = ScenarioSettings::try_from_row(&self.energy_system)?;
        ScenarioContext::try_new(
            settings,
            WeatherData::from_rows(&self.weather),
            self.time_series.clone(),
            Catalogs::try_from(self.catalogs.clone())?,
        )
    }
}

fn read_table<T>(dir: &Path, table: &str, required: bool) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    let path = dir.join(format!("{table}.csv"));
    if !path.exists() {
        if required {
            return Err(Error::invalid_table(format!(
                "{table}: missing file {}",
                path.display()
            )));
        }
        tracing::debug!("{table}: no table found, using an empty one.");
        return Ok(vec![]);
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(&path)
        .map_err(|e| Error::invalid_table(format!("{table}: {e}")))?;
    reader
        .deserialize()
        .enumerate()
        .map(|(row, record)| {
            record.map_err(|e| Error::invalid_table(format!("{table}: row {}: {e}", row + 1)))
        })
        .collect()
}
