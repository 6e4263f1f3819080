// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The immutable scenario context shared by all builders: time settings,
//! weather data, companion time series and catalogs.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::catalog::Catalogs;
use crate::rows::{EnergySystemRow, WeatherRow};
use crate::Error;

/// The length of a timestep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemporalResolution {
    seconds: u32,
}

impl TemporalResolution {
    pub fn from_seconds(seconds: u32) -> Self {
        Self { seconds }
    }

    pub fn hourly() -> Self {
        Self::from_seconds(3600)
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn hours(&self) -> f64 {
        self.seconds as f64 / 3600.0
    }
}

impl FromStr for TemporalResolution {
    type Err = Error;

    /// Parses frequency strings like `h`, `H`, `15min` or `s`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (count, unit) = s.split_at(split);
        let count = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().map_err(|_| {
                Error::field("energysystem", "temporal resolution", format!("invalid value `{s}`"))
            })?
        };
        let unit_seconds = match unit {
            "h" | "H" => 3600,
            "min" | "T" => 60,
            "s" | "S" => 1,
            _ => {
                return Err(Error::field(
                    "energysystem",
                    "temporal resolution",
                    format!("invalid value `{s}`"),
                ))
            }
        };
        if count == 0 {
            return Err(Error::field(
                "energysystem",
                "temporal resolution",
                format!("invalid value `{s}`"),
            ));
        }
        Ok(Self::from_seconds(count * unit_seconds))
    }
}

/// Scenario-wide time settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioSettings {
    pub start: NaiveDateTime,
    pub resolution: TemporalResolution,
    pub periods: usize,
}

impl ScenarioSettings {
    pub fn new(start: NaiveDateTime, resolution: TemporalResolution, periods: usize) -> Self {
        Self {
            start,
            resolution,
            periods,
        }
    }

    /// Parses the settings from the first row of the `energysystem` table.
    pub fn try_from_row(row: &EnergySystemRow) -> Result<Self, Error> {
        let start = NaiveDateTime::parse_from_str(&row.start_date, "%Y-%m-%d %H:%M:%S")
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(&row.start_date, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .ok_or_else(|| {
                Error::field(
                    "energysystem",
                    "start date",
                    format!("invalid value `{}`", row.start_date),
                )
            })?;
        let resolution = row.temporal_resolution.parse()?;
        if row.periods < 1.0 || row.periods.fract() != 0.0 {
            return Err(Error::field(
                "energysystem",
                "periods",
                format!("expected a positive integer, found {}", row.periods),
            ));
        }
        Ok(Self::new(start, resolution, row.periods as usize))
    }

    /// Returns the start time of every timestep.
    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        let step = Duration::seconds(self.resolution.seconds() as i64);
        (0..self.periods).map(move |t| self.start + step * t as i32)
    }

    pub fn timestep_hours(&self) -> f64 {
        self.resolution.hours()
    }
}

/// Weather data, one value per timestep.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeatherData {
    /// Diffuse horizontal irradiance, W/m².
    pub dhi: Vec<f64>,
    /// Direct horizontal irradiance, W/m².
    pub dirhi: Vec<f64>,
    /// Air pressure, Pa.
    pub pressure: Vec<f64>,
    /// Ambient temperature at 2 m, °C.
    pub temperature: Vec<f64>,
    /// Wind speed at 10 m, m/s.
    pub windspeed: Vec<f64>,
    /// Roughness length, m.
    pub z0: Vec<f64>,
    pub ground_temp: Vec<f64>,
    pub groundwater_temp: Vec<f64>,
    pub water_temp: Vec<f64>,
}

impl WeatherData {
    pub fn from_rows(rows: &[WeatherRow]) -> Self {
        let column = |f: fn(&WeatherRow) -> f64| rows.iter().map(f).collect::<Vec<_>>();
        Self {
            dhi: column(|r| r.dhi),
            dirhi: column(|r| r.dirhi),
            pressure: column(|r| r.pressure),
            temperature: column(|r| r.temperature),
            windspeed: column(|r| r.windspeed),
            z0: column(|r| r.z0),
            ground_temp: column(|r| r.ground_temp),
            groundwater_temp: column(|r| r.groundwater_temp),
            water_temp: column(|r| r.water_temp),
        }
    }

    /// Returns the number of timesteps.
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Global horizontal irradiance, the sum of direct and diffuse
    /// irradiance.
    pub fn ghi(&self) -> Vec<f64> {
        self.dirhi
            .iter()
            .zip(&self.dhi)
            .map(|(dir, diff)| dir + diff)
            .collect()
    }

    fn truncate(&mut self, periods: usize) {
        for column in [
            &mut self.dhi,
            &mut self.dirhi,
            &mut self.pressure,
            &mut self.temperature,
            &mut self.windspeed,
            &mut self.z0,
            &mut self.ground_temp,
            &mut self.groundwater_temp,
            &mut self.water_temp,
        ] {
            column.truncate(periods);
        }
    }
}

/// The companion time series table, with columns like `<label>.fix`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeriesTable {
    columns: HashMap<String, Vec<f64>>,
}

impl TimeSeriesTable {
    /// Reads a time series table from CSV data.  A `timestamp` column is
    /// ignored.
    pub fn from_csv(reader: impl std::io::Read) -> Result<Self, Error> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|e| Error::invalid_table(format!("time_series: {e}")))?
            .clone();
        let mut columns: Vec<Vec<f64>> = vec![vec![]; headers.len()];
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| Error::invalid_table(format!("time_series: {e}")))?;
            for (idx, (header, cell)) in headers.iter().zip(record.iter()).enumerate() {
                if header == "timestamp" {
                    continue;
                }
                let value = cell.trim().parse::<f64>().map_err(|_| {
                    Error::invalid_table(format!(
                        "time_series: invalid number `{cell}` in column `{header}`, row {}",
                        row + 1
                    ))
                })?;
                columns[idx].push(value);
            }
        }
        Ok(Self {
            columns: headers
                .iter()
                .zip(columns)
                .filter(|(header, _)| *header != "timestamp")
                .map(|(header, values)| (header.trim().to_string(), values))
                .collect(),
        })
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.columns.insert(name.into(), values);
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }
}

/// Everything a builder needs to know about the scenario besides its own
/// rows.
#[derive(Clone, Debug)]
pub struct ScenarioContext {
    settings: ScenarioSettings,
    weather: WeatherData,
    time_series: TimeSeriesTable,
    catalogs: Catalogs,
}

impl ScenarioContext {
    /// Creates a new context, truncating the weather data to the scenario's
    /// period count.
    ///
    /// Returns an error if there is less weather data than periods.
    pub fn try_new(
        settings: ScenarioSettings,
        mut weather: WeatherData,
        time_series: TimeSeriesTable,
        catalogs: Catalogs,
    ) -> Result<Self, Error> {
        if weather.len() < settings.periods {
            return Err(Error::invalid_table(format!(
                "weather_data: {} rows, but the scenario has {} periods",
                weather.len(),
                settings.periods
            )));
        }
        weather.truncate(settings.periods);
        Ok(Self {
            settings,
            weather,
            time_series,
            catalogs,
        })
    }

    pub fn settings(&self) -> &ScenarioSettings {
        &self.settings
    }

    pub fn periods(&self) -> usize {
        self.settings.periods
    }

    pub fn weather(&self) -> &WeatherData {
        &self.weather
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Returns the first `periods` values of the time series column
    /// `<label>.<suffix>`.
    pub fn time_series(&self, label: &str, suffix: &str) -> Result<Vec<f64>, Error> {
        let name = format!("{label}.{suffix}");
        let column = self
            .time_series
            .column(&name)
            .ok_or_else(|| Error::field(label, &name, "missing time series column"))?;
        if column.len() < self.periods() {
            return Err(Error::field(
                label,
                &name,
                format!(
                    "{} values, but the scenario has {} periods",
                    column.len(),
                    self.periods()
                ),
            ));
        }
        Ok(column[..self.periods()].to_vec())
    }
}
