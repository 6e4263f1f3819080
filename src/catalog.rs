// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Lookup tables of technology characteristics and load profile archetypes,
//! keyed by model or profile name.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;

use crate::component_category::UnknownCategory;
use crate::Error;

/// Characteristics of a photovoltaic module.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PvModule {
    pub name: String,
    /// Power at standard test conditions, W.
    pub peak_power: f64,
    /// Relative power change per Kelvin of cell temperature, 1/K.
    pub temperature_coefficient: f64,
    /// Nominal operating cell temperature, °C.
    pub noct: f64,
}

/// Characteristics of a photovoltaic inverter.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PvInverter {
    pub name: String,
    pub efficiency: f64,
    /// Maximum AC output power, W.
    pub paco: f64,
    /// DC input power at which `paco` is reached, W.
    pub pdc0: f64,
}

/// One point of a wind turbine power curve.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WindTurbineRow {
    pub turbine_type: String,
    /// W.
    pub nominal_power: f64,
    /// m/s.
    pub wind_speed: f64,
    /// W.
    pub power: f64,
}

/// A wind turbine with its power curve, sorted by wind speed.
#[derive(Clone, Debug, PartialEq)]
pub struct WindTurbine {
    pub nominal_power: f64,
    pub power_curve: Vec<(f64, f64)>,
}

/// Coefficients of the characteristic equation of an absorption chiller.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AbsorptionChillerParameters {
    pub name: String,
    pub a: f64,
    pub e: f64,
    #[serde(rename = "s_E")]
    pub s_e: f64,
    #[serde(rename = "r_E")]
    pub r_e: f64,
    #[serde(rename = "s_G")]
    pub s_g: f64,
    #[serde(rename = "r_G")]
    pub r_g: f64,
}

/// A season of the standard load profiles.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Season {
    Winter,
    Summer,
    Transition,
}

impl FromStr for Season {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "winter" => Ok(Season::Winter),
            "summer" => Ok(Season::Summer),
            "transition" => Ok(Season::Transition),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A day type of the standard load profiles.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DayType {
    Workday,
    Saturday,
    Sunday,
}

impl FromStr for DayType {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "workday" => Ok(DayType::Workday),
            "saturday" => Ok(DayType::Saturday),
            "sunday" => Ok(DayType::Sunday),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// One value of an electricity standard load profile.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ElectricitySlpRow {
    pub profile: String,
    pub season: String,
    pub daytype: String,
    /// Quarter hour of the day, `0..96`.
    pub quarter: u32,
    pub value: f64,
}

/// An electricity standard load profile.
///
/// A value holds from its quarter hour until the next listed quarter hour of
/// the same season and day type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElectricityLoadProfile {
    values: HashMap<(Season, DayType), Vec<(u32, f64)>>,
}

impl ElectricityLoadProfile {
    /// Returns the profile value for the given quarter hour of the day.
    pub fn value(&self, season: Season, daytype: DayType, quarter: u32) -> Option<f64> {
        self.values
            .get(&(season, daytype))?
            .iter()
            .take_while(|(q, _)| *q <= quarter)
            .last()
            .map(|(_, v)| *v)
    }
}

/// The sigmoid and weekday parameters of a heat standard load profile.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct HeatSlpRow {
    pub profile: String,
    /// Only used for residential profiles, `0` otherwise.
    pub building_class: u8,
    pub wind_class: u8,
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "D")]
    pub d: f64,
    pub mon: f64,
    pub tue: f64,
    pub wed: f64,
    pub thu: f64,
    pub fri: f64,
    pub sat: f64,
    pub sun: f64,
}

impl HeatSlpRow {
    /// Weekday factors, starting on Monday.
    pub fn weekday_factors(&self) -> [f64; 7] {
        [
            self.mon, self.tue, self.wed, self.thu, self.fri, self.sat, self.sun,
        ]
    }
}

/// An hourly share of the daily heat demand, for days whose mean
/// temperature is at or above `temperature`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct HeatSlpHourlyRow {
    pub profile: String,
    pub temperature: f64,
    pub hour: u32,
    pub factor: f64,
}

/// Hourly factors of a heat profile, per temperature band, sorted by the
/// lower bound of the band.
pub type HourlyFactors = Vec<(f64, [f64; 24])>;

/// The rows of all catalog tables.
#[derive(Clone, Debug, Default)]
pub struct CatalogRows {
    pub pv_modules: Vec<PvModule>,
    pub pv_inverters: Vec<PvInverter>,
    pub wind_turbines: Vec<WindTurbineRow>,
    pub absorption_chillers: Vec<AbsorptionChillerParameters>,
    pub electricity_slp: Vec<ElectricitySlpRow>,
    pub heat_slp: Vec<HeatSlpRow>,
    pub heat_slp_hourly: Vec<HeatSlpHourlyRow>,
}

/// All catalogs of a scenario.
#[derive(Clone, Debug, Default)]
pub struct Catalogs {
    pv_modules: HashMap<String, PvModule>,
    pv_inverters: HashMap<String, PvInverter>,
    wind_turbines: HashMap<String, WindTurbine>,
    absorption_chillers: HashMap<String, AbsorptionChillerParameters>,
    electricity_slp: HashMap<String, ElectricityLoadProfile>,
    heat_slp: HashMap<(String, u8, u8), HeatSlpRow>,
    heat_slp_hourly: HashMap<String, HourlyFactors>,
}

impl TryFrom<CatalogRows> for Catalogs {
    type Error = Error;

    fn try_from(rows: CatalogRows) -> Result<Self, Self::Error> {
        let mut catalogs = Catalogs::default();

        for module in rows.pv_modules {
            catalogs.pv_modules.insert(module.name.clone(), module);
        }
        for inverter in rows.pv_inverters {
            catalogs.pv_inverters.insert(inverter.name.clone(), inverter);
        }
        for chiller in rows.absorption_chillers {
            catalogs
                .absorption_chillers
                .insert(chiller.name.clone(), chiller);
        }

        for point in rows.wind_turbines {
            let turbine = catalogs
                .wind_turbines
                .entry(point.turbine_type)
                .or_insert_with(|| WindTurbine {
                    nominal_power: point.nominal_power,
                    power_curve: vec![],
                });
            turbine.power_curve.push((point.wind_speed, point.power));
        }
        for turbine in catalogs.wind_turbines.values_mut() {
            turbine
                .power_curve
                .sort_by(|a, b| a.0.total_cmp(&b.0));
        }

        for row in rows.electricity_slp {
            let invalid = |e: UnknownCategory| {
                Error::invalid_table(format!("electricity_slp: profile `{}`: {e}", row.profile))
            };
            let season = row.season.parse::<Season>().map_err(invalid)?;
            let daytype = row.daytype.parse::<DayType>().map_err(invalid)?;
            if row.quarter >= 96 {
                return Err(Error::invalid_table(format!(
                    "electricity_slp: profile `{}`: quarter {} out of range",
                    row.profile, row.quarter
                )));
            }
            catalogs
                .electricity_slp
                .entry(row.profile.clone())
                .or_default()
                .values
                .entry((season, daytype))
                .or_default()
                .push((row.quarter, row.value));
        }
        for profile in catalogs.electricity_slp.values_mut() {
            for values in profile.values.values_mut() {
                values.sort_by_key(|(q, _)| *q);
            }
        }

        for row in rows.heat_slp {
            catalogs.heat_slp.insert(
                (row.profile.clone(), row.building_class, row.wind_class),
                row,
            );
        }
        for row in rows.heat_slp_hourly {
            if row.hour >= 24 {
                return Err(Error::invalid_table(format!(
                    "heat_slp_hourly: profile `{}`: hour {} out of range",
                    row.profile, row.hour
                )));
            }
            let bands = catalogs.heat_slp_hourly.entry(row.profile).or_default();
            match bands.iter_mut().find(|(t, _)| *t == row.temperature) {
                Some((_, factors)) => factors[row.hour as usize] = row.factor,
                None => {
                    let mut factors = [0.0; 24];
                    factors[row.hour as usize] = row.factor;
                    bands.push((row.temperature, factors));
                }
            }
        }
        for bands in catalogs.heat_slp_hourly.values_mut() {
            bands.sort_by(|a, b| a.0.total_cmp(&b.0));
        }

        Ok(catalogs)
    }
}

fn lookup<'a, T>(
    map: &'a HashMap<String, T>,
    label: &str,
    field: &str,
    name: &str,
) -> Result<&'a T, Error> {
    map.get(name)
        .ok_or_else(|| Error::field(label, field, format!("no catalog entry `{name}`")))
}

impl Catalogs {
    pub fn pv_module(&self, label: &str, name: &str) -> Result<&PvModule, Error> {
        lookup(&self.pv_modules, label, "Modul Model (PV ONLY)", name)
    }

    pub fn pv_inverter(&self, label: &str, name: &str) -> Result<&PvInverter, Error> {
        lookup(&self.pv_inverters, label, "Inverter Model (PV ONLY)", name)
    }

    pub fn wind_turbine(&self, label: &str, name: &str) -> Result<&WindTurbine, Error> {
        lookup(
            &self.wind_turbines,
            label,
            "Turbine Model (Windpower ONLY)",
            name,
        )
    }

    pub fn absorption_chiller(
        &self,
        label: &str,
        name: &str,
    ) -> Result<&AbsorptionChillerParameters, Error> {
        lookup(&self.absorption_chillers, label, "name (AbsCH)", name)
    }

    pub fn electricity_profile(
        &self,
        label: &str,
        profile: &str,
    ) -> Result<&ElectricityLoadProfile, Error> {
        lookup(&self.electricity_slp, label, "load profile", profile)
    }

    /// Returns the sigmoid parameters of a heat profile.  Commercial profiles
    /// are looked up with building class `0`.
    pub fn heat_profile(
        &self,
        label: &str,
        profile: &str,
        building_class: u8,
        wind_class: u8,
    ) -> Result<&HeatSlpRow, Error> {
        self.heat_slp
            .get(&(profile.to_string(), building_class, wind_class))
            .ok_or_else(|| {
                Error::field(
                    label,
                    "load profile",
                    format!(
                        "no catalog entry `{profile}` for building class {building_class} \
                         and wind class {wind_class}"
                    ),
                )
            })
    }

    pub fn heat_hourly_factors(&self, label: &str, profile: &str) -> Result<&HourlyFactors, Error> {
        lookup(&self.heat_slp_hourly, label, "load profile", profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn electricity_row(season: &str, quarter: u32, value: f64) -> ElectricitySlpRow {
        ElectricitySlpRow {
            profile: "h0".to_string(),
            season: season.to_string(),
            daytype: "workday".to_string(),
            quarter,
            value,
        }
    }

    #[test]
    fn test_electricity_profile() -> Result<(), Error> {
        let catalogs = Catalogs::try_from(CatalogRows {
            electricity_slp: vec![
                electricity_row("winter", 40, 3.0),
                electricity_row("winter", 0, 1.0),
                electricity_row("summer", 0, 2.0),
            ],
            ..Default::default()
        })?;
        let profile = catalogs.electricity_profile("house", "h0")?;
        assert_eq!(profile.value(Season::Winter, DayType::Workday, 0), Some(1.0));
        assert_eq!(profile.value(Season::Winter, DayType::Workday, 39), Some(1.0));
        assert_eq!(profile.value(Season::Winter, DayType::Workday, 95), Some(3.0));
        assert_eq!(profile.value(Season::Summer, DayType::Workday, 50), Some(2.0));
        assert_eq!(profile.value(Season::Summer, DayType::Sunday, 50), None);

        assert_eq!(
            catalogs.electricity_profile("house", "g0"),
            Err(Error::configuration(
                "house: field `load profile`: no catalog entry `g0`"
            ))
        );

        assert!(Catalogs::try_from(CatalogRows {
            electricity_slp: vec![electricity_row("spring", 0, 1.0)],
            ..Default::default()
        })
        .is_err_and(|e| e
            == Error::invalid_table(
                "electricity_slp: profile `h0`: unrecognized value `spring`"
            )));
        Ok(())
    }

    #[test]
    fn test_wind_turbine_curve() -> Result<(), Error> {
        let point = |wind_speed, power| WindTurbineRow {
            turbine_type: "E-82/2350".to_string(),
            nominal_power: 2_350_000.0,
            wind_speed,
            power,
        };
        let catalogs = Catalogs::try_from(CatalogRows {
            wind_turbines: vec![point(10.0, 2_000_000.0), point(3.0, 0.0)],
            ..Default::default()
        })?;
        let turbine = catalogs.wind_turbine("wt", "E-82/2350")?;
        assert_eq!(turbine.nominal_power, 2_350_000.0);
        assert_eq!(turbine.power_curve, vec![(3.0, 0.0), (10.0, 2_000_000.0)]);
        assert!(catalogs.wind_turbine("wt", "V90").is_err());
        Ok(())
    }

    #[test]
    fn test_heat_hourly_factors() -> Result<(), Error> {
        let row = |temperature, hour, factor| HeatSlpHourlyRow {
            profile: "efh".to_string(),
            temperature,
            hour,
            factor,
        };
        let catalogs = Catalogs::try_from(CatalogRows {
            heat_slp_hourly: vec![row(5.0, 1, 0.5), row(-15.0, 0, 0.25), row(5.0, 0, 0.75)],
            ..Default::default()
        })?;
        let bands = catalogs.heat_hourly_factors("house", "efh")?;
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].0, -15.0);
        assert_eq!(bands[1].1[0], 0.75);
        assert_eq!(bands[1].1[1], 0.5);

        assert!(Catalogs::try_from(CatalogRows {
            heat_slp_hourly: vec![row(5.0, 24, 0.5)],
            ..Default::default()
        })
        .is_err());
        Ok(())
    }
}
