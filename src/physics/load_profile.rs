// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Standard load profiles for electricity and heat demand.
//!
//! Both profiles are returned as power per timestep, normalized so that their
//! energy is 1 kWh: over the calendar year of the scenario start for
//! electricity, over the scenario horizon for heat.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::catalog::{DayType, ElectricityLoadProfile, HeatSlpRow, HourlyFactors, Season};
use crate::context::ScenarioSettings;
use crate::Error;

const QUARTER_SECONDS: u32 = 900;

pub(crate) fn season(date: NaiveDate) -> Season {
    match (date.month(), date.day()) {
        (11..=12, _) | (1..=2, _) | (3, 1..=20) => Season::Winter,
        (5, 15..) | (6..=8, _) | (9, 1..=14) => Season::Summer,
        _ => Season::Transition,
    }
}

/// Day type with the nationwide German holidays treated as Sundays, and
/// Christmas Eve and New Year's Eve treated as Saturdays.
pub(crate) fn day_type(date: NaiveDate) -> DayType {
    match (date.month(), date.day(), date.weekday()) {
        (1, 1, _) | (5, 1, _) | (10, 3, _) | (12, 25, _) | (12, 26, _) | (_, _, Weekday::Sun) => {
            DayType::Sunday
        }
        (12, 24, _) | (12, 31, _) | (_, _, Weekday::Sat) => DayType::Saturday,
        _ => DayType::Workday,
    }
}

/// Seasonal scaling of the household profile `h0`, by day of the year.
pub(crate) fn h0_dynamization(day_of_year: u32) -> f64 {
    let t = day_of_year as f64;
    -3.916e-10 * t.powi(4) + 3.2e-7 * t.powi(3) - 7.02e-5 * t.powi(2) + 0.0021 * t + 1.24
}

fn quarter_value(
    label: &str,
    code: &str,
    profile: &ElectricityLoadProfile,
    time: NaiveDateTime,
) -> Result<f64, Error> {
    let date = time.date();
    let (season, day_type) = (season(date), day_type(date));
    let quarter = time.hour() * 4 + time.minute() / 15;
    let value = profile.value(season, day_type, quarter).ok_or_else(|| {
        Error::field(
            label,
            "load profile",
            format!("`{code}` has no values for {season:?} {day_type:?}"),
        )
    })?;
    if code == "h0" {
        Ok(value * h0_dynamization(date.ordinal()))
    } else {
        Ok(value)
    }
}

/// Returns an electricity standard load profile resampled to the scenario's
/// timesteps.
pub(crate) fn electricity_profile(
    label: &str,
    code: &str,
    profile: &ElectricityLoadProfile,
    settings: &ScenarioSettings,
) -> Result<Vec<f64>, Error> {
    let year = settings.start.year();
    let quarter = Duration::seconds(QUARTER_SECONDS as i64);

    let mut annual_energy = 0.0;
    let mut day = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::internal(format!("Invalid year: {year}")))?;
    while day.year() == year {
        for q in 0..96 {
            annual_energy += quarter_value(label, code, profile, day + quarter * q)? * 0.25;
        }
        day += Duration::days(1);
    }
    if annual_energy <= 0.0 {
        return Err(Error::field(
            label,
            "load profile",
            format!("`{code}` has no energy in {year}"),
        ));
    }

    let quarters_per_step = (settings.resolution.seconds() / QUARTER_SECONDS).max(1);
    settings
        .timestamps()
        .map(|time| {
            let mut sum = 0.0;
            for q in 0..quarters_per_step {
                sum += quarter_value(label, code, profile, time + quarter * q as i32)?;
            }
            Ok(sum / quarters_per_step as f64 / annual_energy)
        })
        .collect()
}

/// Daily heat demand factor from the allocation temperature.
fn sigmoid(params: &HeatSlpRow, temperature: f64) -> f64 {
    params.a / (1.0 + (params.b / (temperature - 40.0)).powf(params.c)) + params.d
}

/// Returns a heat standard load profile for the scenario's timesteps, driven
/// by the ambient temperature of every timestep.
pub(crate) fn heat_profile(
    params: &HeatSlpRow,
    hourly: &HourlyFactors,
    settings: &ScenarioSettings,
    temperature: &[f64],
) -> Vec<f64> {
    let timestamps = settings.timestamps().collect::<Vec<_>>();

    // Mean temperature of every calendar day touched by the scenario.
    let mut days: Vec<(NaiveDate, f64, usize)> = vec![];
    let mut day_of_step = Vec::with_capacity(timestamps.len());
    for (time, temp) in timestamps.iter().zip(temperature) {
        match days.last_mut() {
            Some((date, sum, count)) if *date == time.date() => {
                *sum += temp;
                *count += 1;
            }
            _ => days.push((time.date(), *temp, 1)),
        }
        day_of_step.push(days.len() - 1);
    }
    let daily_means = days
        .iter()
        .map(|(_, sum, count)| sum / *count as f64)
        .collect::<Vec<_>>();

    let weekday_factors = params.weekday_factors();
    let daily_demand = days
        .iter()
        .enumerate()
        .map(|(i, (date, _, _))| {
            let past = |k: usize| daily_means[i.saturating_sub(k)];
            let allocation =
                (past(0) + 0.5 * past(1) + 0.25 * past(2) + 0.125 * past(3)) / 1.875;
            sigmoid(params, allocation)
                * weekday_factors[date.weekday().num_days_from_monday() as usize]
        })
        .collect::<Vec<_>>();

    let values = timestamps
        .iter()
        .zip(&day_of_step)
        .map(|(time, &day)| {
            let mean = daily_means[day];
            let band = hourly
                .iter()
                .rev()
                .find(|(lower, _)| *lower <= mean)
                .or_else(|| hourly.first());
            let factor = band.map_or(0.0, |(_, factors)| factors[time.hour() as usize]);
            daily_demand[day] * factor
        })
        .collect::<Vec<_>>();

    let energy = values.iter().sum::<f64>() * settings.timestep_hours();
    if energy > 0.0 {
        values.into_iter().map(|v| v / energy).collect()
    } else {
        values
    }
}
