// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Stochastic electricity demand of a household from simulated occupant
//! activity.
//!
//! Occupants change between active and inactive every ten minutes, with
//! hourly activity probabilities that differ between weekdays and weekends.
//! Active occupants switch on lights when it is dark and start appliances.
//! The simulation runs at a one minute resolution and is aggregated to the
//! scenario's timesteps.

use chrono::{Datelike, Duration, Timelike, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::context::ScenarioSettings;

/// Global irradiance below which active occupants use lighting, W/m².
const LIGHTING_THRESHOLD: f64 = 60.0;
/// Lighting power per active occupant, W.
const LIGHTING_POWER: f64 = 60.0;
/// Base load of devices in standby and of cold appliances, W.
const STANDBY_POWER: f64 = 85.0;
/// Minutes between occupancy transitions.
const TRANSITION_MINUTES: usize = 10;

/// Probability of an occupant being active, for every hour of the day.
const WEEKDAY_ACTIVITY: [f64; 24] = [
    0.05, 0.03, 0.03, 0.03, 0.04, 0.10, 0.45, 0.65, 0.50, 0.35, 0.35, 0.40, 0.45, 0.40, 0.35,
    0.40, 0.50, 0.65, 0.75, 0.75, 0.70, 0.60, 0.40, 0.15,
];
const WEEKEND_ACTIVITY: [f64; 24] = [
    0.10, 0.05, 0.03, 0.03, 0.03, 0.04, 0.10, 0.30, 0.55, 0.65, 0.65, 0.65, 0.65, 0.60, 0.55,
    0.55, 0.60, 0.65, 0.75, 0.75, 0.70, 0.65, 0.50, 0.25,
];

struct Appliance {
    power: f64,
    cycle_minutes: usize,
    /// Expected starts per day of a fully active household.
    starts_per_day: f64,
}

const APPLIANCES: [Appliance; 6] = [
    // cooking
    Appliance {
        power: 2000.0,
        cycle_minutes: 25,
        starts_per_day: 1.5,
    },
    // kettle
    Appliance {
        power: 2000.0,
        cycle_minutes: 3,
        starts_per_day: 3.0,
    },
    // washing machine
    Appliance {
        power: 400.0,
        cycle_minutes: 110,
        starts_per_day: 0.4,
    },
    // dishwasher
    Appliance {
        power: 1100.0,
        cycle_minutes: 60,
        starts_per_day: 0.5,
    },
    // television
    Appliance {
        power: 120.0,
        cycle_minutes: 90,
        starts_per_day: 2.0,
    },
    // computer
    Appliance {
        power: 140.0,
        cycle_minutes: 120,
        starts_per_day: 1.0,
    },
];

/// Simulates the demand of a household with the given number of occupants
/// and returns the mean power of every timestep, W.
///
/// `irradiance` is the global horizontal irradiance per timestep.  The same
/// seed always yields the same profile.
pub(crate) fn household_demand(
    occupants: usize,
    settings: &ScenarioSettings,
    irradiance: &[f64],
    seed: u64,
) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let step_seconds = settings.resolution.seconds().max(1) as usize;
    let minutes = (settings.periods * step_seconds).div_ceil(60);

    let mut active = vec![false; occupants];
    let mut remaining = vec![0usize; APPLIANCES.len()];
    let mut power_per_minute = Vec::with_capacity(minutes);

    for minute in 0..minutes {
        let time = settings.start + Duration::minutes(minute as i64);
        let step = (minute * 60 / step_seconds).min(settings.periods.saturating_sub(1));

        if minute % TRANSITION_MINUTES == 0 {
            let activity = match time.weekday() {
                Weekday::Sat | Weekday::Sun => WEEKEND_ACTIVITY,
                _ => WEEKDAY_ACTIVITY,
            };
            let probability = activity[time.hour() as usize];
            for state in active.iter_mut() {
                *state = rng.gen_bool(probability);
            }
        }
        let active_count = active.iter().filter(|a| **a).count();

        let mut power = STANDBY_POWER;
        if active_count > 0
            && irradiance.get(step).copied().unwrap_or(0.0) < LIGHTING_THRESHOLD
        {
            power += LIGHTING_POWER * active_count as f64;
        }

        let share_active = active_count as f64 / occupants.max(1) as f64;
        for (appliance, remaining) in APPLIANCES.iter().zip(remaining.iter_mut()) {
            if *remaining == 0 && active_count > 0 {
                // Starts are concentrated in the active hours of the day.
                let probability = (appliance.starts_per_day * share_active / 600.0).min(1.0);
                if rng.gen_bool(probability) {
                    *remaining = appliance.cycle_minutes;
                }
            }
            if *remaining > 0 {
                power += appliance.power;
                *remaining -= 1;
            }
        }
        power_per_minute.push(power);
    }

    (0..settings.periods)
        .map(|step| {
            let first = step * step_seconds / 60;
            let last = ((step + 1) * step_seconds).div_ceil(60).max(first + 1);
            let minutes = &power_per_minute[first.min(minutes)..last.min(minutes)];
            if minutes.is_empty() {
                STANDBY_POWER
            } else {
                minutes.iter().sum::<f64>() / minutes.len() as f64
            }
        })
        .collect()
}
