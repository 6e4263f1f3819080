// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Sinks: unfixed demands, time series, standard load profiles and the
//! stochastic residential demand.

use super::{ensure_finite, parse_category, parse_fixed, profile_of, time_series_profile};
use crate::component_category::{SinkProfile, SlpFamily};
use crate::context::ScenarioContext;
use crate::network::{Component, Flow, Profile};
use crate::physics::{load_profile, occupancy};
use crate::registry::BusRegistry;
use crate::rows::SinkRow;
use crate::{BuildConfig, Error};

/// The largest household the stochastic demand model simulates.
const MAX_OCCUPANTS: f64 = 5.0;

/// Creates the sink of a demand row.
///
/// Standard load profiles and the stochastic residential demand are scaled
/// to the row's annual demand, the other profiles to its nominal value.
pub fn create_sink(
    row: &SinkRow,
    context: &ScenarioContext,
    registry: &BusRegistry,
    config: &BuildConfig,
) -> Result<Component, Error> {
    let label = row.label.as_str();
    let input = registry.bus(label, "input", &row.input)?;
    let load_profile: SinkProfile = parse_category(label, "load profile", &row.load_profile)?;

    let flow = match &load_profile {
        SinkProfile::Unfixed => Flow::default()
            .nominal_value(row.nominal_value)
            .profile(Profile::flexible()),
        SinkProfile::Timeseries => {
            let fixed = parse_fixed(label, &row.fixed)?;
            Flow::default()
                .nominal_value(row.nominal_value)
                .profile(time_series_profile(label, fixed, context)?)
        }
        SinkProfile::Standard { code, family } => {
            let fixed = parse_fixed(label, &row.fixed)?;
            let values = standard_load_profile(row, code, *family, context)?;
            Flow::default()
                .nominal_value(row.annual_demand)
                .profile(profile_of(fixed, values))
        }
        SinkProfile::Stochastic => {
            let fixed = parse_fixed(label, &row.fixed)?;
            let (nominal_value, values) = stochastic_load_profile(row, context, config)?;
            Flow::default()
                .nominal_value(nominal_value)
                .profile(profile_of(fixed, values))
        }
    };

    tracing::info!("Created sink {label} with load profile `{load_profile}`.");
    Ok(Component::sink(label, &input, flow))
}

/// A class number of a heat load profile.
fn class_number(label: &str, field: &str, value: f64) -> Result<u8, Error> {
    if value.fract() != 0.0 || !(0.0..=u8::MAX as f64).contains(&value) {
        return Err(Error::field(
            label,
            field,
            format!("expected a class number, found {value}"),
        ));
    }
    Ok(value as u8)
}

/// A standard load profile for 1 kWh of annual demand.
fn standard_load_profile(
    row: &SinkRow,
    code: &str,
    family: SlpFamily,
    context: &ScenarioContext,
) -> Result<Vec<f64>, Error> {
    let label = row.label.as_str();
    let catalogs = context.catalogs();

    let values = match family {
        SlpFamily::Electricity => load_profile::electricity_profile(
            label,
            code,
            catalogs.electricity_profile(label, code)?,
            context.settings(),
        )?,
        SlpFamily::ResidentialHeat | SlpFamily::CommercialHeat => {
            let building_class = match family {
                SlpFamily::ResidentialHeat => {
                    class_number(label, "building class [HEAT SLP ONLY]", row.building_class)?
                }
                _ => 0,
            };
            let wind_class = class_number(label, "wind class [HEAT SLP ONLY]", row.wind_class)?;
            load_profile::heat_profile(
                catalogs.heat_profile(label, code, building_class, wind_class)?,
                catalogs.heat_hourly_factors(label, code)?,
                context.settings(),
                &context.weather().temperature,
            )
        }
    };
    ensure_finite(label, "load profile", &values)?;
    Ok(values)
}

/// Simulates a household and returns the nominal value and the profile, in
/// W, whose product has the row's annual demand as energy over the
/// scenario horizon.
fn stochastic_load_profile(
    row: &SinkRow,
    context: &ScenarioContext,
    config: &BuildConfig,
) -> Result<(f64, Vec<f64>), Error> {
    let label = row.label.as_str();
    let field = "occupants [RICHARDSON]";
    if row.occupants < 1.0 {
        return Err(Error::field(
            label,
            field,
            format!("expected at least 1 occupant, found {}", row.occupants),
        ));
    }
    let occupants = if row.occupants > MAX_OCCUPANTS {
        tracing::warn!(
            "{label}: {} occupants are more than the model supports, simulating {MAX_OCCUPANTS}.",
            row.occupants
        );
        MAX_OCCUPANTS
    } else {
        row.occupants.trunc()
    };

    // Households with the same seed would have identical demands.
    let seed = label
        .bytes()
        .fold(config.occupancy_seed, |h, b| h.rotate_left(5) ^ u64::from(b));
    let demand = occupancy::household_demand(
        occupants as usize,
        context.settings(),
        &context.weather().ghi(),
        seed,
    );
    ensure_finite(label, field, &demand)?;

    let simulated_energy =
        demand.iter().sum::<f64>() * context.settings().resolution.seconds() as f64 / 3.6e6;
    if simulated_energy <= 0.0 {
        return Err(Error::field(label, field, "simulated demand has no energy"));
    }
    let ratio = row.annual_demand / simulated_energy;
    tracing::debug!("{label}: simulated {simulated_energy:.1} kWh, scaled by {ratio:.3}.");

    Ok((0.001 * ratio, demand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ElectricitySlpRow, HeatSlpHourlyRow, HeatSlpRow};
    use crate::test_utils::{sink_row, ScenarioBuilder};

    fn registry() -> Result<BusRegistry, Error> {
        let mut registry = BusRegistry::new();
        registry.create_bus("el", true)?;
        registry.create_bus("heat", true)?;
        Ok(registry)
    }

    /// Energy of the flow over the horizon, for hourly timesteps.
    fn energy(flow: &Flow, periods: usize) -> f64 {
        (0..periods)
            .map(|t| flow.bounds_at(t).map_or(0.0, |(_, max)| max))
            .sum()
    }

    #[test]
    fn test_unfixed() -> Result<(), Error> {
        let context = ScenarioBuilder::new(4).context();
        let mut row = sink_row("demand", "x", "el");
        row.nominal_value = 50.0;
        let sink = create_sink(&row, &context, &registry()?, &BuildConfig::default())?;
        let flow = sink.input("el").expect("input flow");
        assert_eq!(flow.variable_costs, 0.0);
        assert!((0..4).all(|t| flow.bounds_at(t) == Some((0.0, 50.0))));
        Ok(())
    }

    #[test]
    fn test_timeseries() -> Result<(), Error> {
        let context = ScenarioBuilder::new(2)
            .time_series("demand.fix", vec![0.5, 1.0])
            .context();
        let mut row = sink_row("demand", "timeseries", "el");
        row.fixed = "1".to_string();
        row.nominal_value = 10.0;
        let sink = create_sink(&row, &context, &registry()?, &BuildConfig::default())?;
        let flow = sink.input("el").expect("input flow");
        assert_eq!(flow.bounds_at(0), Some((5.0, 5.0)));
        assert_eq!(flow.bounds_at(1), Some((10.0, 10.0)));
        Ok(())
    }

    #[test]
    fn test_electricity_slp() -> Result<(), Error> {
        let mut scenario = ScenarioBuilder::new(24);
        for season in ["winter", "summer", "transition"] {
            for daytype in ["workday", "saturday", "sunday"] {
                scenario = scenario.electricity_slp(ElectricitySlpRow {
                    profile: "g0".to_string(),
                    season: season.to_string(),
                    daytype: daytype.to_string(),
                    quarter: 0,
                    value: 1.0,
                });
            }
        }
        let context = scenario.context();
        let mut row = sink_row("office", "g0", "el");
        row.annual_demand = 8784.0;
        let sink = create_sink(&row, &context, &registry()?, &BuildConfig::default())?;
        let flow = sink.input("el").expect("input flow");
        assert_eq!(flow.nominal_value, Some(8784.0));
        // 2012 is a leap year, a flat profile draws 1 kW.
        let (min, max) = flow.bounds_at(5).expect("bounds");
        assert_eq!(min, 0.0);
        assert!((max - 1.0).abs() < 1e-9);

        row.load_profile = "g7".to_string();
        assert!(
            create_sink(&row, &context, &registry()?, &BuildConfig::default()).is_err_and(
                |e| e
                    == Error::configuration(
                        "office: field `load profile`: unrecognized value `g7`"
                    )
            )
        );
        Ok(())
    }

    #[test]
    fn test_heat_slp() -> Result<(), Error> {
        let mut scenario = ScenarioBuilder::new(48).heat_slp(HeatSlpRow {
            profile: "efh".to_string(),
            building_class: 3,
            wind_class: 1,
            a: 1.6,
            b: -37.2,
            c: 5.7,
            d: 0.1,
            mon: 1.0,
            tue: 1.0,
            wed: 1.0,
            thu: 1.0,
            fri: 1.0,
            sat: 1.0,
            sun: 1.0,
        });
        for hour in 0..24 {
            scenario = scenario.heat_slp_hourly(HeatSlpHourlyRow {
                profile: "efh".to_string(),
                temperature: -15.0,
                hour,
                factor: 1.0,
            });
        }
        let context = scenario.context();
        let mut row = sink_row("house", "efh", "heat");
        row.annual_demand = 20_000.0;
        row.building_class = 3.0;
        row.wind_class = 1.0;
        let sink = create_sink(&row, &context, &registry()?, &BuildConfig::default())?;
        let flow = sink.input("heat").expect("input flow");
        assert!((energy(flow, 48) - 20_000.0).abs() < 1e-6);

        row.building_class = 4.0;
        assert!(
            create_sink(&row, &context, &registry()?, &BuildConfig::default()).is_err_and(
                |e| e
                    == Error::configuration(
                        "house: field `load profile`: no catalog entry `efh` for building \
                         class 4 and wind class 1"
                    )
            )
        );
        Ok(())
    }

    #[test]
    fn test_stochastic() -> Result<(), Error> {
        let context = ScenarioBuilder::new(48).context();
        let registry = registry()?;
        let config = BuildConfig::default();
        let mut row = sink_row("household", "richardson", "el");
        row.annual_demand = 3000.0;

        for occupants in [1.0, 3.0, 5.0, 8.0] {
            row.occupants = occupants;
            let sink = create_sink(&row, &context, &registry, &config)?;
            let flow = sink.input("el").expect("input flow");
            let energy = energy(flow, 48);
            assert!((energy - 3000.0).abs() < 1e-6, "{occupants}: {energy}");
        }

        row.occupants = 0.0;
        assert!(
            create_sink(&row, &context, &registry, &config).is_err_and(|e| e
                == Error::configuration(
                    "household: field `occupants [RICHARDSON]`: expected at least 1 occupant, \
                     found 0"
                ))
        );
        Ok(())
    }
}
