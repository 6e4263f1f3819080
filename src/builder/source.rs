// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Sources: commodities, time series, photovoltaic, wind power and solar
//! thermal collectors.

use std::collections::BTreeMap;

use super::{ensure_finite, full_load_hours, parse_category, parse_fixed, profile_of};
use crate::component_category::{SolarCollector, SourceTechnology};
use crate::context::ScenarioContext;
use crate::network::{BusRef, Component, Flow, NodeKind, Profile, Series};
use crate::physics::photovoltaic::PvSystem;
use crate::physics::solar_thermal::{collector_heat, CollectorParameters};
use crate::physics::{clip_unit_interval, wind};
use crate::registry::BusRegistry;
use crate::rows::SourceRow;
use crate::Error;

/// Creates the components of a source row.
///
/// Solar thermal collectors also create an auxiliary bus `<label>_bus` and a
/// transformer `<label>_collector` that models the collector's electricity
/// consumption and peripheral losses.  All other technologies create a
/// single source.
pub fn create_source(
    row: &SourceRow,
    context: &ScenarioContext,
    registry: &mut BusRegistry,
) -> Result<Vec<Component>, Error> {
    let label = row.label.as_str();
    let technology: SourceTechnology = parse_category(label, "technology", &row.technology)?;
    let output = registry.bus(label, "output", &row.output)?;

    let components = match technology {
        SourceTechnology::Commodity => {
            vec![source_component(row, Profile::flexible(), &output)]
        }
        SourceTechnology::Timeseries => {
            let fixed = parse_fixed(label, &row.fixed)?;
            let profile = super::time_series_profile(label, fixed, context)?;
            vec![source_component(row, profile, &output)]
        }
        SourceTechnology::Photovoltaic => {
            let fixed = parse_fixed(label, &row.fixed)?;
            let feedin = photovoltaic_feedin(row, context)?;
            vec![source_component(row, profile_of(fixed, feedin), &output)]
        }
        SourceTechnology::Windpower => {
            let fixed = parse_fixed(label, &row.fixed)?;
            let feedin = wind_feedin(row, context)?;
            vec![source_component(row, profile_of(fixed, feedin), &output)]
        }
        SourceTechnology::SolarThermal(collector) => {
            let fixed = parse_fixed(label, &row.fixed)?;
            solar_thermal_components(row, collector, fixed, &output, context, registry)?
        }
    };

    for component in &components {
        tracing::info!("Created {} {}.", technology, component.label());
    }
    Ok(components)
}

/// A source that feeds `output` with the row's costs and investment
/// parameters.
fn source_component(row: &SourceRow, profile: Profile, output: &BusRef) -> Component {
    Component::source(
        &row.label,
        output,
        Flow::with_costs(row.variable_costs, row.variable_constraint_costs)
            .profile(profile)
            .investment(row.investment()),
    )
}

fn photovoltaic_feedin(row: &SourceRow, context: &ScenarioContext) -> Result<Vec<f64>, Error> {
    let catalogs = context.catalogs();
    let system = PvSystem {
        module: catalogs.pv_module(&row.label, &row.pv_module)?,
        inverter: catalogs.pv_inverter(&row.label, &row.pv_inverter)?,
        tilt: row.pv_tilt,
        azimuth: row.pv_azimuth,
        albedo: row.pv_albedo,
        latitude: row.pv_latitude,
        longitude: row.pv_longitude,
    };
    let feedin = clip_unit_interval(system.feedin(context.settings(), context.weather()));
    tracing::debug!(
        "{}: {:.0} full load hours.",
        row.label,
        full_load_hours(&feedin, context)
    );
    Ok(feedin)
}

fn wind_feedin(row: &SourceRow, context: &ScenarioContext) -> Result<Vec<f64>, Error> {
    let turbine = context
        .catalogs()
        .wind_turbine(&row.label, &row.turbine_model)?;
    let feedin = wind::feedin(turbine, row.hub_height, context.weather());
    ensure_finite(&row.label, "Turbine Model (Windpower ONLY)", &feedin)?;
    let feedin = clip_unit_interval(feedin);
    tracing::debug!(
        "{}: {:.0} full load hours.",
        row.label,
        full_load_hours(&feedin, context)
    );
    Ok(feedin)
}

/// The auxiliary collector bus, the collector source on it, and the
/// transformer that moves the collected heat to the output bus.
fn solar_thermal_components(
    row: &SourceRow,
    collector: SolarCollector,
    fixed: bool,
    output: &BusRef,
    context: &ScenarioContext,
    registry: &mut BusRegistry,
) -> Result<Vec<Component>, Error> {
    let label = row.label.as_str();
    let input = registry.bus(label, "input", &row.input)?;

    let params = CollectorParameters {
        latitude: row.collector_latitude,
        longitude: row.collector_longitude,
        tilt: row.collector_tilt,
        azimuth: row.collector_azimuth,
        eta_0: row.eta_0,
        a_1: row.a_1,
        a_2: row.a_2,
        c_1: row.c_1,
        c_2: row.c_2,
        cleanliness: row.cleanliness,
        temperature_inlet: row.temperature_inlet,
        temperature_difference: row.temperature_difference,
    };
    let heat = clip_unit_interval(collector_heat(
        collector,
        &params,
        context.settings(),
        context.weather(),
    ));
    tracing::debug!(
        "{label}: collector heat of {:.1} kWh/m².",
        full_load_hours(&heat, context)
    );

    let collector_bus = registry
        .create_bus(&format!("{label}_bus"), true)?
        .ok_or_else(|| Error::internal(format!("{label}: collector bus was not created.")))?;

    // Collector capacities are areas, the row gives them in kW.
    let source = Component::source(
        label,
        &collector_bus,
        Flow::with_costs(row.variable_costs, row.variable_constraint_costs)
            .profile(profile_of(fixed, heat))
            .investment(row.investment().scaled(row.area_per_kw)),
    );

    let losses = row.peripheral_losses;
    let conversion_factors = BTreeMap::from([
        (collector_bus.label().to_string(), Series::Scalar(1.0)),
        (
            input.label().to_string(),
            Series::Scalar(row.electric_consumption * (1.0 - losses)),
        ),
        (output.label().to_string(), Series::Scalar(1.0 - losses)),
    ]);
    let transformer = Component::new(
        format!("{label}_collector"),
        NodeKind::Transformer { conversion_factors },
    )
    .with_input(&collector_bus, Flow::default())
    .with_input(&input, Flow::default())
    .with_output(output, Flow::default());

    Ok(vec![source, transformer])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PvInverter, PvModule};
    use crate::test_utils::{source_row, ScenarioBuilder};

    fn registry_with(buses: &[&str]) -> Result<BusRegistry, Error> {
        let mut registry = BusRegistry::new();
        for bus in buses {
            registry.create_bus(bus, true)?;
        }
        Ok(registry)
    }

    #[test]
    fn test_commodity() -> Result<(), Error> {
        let context = ScenarioBuilder::new(3).context();
        let mut registry = registry_with(&["gas"])?;
        let mut row = source_row("gas_import", "other", "gas");
        row.variable_costs = 0.07;
        row.variable_constraint_costs = 0.2;
        row.max_investment_capacity = 100.0;

        let components = create_source(&row, &context, &mut registry)?;
        assert_eq!(components.len(), 1);
        let flow = components[0].output("gas").expect("output flow");
        assert_eq!(flow.profile, Some(Profile::flexible()));
        assert_eq!((flow.variable_costs, flow.emission_factor), (0.07, 0.2));
        assert_eq!(flow.investment, Some(row.investment()));
        Ok(())
    }

    #[test]
    fn test_timeseries() -> Result<(), Error> {
        let context = ScenarioBuilder::new(3)
            .time_series("import.fix", vec![0.1, 0.2, 0.3])
            .time_series("import.min", vec![0.0, 0.1, 0.2])
            .time_series("import.max", vec![0.5, 0.6, 0.7])
            .context();
        let mut registry = registry_with(&["el"])?;
        let mut row = source_row("import", "timeseries", "el");

        row.fixed = "1".to_string();
        let components = create_source(&row, &context, &mut registry)?;
        assert_eq!(
            components[0].output("el").and_then(|f| f.profile.clone()),
            Some(Profile::Fixed(vec![0.1, 0.2, 0.3].into()))
        );

        row.fixed = "0".to_string();
        let components = create_source(&row, &context, &mut registry)?;
        assert_eq!(
            components[0].output("el").and_then(|f| f.profile.clone()),
            Some(Profile::Bounded {
                min: vec![0.0, 0.1, 0.2].into(),
                max: vec![0.5, 0.6, 0.7].into(),
            })
        );

        row.fixed = "yes".to_string();
        assert!(create_source(&row, &context, &mut registry).is_err_and(|e| e
            == Error::configuration("import: field `fixed`: expected `0` or `1`, found `yes`")));

        let row = source_row("other_import", "timeseries", "el");
        assert!(create_source(&row, &context, &mut registry).is_err_and(|e| e
            == Error::configuration(
                "other_import: field `other_import.min`: missing time series column"
            )));
        Ok(())
    }

    #[test]
    fn test_unknown_technology() -> Result<(), Error> {
        let context = ScenarioBuilder::new(3).context();
        let mut registry = registry_with(&["el"])?;
        let row = source_row("geo", "geothermal", "el");
        assert!(create_source(&row, &context, &mut registry).is_err_and(|e| e
            == Error::configuration("geo: field `technology`: unrecognized value `geothermal`")));
        Ok(())
    }

    #[test]
    fn test_photovoltaic() -> Result<(), Error> {
        let context = ScenarioBuilder::new(24)
            .pv_module(PvModule {
                name: "mono".to_string(),
                peak_power: 300.0,
                temperature_coefficient: -0.004,
                noct: 45.0,
            })
            .pv_inverter(PvInverter {
                name: "inv".to_string(),
                efficiency: 0.96,
                paco: 250.0,
                pdc0: 260.0,
            })
            .context();
        let mut registry = registry_with(&["el"])?;
        let mut row = source_row("pv", "photovoltaic", "el");
        row.pv_module = "mono".to_string();
        row.pv_inverter = "inv".to_string();
        row.pv_tilt = 30.0;
        row.pv_azimuth = 180.0;
        row.pv_latitude = 52.0;
        row.pv_longitude = 7.6;
        row.pv_albedo = 0.18;

        let components = create_source(&row, &context, &mut registry)?;
        let Some(Profile::Bounded { max, .. }) =
            components[0].output("el").and_then(|f| f.profile.clone())
        else {
            panic!("expected a bounded profile");
        };
        let Series::Values(values) = max else {
            panic!("expected a time series");
        };
        assert_eq!(values.len(), 24);
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        // Midnight and noon in January in Germany.
        assert_eq!(values[0], 0.0);
        assert!(values[11] > 0.0);

        row.pv_module = "poly".to_string();
        assert!(create_source(&row, &context, &mut registry).is_err_and(|e| e
            == Error::configuration(
                "pv: field `Modul Model (PV ONLY)`: no catalog entry `poly`"
            )));
        Ok(())
    }

    #[test]
    fn test_solar_thermal() -> Result<(), Error> {
        let context = ScenarioBuilder::new(24).context();
        let mut registry = registry_with(&["heat", "el"])?;
        let mut row = source_row("st", "solar_thermal_flat_plate", "heat");
        row.input = "el".to_string();
        row.max_investment_capacity = 10.0;
        row.area_per_kw = 1.5;
        row.peripheral_losses = 0.05;
        row.electric_consumption = 0.02;
        row.eta_0 = 0.8;
        row.a_1 = 3.0;
        row.a_2 = 0.01;
        row.temperature_inlet = 40.0;
        row.temperature_difference = 15.0;
        row.collector_tilt = 30.0;
        row.collector_azimuth = 180.0;
        row.collector_latitude = 52.0;
        row.collector_longitude = 7.6;

        let components = create_source(&row, &context, &mut registry)?;
        assert_eq!(components.len(), 2);
        assert_eq!(registry.bus("st", "output", "st_bus")?.label(), "st_bus");

        let source = &components[0];
        assert_eq!(source.label(), "st");
        let flow = source.output("st_bus").expect("collector flow");
        let investment = flow.investment.clone().expect("collector investment");
        assert_eq!(investment.maximum, 15.0);
        if let Some(Profile::Bounded {
            max: Series::Values(values),
            ..
        }) = &flow.profile
        {
            assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        } else {
            panic!("expected a bounded profile");
        }

        let collector = &components[1];
        assert_eq!(collector.label(), "st_collector");
        let NodeKind::Transformer { conversion_factors } = collector.node.kind() else {
            panic!("expected a transformer");
        };
        assert_eq!(conversion_factors["st_bus"], Series::Scalar(1.0));
        assert_eq!(conversion_factors["el"], Series::Scalar(0.02 * 0.95));
        assert_eq!(conversion_factors["heat"], Series::Scalar(0.95));
        assert!(collector.input("st_bus").is_some());
        assert!(collector.input("el").is_some());
        assert!(collector.output("heat").is_some());
        Ok(())
    }

    #[test]
    fn test_windpower() -> Result<(), Error> {
        let context = ScenarioBuilder::new(4)
            .weather_column(|w, t| w.windspeed = [0.0, 5.0, 12.0, 40.0][t])
            .wind_turbine(
                "E-82/2300",
                2_300_000.0,
                &[(0.0, 0.0), (3.0, 0.0), (10.0, 2_300_000.0), (25.0, 2_300_000.0)],
            )
            .context();
        let mut registry = registry_with(&["el"])?;
        let mut row = source_row("wt", "windpower", "el");
        row.fixed = "1".to_string();
        row.turbine_model = "E-82/2300".to_string();
        row.hub_height = 100.0;

        let components = create_source(&row, &context, &mut registry)?;
        assert_eq!(components.len(), 1);
        let Some(Profile::Fixed(Series::Values(values))) =
            components[0].output("el").and_then(|f| f.profile.clone())
        else {
            panic!("expected a fixed profile");
        };
        assert_eq!(values.len(), 4);
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        // Calm, partial load, rated power and cut-out.
        assert_eq!(values[0], 0.0);
        assert!(values[1] > 0.0 && values[1] < 1.0);
        assert!((values[2] - 1.0).abs() < 1e-12);
        assert_eq!(values[3], 0.0);

        row.turbine_model = "V90".to_string();
        assert!(create_source(&row, &context, &mut registry).is_err_and(|e| e
            == Error::configuration(
                "wt: field `Turbine Model (Windpower ONLY)`: no catalog entry `V90`"
            )));
        Ok(())
    }

    #[test]
    fn test_concentrated_solar_power() -> Result<(), Error> {
        let context = ScenarioBuilder::new(24)
            .weather_column(|w, t| {
                if t == 12 {
                    w.dirhi = 3000.0;
                }
            })
            .context();
        let mut registry = registry_with(&["heat", "el"])?;
        let mut row = source_row("csp", "concentrated_solar_power", "heat");
        row.input = "el".to_string();
        row.area_per_kw = 2.0;
        row.max_investment_capacity = 5.0;
        row.peripheral_losses = 0.1;
        row.electric_consumption = 0.01;
        row.eta_0 = 0.75;
        row.a_1 = 0.001;
        row.a_2 = 0.0001;
        row.c_1 = 0.1;
        row.c_2 = 0.001;
        row.cleanliness = 0.9;
        row.temperature_inlet = 40.0;
        row.temperature_difference = 15.0;
        row.collector_tilt = 30.0;
        row.collector_azimuth = 180.0;
        row.collector_latitude = 52.0;
        row.collector_longitude = 7.6;

        let components = create_source(&row, &context, &mut registry)?;
        assert_eq!(
            components.iter().map(|c| c.label()).collect::<Vec<_>>(),
            vec!["csp", "csp_collector"]
        );
        assert_eq!(registry.bus("csp", "output", "csp_bus")?.label(), "csp_bus");

        let flow = components[0].output("csp_bus").expect("collector flow");
        assert_eq!(flow.investment.as_ref().map(|i| i.maximum), Some(10.0));
        let Some(Profile::Bounded {
            max: Series::Values(values),
            ..
        }) = &flow.profile
        else {
            panic!("expected a bounded profile");
        };
        assert_eq!(values.len(), 24);
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        // Night, a regular noon hour, and an irradiance peak clipped to 1.
        assert_eq!(values[0], 0.0);
        assert!(values[11] > 0.0 && values[11] < 1.0);
        assert_eq!(values[12], 1.0);

        let NodeKind::Transformer { conversion_factors } = components[1].node.kind() else {
            panic!("expected a transformer");
        };
        assert_eq!(conversion_factors["heat"], Series::Scalar(0.9));
        assert_eq!(conversion_factors["el"], Series::Scalar(0.01 * 0.9));
        Ok(())
    }
}
