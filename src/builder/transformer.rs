// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Transformers: generic converters, compression heat pumps and chillers,
//! generic combined heat and power units and absorption chillers.

use std::collections::BTreeMap;

use super::{ensure_finite, parse_category};
use crate::component_category::{HeatPumpMode, HeatSource, TransformerType};
use crate::context::ScenarioContext;
use crate::network::{BusRef, ChpParameters, Component, Flow, Investment, NodeKind, Series};
use crate::physics::heat_pump::{self, Icing};
use crate::physics::{absorption, mean};
use crate::registry::BusRegistry;
use crate::rows::{is_unset, TransformerRow};
use crate::{Error, Warning};

/// The outcome of building a transformer row.
#[derive(Debug)]
pub enum TransformerOutcome {
    /// The components of the transformer, including auxiliary heat sources.
    Built(Vec<Component>),
    /// The transformer type is not supported; nothing was created.
    Skipped(Warning),
}

/// Creates the components of a transformer row.
///
/// Unrecognized transformer types, `ExtractionTurbineCHP` and
/// `OffsetTransformer` are skipped with a warning.
pub fn create_transformer(
    row: &TransformerRow,
    context: &ScenarioContext,
    registry: &mut BusRegistry,
) -> Result<TransformerOutcome, Error> {
    let label = row.label.as_str();
    let Ok(transformer_type) = row.transformer_type.parse::<TransformerType>() else {
        return Ok(TransformerOutcome::Skipped(Warning::unsupported_category(
            label,
            &row.transformer_type,
            "is not a known transformer type",
        )));
    };

    let components = match transformer_type {
        TransformerType::Generic => vec![generic_transformer(row, registry)?],
        TransformerType::CompressionHeat => {
            compression_heat_transformer(row, context, registry)?
        }
        TransformerType::GenericChp => vec![generic_chp(row, context, registry)?],
        TransformerType::AbsorptionHeat => absorption_heat_transformer(row, context, registry)?,
        TransformerType::ExtractionTurbineChp | TransformerType::OffsetTransformer => {
            return Ok(TransformerOutcome::Skipped(Warning::unsupported_category(
                label,
                transformer_type.to_string(),
                "is not implemented yet",
            )));
        }
    };

    for component in &components {
        tracing::info!("Created {} {}.", transformer_type, component.label());
    }
    Ok(TransformerOutcome::Built(components))
}

fn input_flow(row: &TransformerRow) -> Flow {
    Flow::with_costs(row.variable_input_costs, row.variable_input_constraint_costs)
}

/// The main output flow, which carries the investment of the transformer.
fn output_flow(row: &TransformerRow) -> Flow {
    Flow::with_costs(row.variable_output_costs, row.variable_output_constraint_costs)
        .investment(row.investment())
}

/// The output flow of heat pumps and chillers, invested without a fixed
/// offset.
fn convex_output_flow(row: &TransformerRow) -> Flow {
    Flow::with_costs(row.variable_output_costs, row.variable_output_constraint_costs).investment(
        Investment {
            nonconvex: false,
            offset: 0.0,
            ..row.investment()
        },
    )
}

fn ensure_positive(label: &str, field: &str, value: f64) -> Result<(), Error> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::field(
            label,
            field,
            format!("must be positive, found {value}"),
        ))
    }
}

fn generic_transformer(row: &TransformerRow, registry: &BusRegistry) -> Result<Component, Error> {
    let label = row.label.as_str();
    let input = registry.bus(label, "input", &row.input)?;
    let output = registry.bus(label, "output", &row.output)?;
    ensure_positive(label, "efficiency", row.efficiency)?;

    let mut conversion_factors = BTreeMap::from([
        (input.label().to_string(), Series::Scalar(1.0)),
        (output.label().to_string(), Series::Scalar(row.efficiency)),
    ]);
    let mut outputs = vec![(output, output_flow(row))];

    if !is_unset(&row.output2) {
        let output2 = registry.bus(label, "output2", &row.output2)?;
        // Only the main output carries periodic costs.
        let investment = Investment {
            periodic_cost: 0.0,
            periodic_constraint_cost: 0.0,
            ..row
                .investment()
                .scaled(row.efficiency2 / row.efficiency)
        };
        conversion_factors.insert(
            output2.label().to_string(),
            Series::Scalar(row.efficiency2),
        );
        outputs.push((
            output2,
            Flow::with_costs(
                row.variable_output_costs_2,
                row.variable_output_constraint_costs_2,
            )
            .investment(investment),
        ));
    }

    let transformer = Component::new(label, NodeKind::Transformer { conversion_factors })
        .with_input(&input, input_flow(row));
    Ok(outputs
        .into_iter()
        .fold(transformer, |transformer, (bus, flow)| {
            transformer.with_output(&bus, flow)
        }))
}

/// Maximum heat extraction of a field of geothermal probes, kW.
fn ground_source_capacity(row: &TransformerRow) -> Result<f64, Error> {
    ensure_positive(
        &row.label,
        "min. borehole area /(sq m) (CHT)",
        row.min_borehole_area,
    )?;
    Ok(row.area * row.probe_length * row.heat_extraction / row.min_borehole_area)
}

/// An auxiliary bus with the label `<label><level>_bus`.
fn auxiliary_bus(
    registry: &mut BusRegistry,
    label: &str,
    temperature_level: &str,
) -> Result<BusRef, Error> {
    let bus_label = format!("{label}{temperature_level}_bus");
    registry
        .create_bus(&bus_label, true)?
        .ok_or_else(|| Error::internal(format!("{label}: bus {bus_label} was not created.")))
}

/// A heat pump or chiller, and the heat source on its auxiliary bus.
fn compression_heat_transformer(
    row: &TransformerRow,
    context: &ScenarioContext,
    registry: &mut BusRegistry,
) -> Result<Vec<Component>, Error> {
    let label = row.label.as_str();
    let input = registry.bus(label, "input", &row.input)?;
    let output = registry.bus(label, "output", &row.output)?;
    let heat_source: HeatSource = parse_category(label, "heat source (CHT)", &row.heat_source)?;
    let mode: HeatPumpMode = parse_category(label, "mode", &row.mode)?;
    ensure_positive(label, "efficiency", row.efficiency)?;

    let weather = context.weather();
    let source_temperature = match heat_source {
        HeatSource::Ground => &weather.ground_temp,
        HeatSource::GroundWater => &weather.groundwater_temp,
        HeatSource::Air => &weather.temperature,
        HeatSource::Water => &weather.water_temp,
    };
    let periods = context.periods();
    let (temp_high, temp_low, fixed_field) = match mode {
        HeatPumpMode::HeatPump => (
            vec![row.temperature_high; periods],
            source_temperature.clone(),
            "temperature high /deg C (CHT)",
        ),
        HeatPumpMode::Chiller => (
            source_temperature.clone(),
            vec![row.temperature_low; periods],
            "temperature low /deg C (CHT)",
        ),
    };
    let icing = (row.icing_factor > 0.0).then_some(Icing {
        threshold: row.icing_threshold,
        factor: row.icing_factor,
    });
    let cops = heat_pump::cops(mode, &temp_high, &temp_low, row.quality_grade, icing);
    if let Some((t, cop)) = cops
        .iter()
        .enumerate()
        .find(|(_, cop)| !cop.is_finite() || **cop <= 0.0)
    {
        return Err(Error::field(
            label,
            fixed_field,
            format!("derived COP at timestep {t} is {cop}"),
        ));
    }
    tracing::debug!("{label}: mean COP {:.2}.", mean(&cops));

    let level = mode.temperature_level();
    let aux_bus = auxiliary_bus(registry, label, level)?;
    let maximum = match heat_source {
        HeatSource::Ground => ground_source_capacity(row)?,
        _ => f64::INFINITY,
    };
    let heat_source = Component::source(
        format!("{label}{level}_{}", heat_source.label_suffix()),
        &aux_bus,
        Flow::default().investment(Investment {
            maximum,
            ..Default::default()
        }),
    );

    let efficiency = row.efficiency;
    let conversion_factors = BTreeMap::from([
        (
            aux_bus.label().to_string(),
            Series::Values(cops.iter().map(|c| (c - 1.0) / c / efficiency).collect()),
        ),
        (
            input.label().to_string(),
            Series::Values(cops.iter().map(|c| 1.0 / c).collect()),
        ),
        (output.label().to_string(), Series::Scalar(1.0)),
    ]);
    let transformer = Component::new(label, NodeKind::Transformer { conversion_factors })
        .with_input(&input, input_flow(row))
        .with_input(&aux_bus, Flow::default())
        .with_output(&output, convex_output_flow(row));

    Ok(vec![heat_source, transformer])
}

/// A combined heat and power unit with a fuel input, an electrical output
/// and a heat output.
fn generic_chp(
    row: &TransformerRow,
    context: &ScenarioContext,
    registry: &BusRegistry,
) -> Result<Component, Error> {
    let label = row.label.as_str();
    let input = registry.bus(label, "input", &row.input)?;
    let electricity = registry.bus(label, "output", &row.output)?;
    let heat = registry.bus(label, "output2", &row.output2)?;

    let per_period = |value: f64| vec![value; context.periods()];
    let params = ChpParameters {
        flue_gas_share_max: per_period(row.flue_gas_share_max),
        flue_gas_share_min: per_period(row.flue_gas_share_min),
        power_max_without_heat: per_period(row.power_max_without_heat),
        power_min_without_heat: per_period(row.power_min_without_heat),
        efficiency_max_without_heat: per_period(row.efficiency_max_without_heat),
        efficiency_min_without_heat: per_period(row.efficiency_min_without_heat),
        condenser_load_min: per_period(row.condenser_load_min),
        power_loss_index: per_period(row.power_loss_index),
        back_pressure: row.back_pressure,
    };

    Ok(Component::new(label, NodeKind::GenericChp(params))
        .with_input(&input, input_flow(row))
        .with_output(&electricity, output_flow(row))
        .with_output(
            &heat,
            Flow::with_costs(
                row.variable_output_costs_2,
                row.variable_output_constraint_costs_2,
            ),
        ))
}

/// An absorption chiller, and the driving heat source on its auxiliary bus.
fn absorption_heat_transformer(
    row: &TransformerRow,
    context: &ScenarioContext,
    registry: &mut BusRegistry,
) -> Result<Vec<Component>, Error> {
    let label = row.label.as_str();
    let input = registry.bus(label, "input", &row.input)?;
    let output = registry.bus(label, "output", &row.output)?;
    let mode: HeatPumpMode = parse_category(label, "mode", &row.mode)?;
    let chiller = context
        .catalogs()
        .absorption_chiller(label, &row.chiller_name)?;

    let cooling_water = absorption::cooling_water_temperatures(
        &context.weather().temperature,
        row.recooling_difference,
    );
    let cops = absorption::cops(
        chiller,
        row.generator_temperature,
        row.chilling_temperature,
        &cooling_water,
    );
    ensure_finite(label, "name (AbsCH)", &cops)?;
    tracing::debug!("{label}: mean COP {:.2}.", mean(&cops));

    let level = mode.temperature_level();
    let aux_bus = auxiliary_bus(registry, label, level)?;
    let heat_source = Component::source(
        format!("{label}{level}_source"),
        &aux_bus,
        Flow::with_costs(row.variable_input_costs, row.variable_input_constraint_costs),
    );

    let conversion_factors = BTreeMap::from([
        (aux_bus.label().to_string(), Series::Scalar(1.0)),
        (
            input.label().to_string(),
            Series::Scalar(row.electrical_input_factor),
        ),
        (output.label().to_string(), Series::Values(cops)),
    ]);
    let transformer = Component::new(label, NodeKind::Transformer { conversion_factors })
        .with_input(&input, input_flow(row))
        .with_input(&aux_bus, Flow::default())
        .with_output(&output, convex_output_flow(row));

    Ok(vec![heat_source, transformer])
}
