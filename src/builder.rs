// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Builders that turn the rows of the scenario tables into components, and
//! the assembly of those components into an [`EnergySystemGraph`].
//!
//! Builders never call each other.  They share the [`BusRegistry`] of the
//! build and the immutable [`ScenarioContext`], and return the components
//! they created.

mod link;
mod sink;
mod source;
mod storage;
mod transformer;

pub use link::create_link;
pub use sink::create_sink;
pub use source::create_source;
pub use storage::create_storage;
pub use transformer::{create_transformer, TransformerOutcome};

use std::str::FromStr;

use crate::component_category::UnknownCategory;
use crate::context::ScenarioContext;
use crate::network::{Profile, Series};
use crate::registry::BusRegistry;
use crate::scenario::Scenario;
use crate::{BuildConfig, EnergySystemGraph, Error, Warning};

/// The result of a successful build.
#[derive(Debug)]
pub struct EnergySystem {
    /// The assembled graph, ready to be handed to a solver.
    pub graph: EnergySystemGraph,
    /// Components that were skipped.
    pub warnings: Vec<Warning>,
}

/// Builds all active rows of a scenario and assembles them into a validated
/// graph.
///
/// The first invalid row aborts the build.
pub fn build_energy_system(scenario: &Scenario, config: BuildConfig) -> Result<EnergySystem, Error> {
    let context = scenario.context()?;
    tracing::info!(
        "Building energy system: {} periods of {} s from {}.",
        context.periods(),
        context.settings().resolution.seconds(),
        context.settings().start
    );

    let mut registry = BusRegistry::new();
    registry.create_buses(&scenario.buses)?;

    let mut components = vec![];
    let mut warnings = vec![];

    for row in scenario.sources.iter().filter(|row| row.active) {
        components.extend(create_source(row, &context, &mut registry)?);
    }
    for row in scenario.sinks.iter().filter(|row| row.active) {
        components.push(create_sink(row, &context, &registry, &config)?);
    }
    for row in scenario.transformers.iter().filter(|row| row.active) {
        match create_transformer(row, &context, &mut registry)? {
            TransformerOutcome::Built(created) => components.extend(created),
            TransformerOutcome::Skipped(warning) => warnings.push(warning),
        }
    }
    for row in scenario.storages.iter().filter(|row| row.active) {
        components.push(create_storage(row, &context, &registry)?);
    }
    for row in scenario.links.iter().filter(|row| row.active) {
        components.push(create_link(row, &registry)?);
    }

    let (buses, shadow_components) = registry.into_parts();
    let graph = EnergySystemGraph::try_new(
        buses,
        shadow_components.into_iter().chain(components),
        config,
    )?;
    tracing::info!(
        "Built energy system with {} nodes and {} flows, {} components skipped.",
        graph.nodes().count(),
        graph.flows().count(),
        warnings.len()
    );

    Ok(EnergySystem { graph, warnings })
}

/// Parses a category cell, naming the row and the field on failure.
pub(crate) fn parse_category<T>(label: &str, field: &str, value: &str) -> Result<T, Error>
where
    T: FromStr<Err = UnknownCategory>,
{
    value.parse().map_err(|e| Error::field(label, field, e))
}

/// Parses the `fixed` cell of a source or sink row.
pub(crate) fn parse_fixed(label: &str, value: &str) -> Result<bool, Error> {
    match value.trim() {
        "1" | "1.0" => Ok(true),
        "0" | "0.0" => Ok(false),
        other => Err(Error::field(
            label,
            "fixed",
            format!("expected `0` or `1`, found `{other}`"),
        )),
    }
}

/// A fixed profile, or a profile bounded by zero and the given series.
pub(crate) fn profile_of(fixed: bool, series: Vec<f64>) -> Profile {
    if fixed {
        Profile::Fixed(Series::Values(series))
    } else {
        Profile::Bounded {
            min: Series::Scalar(0.0),
            max: Series::Values(series),
        }
    }
}

/// A fixed profile from the `<label>.fix` column, or a profile bounded by
/// the `<label>.min` and `<label>.max` columns.
pub(crate) fn time_series_profile(
    label: &str,
    fixed: bool,
    context: &ScenarioContext,
) -> Result<Profile, Error> {
    if fixed {
        Ok(Profile::Fixed(context.time_series(label, "fix")?.into()))
    } else {
        Ok(Profile::Bounded {
            min: context.time_series(label, "min")?.into(),
            max: context.time_series(label, "max")?.into(),
        })
    }
}

/// Returns an error if a derived series has values that are not finite.
pub(crate) fn ensure_finite(label: &str, field: &str, series: &[f64]) -> Result<(), Error> {
    match series.iter().position(|v| !v.is_finite()) {
        Some(t) => Err(Error::field(
            label,
            field,
            format!("derived value at timestep {t} is not finite"),
        )),
        None => Ok(()),
    }
}

/// Full load hours of a relative feed-in series.
fn full_load_hours(series: &[f64], context: &ScenarioContext) -> f64 {
    series.iter().sum::<f64>() * context.settings().timestep_hours()
}
