// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Builds the energy system of a scenario directory and logs a summary.
//!
//! Usage: `energy-system-build <scenario dir>`

use std::process::ExitCode;

use energy_system_graph::{build_energy_system, BuildConfig, Error, Scenario};
use tracing_subscriber::EnvFilter;

fn run(dir: &str) -> Result<(), Error> {
    let scenario = Scenario::from_dir(dir)?;
    let system = build_energy_system(&scenario, BuildConfig::default())?;

    for bus in system.graph.buses() {
        let (inputs, outputs) = (
            system.graph.inputs(bus.label())?.count(),
            system.graph.outputs(bus.label())?.count(),
        );
        tracing::info!("Bus {}: {inputs} feeding, {outputs} drawing.", bus.label());
    }
    tracing::info!(
        "Built {} buses, {} components and {} flows with {} warnings.",
        system.graph.buses().count(),
        system.graph.components().count(),
        system.graph.flows().count(),
        system.warnings.len(),
    );
    for warning in &system.warnings {
        tracing::warn!("{warning}");
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(dir) = std::env::args().nth(1) else {
        tracing::error!("usage: energy-system-build <scenario dir>");
        return ExitCode::from(2);
    };

    match run(&dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
