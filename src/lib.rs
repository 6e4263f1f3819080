// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Energy System Graph

This is a library for turning the tables of an energy system scenario into a
fully parameterized flow network, ready to be handed to an optimization
engine.

Each row of the scenario tables describes one bus, source, sink,
transformer, storage or link.  Builders validate the rows, derive the
technology-specific series (photovoltaic and wind feed-in, solar thermal
yield, heat pump and chiller efficiencies, storage losses, demand profiles)
and attach the components to the buses they draw from and feed into.

## Building an energy system

A [`Scenario`] is read from a directory of CSV tables with
[`from_dir`][Scenario::from_dir], and built with [`build_energy_system`]:

```ignore
let scenario = Scenario::from_dir("scenarios/district")?;
let system = build_energy_system(&scenario, BuildConfig::default())?;
for warning in &system.warnings {
    println!("{warning}");
}
```

Rows with categories that are known but not supported are skipped with a
[`Warning`].  Any invalid row aborts the build with an [`Error`].

## Validation

The [`EnergySystemGraph`] checks, among others, that:

- node labels are unique and every flow attaches to an existing bus,
- there is at most one flow per direction between two nodes,
- the conversion factors of transformers and links cover exactly the buses
  they are attached to,
- every bus has at least one component attached.  Unconnected buses are
  logged with a warning, or rejected when
  [`allow_unconnected_buses`][BuildConfig::allow_unconnected_buses] is unset.

## Solving

The graph is handed read-only to an implementation of the [`Solver`] trait.
*/

mod builder;
pub use builder::{build_energy_system, EnergySystem};

pub mod catalog;
pub mod component_category;

mod config;
pub use config::BuildConfig;

pub mod context;

mod error;
pub use error::{Error, ErrorKind, Warning};

mod graph;
pub use graph::{iterators, EnergySystemGraph};

pub mod network;
mod physics;
mod registry;
pub mod rows;

mod scenario;
pub use scenario::Scenario;

mod solver;
pub use solver::{Solution, Solver};

#[cfg(test)]
mod test_utils;
