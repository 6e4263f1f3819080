// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the trait that needs to be implemented by the
//! optimization engine an [`EnergySystemGraph`] is handed to.

use std::collections::HashMap;

use crate::EnergySystemGraph;

/// The result of solving an energy system.
#[derive(Clone, Debug, PartialEq)]
pub enum Solution {
    /// A feasible flow assignment was found.
    Optimal {
        /// Value of the objective function, in currency units.
        objective: f64,
        /// The value of every flow per timestep, keyed by `(from, to)` node
        /// labels.
        flows: HashMap<(String, String), Vec<f64>>,
        /// The invested capacity per `(from, to)` flow, for flows that can be
        /// invested in.
        investments: HashMap<(String, String), f64>,
    },
    /// No flow assignment satisfies the constraints of the energy system.
    Infeasible,
}

/**
This trait needs to be implemented by the engine that optimizes an energy
system.

The graph is handed over read-only: every parameter is resolved to a number
or a series with one value per timestep, so the engine only needs to walk the
[`nodes`][EnergySystemGraph::nodes] and [`flows`][EnergySystemGraph::flows].

<details>
<summary>Example implementation sketch:</summary>

```ignore
impl energy_system_graph::Solver for MilpEngine {
    type Error = milp::Error;

    fn solve(&mut self, graph: &EnergySystemGraph) -> Result<Solution, Self::Error> {
        let mut model = milp::Model::new();
        for flow in graph.flows() {
            model.add_flow(flow.from.label(), flow.to.label(), flow.flow);
        }
        for node in graph.nodes() {
            model.add_balance(node);
        }
        model.solve()
    }
}
```

</details>
*/
pub trait Solver {
    type Error: std::error::Error;

    /// Optimizes the flows and investments of the given energy system.
    fn solve(&mut self, graph: &EnergySystemGraph) -> Result<Solution, Self::Error>;
}
