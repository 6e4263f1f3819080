// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`EnergySystemGraph`] instances from given buses and
//! components.

use petgraph::graph::DiGraph;

use crate::network::{Component, Flow, Node};
use crate::{BuildConfig, EnergySystemGraph, Error};

use super::NodeIndexMap;

/// `EnergySystemGraph` instantiation.
impl EnergySystemGraph {
    /// Creates a new [`EnergySystemGraph`] from the given buses and
    /// components.
    ///
    /// Returns an error if the graph is invalid.
    pub fn try_new<BusIterator, ComponentIterator>(
        buses: BusIterator,
        components: ComponentIterator,
        config: BuildConfig,
    ) -> Result<Self, Error>
    where
        BusIterator: IntoIterator<Item = Node>,
        ComponentIterator: IntoIterator<Item = Component>,
    {
        let (graph, indices) = Self::create_graph(buses)?;

        let mut esg = Self {
            graph,
            node_indices: indices,
            config,
        };
        esg.add_components(components)?;

        esg.validate()?;

        Ok(esg)
    }

    fn create_graph(
        buses: impl IntoIterator<Item = Node>,
    ) -> Result<(DiGraph<Node, Flow>, NodeIndexMap), Error> {
        let mut graph = DiGraph::new();
        let mut indices = NodeIndexMap::new();

        for bus in buses {
            let label = bus.label().to_string();

            if !bus.is_bus() {
                return Err(Error::invalid_graph(format!(
                    "Node {label} was passed as a bus, but is a {}.",
                    bus.kind()
                )));
            }
            if indices.contains_key(&label) {
                return Err(Error::invalid_graph(format!(
                    "Duplicate node label found: {label}"
                )));
            }

            let idx = graph.add_node(bus);
            indices.insert(label, idx);
        }

        Ok((graph, indices))
    }

    fn add_components(
        &mut self,
        components: impl IntoIterator<Item = Component>,
    ) -> Result<(), Error> {
        for Component {
            node,
            inputs,
            outputs,
        } in components
        {
            let label = node.label().to_string();

            if node.is_bus() {
                return Err(Error::invalid_graph(format!(
                    "Component {label} can't be a bus."
                )));
            }
            if self.node_indices.contains_key(&label) {
                return Err(Error::invalid_graph(format!(
                    "Duplicate node label found: {label}"
                )));
            }
            let idx = self.graph.add_node(node);
            self.node_indices.insert(label.clone(), idx);

            for (bus, flow) in inputs {
                self.add_flow(bus.label(), &label, flow)?;
            }
            for (bus, flow) in outputs {
                self.add_flow(&label, bus.label(), flow)?;
            }
        }

        Ok(())
    }

    fn add_flow(&mut self, from: &str, to: &str, flow: Flow) -> Result<(), Error> {
        let index_of = |label: &str| {
            self.node_indices.get(label).copied().ok_or_else(|| {
                Error::invalid_graph(format!(
                    "Flow:({from}, {to}) Can't find a node with label {label}"
                ))
            })
        };
        let source_idx = index_of(from)?;
        let target_idx = index_of(to)?;

        if self.graph.find_edge(source_idx, target_idx).is_some() {
            return Err(Error::invalid_graph(format!(
                "Flow:({from}, {to}) Duplicate flow."
            )));
        }
        self.graph.add_edge(source_idx, target_idx, flow);

        Ok(())
    }
}
