// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving nodes and flows from an [`EnergySystemGraph`].

use petgraph::graph::NodeIndex;
use petgraph::Direction;

use crate::graph::iterators::{Flows, Neighbors, Nodes};
use crate::network::{Flow, Node};
use crate::{EnergySystemGraph, Error};

/// `Node` and `Flow` retrieval.
impl EnergySystemGraph {
    fn index(&self, label: &str) -> Result<NodeIndex, Error> {
        self.node_indices
            .get(label)
            .copied()
            .ok_or_else(|| Error::component_not_found(format!("Node with label {label} not found.")))
    }

    /// Returns the node with the given `label`, if it exists.
    pub fn node(&self, label: &str) -> Result<&Node, Error> {
        self.index(label).map(|i| &self.graph[i])
    }

    /// Returns an iterator over all nodes in the graph, buses first.
    pub fn nodes(&self) -> Nodes {
        Nodes {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the buses in the graph.
    pub fn buses(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|n| n.is_bus())
    }

    /// Returns an iterator over the components in the graph.
    pub fn components(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|n| !n.is_bus())
    }

    /// Returns an iterator over all flows in the graph, in the order they
    /// were attached.
    pub fn flows(&self) -> Flows {
        Flows {
            graph: &self.graph,
            iter: self.graph.raw_edges().iter(),
        }
    }

    /// Returns the flow from the node `from` into the node `to`.
    ///
    /// Returns an error if either node does not exist, or if there is no
    /// flow between them.
    pub fn flow(&self, from: &str, to: &str) -> Result<&Flow, Error> {
        let (source, target) = (self.index(from)?, self.index(to)?);
        self.graph
            .find_edge(source, target)
            .map(|e| &self.graph[e])
            .ok_or_else(|| {
                Error::component_not_found(format!("Flow from {from} to {to} not found."))
            })
    }

    /// Returns an iterator over the nodes that flow into the node with the
    /// given `label`.
    ///
    /// For a component these are its input buses, for a bus the components
    /// that feed it.
    pub fn inputs(&self, label: &str) -> Result<Neighbors, Error> {
        self.neighbors(label, Direction::Incoming)
    }

    /// Returns an iterator over the nodes that the node with the given
    /// `label` flows into.
    pub fn outputs(&self, label: &str) -> Result<Neighbors, Error> {
        self.neighbors(label, Direction::Outgoing)
    }

    fn neighbors(&self, label: &str, direction: Direction) -> Result<Neighbors, Error> {
        self.index(label).map(|index| Neighbors {
            graph: &self.graph,
            iter: self.graph.neighbors_directed(index, direction),
        })
    }
}
