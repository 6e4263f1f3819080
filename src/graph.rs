// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A graph representation of the buses and components of an energy system,
//! and the flows between them.

mod creation;
mod retrieval;
mod validation;

pub mod iterators;

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::network::{Flow, Node};
use crate::BuildConfig;

/// `Node`s stored in a `DiGraph` instance can be addressed with `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any node label, so
/// that nodes in the `DiGraph` can be retrieved from their labels.
pub(crate) type NodeIndexMap = HashMap<String, NodeIndex>;

/// A directed graph of the buses and components of an energy system.
///
/// Nodes are buses and components, in build order with the buses first.
/// Every edge is a [`Flow`] between a bus and a component: from the bus into
/// a component's input, or from a component's output into the bus.
#[derive(Debug)]
pub struct EnergySystemGraph {
    graph: DiGraph<Node, Flow>,
    node_indices: NodeIndexMap,
    config: BuildConfig,
}
