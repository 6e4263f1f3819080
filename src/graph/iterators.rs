// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over nodes and flows in an `EnergySystemGraph`.

use petgraph::graph::DiGraph;

use crate::network::{Flow, Node};

/// An iterator over the nodes in an `EnergySystemGraph`.
pub struct Nodes<'a> {
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<Node>>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| &n.weight)
    }
}

/// A flow in an `EnergySystemGraph`, together with the nodes it connects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowRef<'a> {
    pub from: &'a Node,
    pub to: &'a Node,
    pub flow: &'a Flow,
}

/// An iterator over the flows in an `EnergySystemGraph`.
pub struct Flows<'a> {
    pub(crate) graph: &'a DiGraph<Node, Flow>,
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Edge<Flow>>,
}

impl<'a> Iterator for Flows<'a> {
    type Item = FlowRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|e| FlowRef {
            from: &self.graph[e.source()],
            to: &self.graph[e.target()],
            flow: &e.weight,
        })
    }
}

/// An iterator over the neighbors of a node in an `EnergySystemGraph`.
pub struct Neighbors<'a> {
    pub(crate) graph: &'a DiGraph<Node, Flow>,
    pub(crate) iter: petgraph::graph::Neighbors<'a, Flow>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| &self.graph[i])
    }
}
