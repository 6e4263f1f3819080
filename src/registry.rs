// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The registry of buses that all component builders of a build share.

use std::collections::HashSet;

use crate::network::{BusRef, Component, Flow, Node, NodeKind};
use crate::rows::BusRow;
use crate::Error;

/// Owns the buses of one build, and the excess and shortage components that
/// are attached to them.
///
/// Components refer to buses through [`BusRef`]s, which only the registry
/// hands out.  A registry is consumed when the graph is assembled, and must
/// not be reused after a failed build.
#[derive(Debug, Default)]
pub struct BusRegistry {
    labels: HashSet<String>,
    buses: Vec<Node>,
    shadow_components: Vec<Component>,
}

impl BusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bus if `active` is set, and returns a reference to it.
    ///
    /// Returns an error if a bus with the same label already exists.
    pub fn create_bus(&mut self, label: &str, active: bool) -> Result<Option<BusRef>, Error> {
        if !active {
            tracing::debug!("Skipping inactive bus {label}.");
            return Ok(None);
        }
        if !self.labels.insert(label.to_string()) {
            return Err(Error::configuration(format!(
                "{label}: a bus with this label already exists."
            )));
        }
        self.buses.push(Node::new(label, NodeKind::Bus));
        tracing::info!("Created bus {label}.");
        Ok(Some(BusRef::new(label)))
    }

    /// Attaches a sink `<bus>_excess` that takes up surplus energy of the bus.
    pub fn attach_excess(&mut self, bus: &BusRef, costs: f64, emission_factor: f64) {
        let label = format!("{bus}_excess");
        tracing::info!("Created excess sink {label}.");
        self.shadow_components.push(Component::sink(
            label,
            bus,
            Flow::with_costs(costs, emission_factor),
        ));
    }

    /// Attaches a source `<bus>_shortage` that covers missing energy of the
    /// bus.
    pub fn attach_shortage(&mut self, bus: &BusRef, costs: f64, emission_factor: f64) {
        let label = format!("{bus}_shortage");
        tracing::info!("Created shortage source {label}.");
        self.shadow_components.push(Component::source(
            label,
            bus,
            Flow::with_costs(costs, emission_factor),
        ));
    }

    /// Returns a reference to the bus with the given label.
    ///
    /// `component` and `field` name the row that refers to the bus, for the
    /// error message when the bus doesn't exist.
    pub fn bus(&self, component: &str, field: &str, label: &str) -> Result<BusRef, Error> {
        if self.labels.contains(label) {
            Ok(BusRef::new(label))
        } else {
            Err(Error::field(
                component,
                field,
                format!("bus `{label}` does not exist"),
            ))
        }
    }

    /// Creates the buses of all rows of the `buses` table, with their excess
    /// and shortage components.
    pub fn create_buses(&mut self, rows: &[BusRow]) -> Result<(), Error> {
        for row in rows {
            let Some(bus) = self.create_bus(&row.label, row.active)? else {
                continue;
            };
            if row.excess {
                self.attach_excess(&bus, row.excess_costs, row.excess_constraint_costs);
            }
            if row.shortage {
                self.attach_shortage(&bus, row.shortage_costs, row.shortage_constraint_costs);
            }
        }
        Ok(())
    }

    /// Returns the number of buses.
    pub fn len(&self) -> usize {
        self.buses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }

    /// Consumes the registry and returns the buses in creation order, and the
    /// excess and shortage components.
    pub(crate) fn into_parts(self) -> (Vec<Node>, Vec<Component>) {
        (self.buses, self.shadow_components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus_row(label: &str, active: bool, excess: bool, shortage: bool) -> BusRow {
        BusRow {
            label: label.to_string(),
            active,
            excess,
            shortage,
            excess_costs: -0.05,
            shortage_costs: 0.3,
            shortage_constraint_costs: 0.4,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_bus() -> Result<(), Error> {
        let mut registry = BusRegistry::new();
        assert_eq!(registry.create_bus("el", true)?, Some(BusRef::new("el")));
        assert_eq!(registry.create_bus("heat", false)?, None);
        assert!(registry
            .create_bus("el", true)
            .is_err_and(|e| e
                == Error::configuration("el: a bus with this label already exists.")));
        assert_eq!(registry.len(), 1);
        Ok(())
    }

    #[test]
    fn test_bus_lookup() -> Result<(), Error> {
        let mut registry = BusRegistry::new();
        registry.create_bus("el", true)?;
        registry.create_bus("heat", false)?;

        assert_eq!(registry.bus("pv", "output", "el")?, BusRef::new("el"));
        assert_eq!(
            registry.bus("hp", "output", "heat"),
            Err(Error::configuration(
                "hp: field `output`: bus `heat` does not exist"
            ))
        );
        Ok(())
    }

    #[test]
    fn test_create_buses() -> Result<(), Error> {
        let mut registry = BusRegistry::new();
        registry.create_buses(&[
            bus_row("el", true, true, true),
            bus_row("gas", true, false, true),
            bus_row("heat", true, false, false),
            bus_row("cold", false, true, true),
        ])?;

        let (buses, components) = registry.into_parts();
        assert_eq!(
            buses.iter().map(|b| b.label()).collect::<Vec<_>>(),
            ["el", "gas", "heat"]
        );
        assert_eq!(
            components.iter().map(|c| c.label()).collect::<Vec<_>>(),
            ["el_excess", "el_shortage", "gas_shortage"]
        );

        let excess = &components[0];
        assert_eq!(excess.node.kind(), &NodeKind::Sink);
        assert_eq!(excess.input("el"), Some(&Flow::with_costs(-0.05, 0.0)));
        let shortage = &components[1];
        assert_eq!(shortage.node.kind(), &NodeKind::Source);
        assert_eq!(shortage.output("el"), Some(&Flow::with_costs(0.3, 0.4)));

        Ok(())
    }
}
