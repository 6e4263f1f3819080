// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Links that transport energy between two buses.

use std::collections::BTreeMap;

use super::parse_category;
use crate::component_category::LinkDirection;
use crate::network::{Component, Flow, Investment, NodeKind, Series};
use crate::registry::BusRegistry;
use crate::rows::LinkRow;
use crate::Error;

/// Creates the link of a link row.
///
/// A link takes energy from both buses and delivers it to both buses, each
/// direction with its own investment.  Undirected links split the periodic
/// costs between the two directions.  Directed links only transport from
/// `bus_1` to `bus_2`: the reverse direction has a conversion factor of zero.
pub fn create_link(row: &LinkRow, registry: &BusRegistry) -> Result<Component, Error> {
    let label = row.label.as_str();
    let direction: LinkDirection = parse_category(label, "(un)directed", &row.directedness)?;
    let bus_1 = registry.bus(label, "bus_1", &row.bus_1)?;
    let bus_2 = registry.bus(label, "bus_2", &row.bus_2)?;
    if bus_1 == bus_2 {
        return Err(Error::field(
            label,
            "bus_2",
            format!("a link can't connect bus `{bus_1}` to itself"),
        ));
    }

    let (investment, reverse_efficiency) = match direction {
        LinkDirection::Undirected => (
            Investment {
                periodic_cost: row.periodical_costs / 2.0,
                ..row.investment()
            },
            row.efficiency,
        ),
        LinkDirection::Directed => (row.investment(), 0.0),
    };
    let output_flow = || {
        Flow::with_costs(row.variable_output_costs, row.variable_constraint_costs)
            .investment(investment.clone())
    };

    let conversion_factors = BTreeMap::from([
        (
            (bus_1.label().to_string(), bus_2.label().to_string()),
            Series::Scalar(row.efficiency),
        ),
        (
            (bus_2.label().to_string(), bus_1.label().to_string()),
            Series::Scalar(reverse_efficiency),
        ),
    ]);

    tracing::info!("Created {direction} link {label} between {bus_1} and {bus_2}.");
    Ok(Component::new(label, NodeKind::Link { conversion_factors })
        .with_input(&bus_1, Flow::default())
        .with_input(&bus_2, Flow::default())
        .with_output(&bus_2, output_flow())
        .with_output(&bus_1, output_flow()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::link_row;

    fn registry() -> Result<BusRegistry, Error> {
        let mut registry = BusRegistry::new();
        registry.create_bus("A", true)?;
        registry.create_bus("B", true)?;
        Ok(registry)
    }

    fn conversion_factor(link: &Component, from: &str, to: &str) -> Option<Series> {
        match link.node.kind() {
            NodeKind::Link { conversion_factors } => conversion_factors
                .get(&(from.to_string(), to.to_string()))
                .cloned(),
            _ => None,
        }
    }

    #[test]
    fn test_directed() -> Result<(), Error> {
        let mut row = link_row("line", "A", "B", "directed");
        row.periodical_costs = 10.0;
        row.efficiency = 0.9;
        row.variable_output_costs = 0.01;

        let link = create_link(&row, &registry()?)?;
        assert_eq!(conversion_factor(&link, "A", "B"), Some(Series::Scalar(0.9)));
        assert_eq!(conversion_factor(&link, "B", "A"), Some(Series::Scalar(0.0)));

        let forward = link.output("B").expect("forward flow");
        assert_eq!(forward.variable_costs, 0.01);
        assert_eq!(
            forward.investment.as_ref().map(|i| i.periodic_cost),
            Some(10.0)
        );
        let reverse = link.output("A").expect("reverse flow");
        assert!(reverse.investment.is_some());
        assert!(link.input("A").is_some() && link.input("B").is_some());
        Ok(())
    }

    #[test]
    fn test_undirected() -> Result<(), Error> {
        let mut row = link_row("line", "A", "B", "undirected");
        row.periodical_costs = 10.0;
        row.efficiency = 0.95;

        let link = create_link(&row, &registry()?)?;
        assert_eq!(conversion_factor(&link, "A", "B"), Some(Series::Scalar(0.95)));
        assert_eq!(conversion_factor(&link, "B", "A"), Some(Series::Scalar(0.95)));
        for bus in ["A", "B"] {
            let cost = link
                .output(bus)
                .and_then(|f| f.investment.as_ref())
                .map(|i| i.periodic_cost);
            assert_eq!(cost, Some(5.0));
        }
        Ok(())
    }

    #[test]
    fn test_invalid_links() -> Result<(), Error> {
        let registry = registry()?;
        assert!(
            create_link(&link_row("line", "A", "B", "both"), &registry).is_err_and(|e| e
                == Error::configuration(
                    "line: field `(un)directed`: unrecognized value `both`"
                ))
        );
        assert!(
            create_link(&link_row("line", "A", "C", "directed"), &registry).is_err_and(|e| e
                == Error::configuration("line: field `bus_2`: bus `C` does not exist"))
        );
        assert!(
            create_link(&link_row("line", "A", "A", "directed"), &registry).is_err_and(|e| e
                == Error::configuration(
                    "line: field `bus_2`: a link can't connect bus `A` to itself"
                ))
        );
        Ok(())
    }
}
