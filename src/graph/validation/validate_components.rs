// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating that the components of an [`EnergySystemGraph`]
//! are attached to their buses the way their kind requires.

use std::collections::BTreeSet;

use crate::network::NodeKind;
use crate::Error;

use super::EnergySystemValidator;

impl EnergySystemValidator<'_> {
    fn input_buses(&self, label: &str) -> Result<BTreeSet<&str>, Error> {
        Ok(self.esg.inputs(label)?.map(|n| n.label()).collect())
    }

    fn output_buses(&self, label: &str) -> Result<BTreeSet<&str>, Error> {
        Ok(self.esg.outputs(label)?.map(|n| n.label()).collect())
    }

    /// Validates that:
    ///  - sources don't have any inputs,
    ///  - sinks don't have any outputs.
    pub(super) fn validate_sources_and_sinks(&self) -> Result<(), Error> {
        for node in self.esg.components() {
            let label = node.label();
            match node.kind() {
                NodeKind::Source if !self.input_buses(label)?.is_empty() => {
                    return Err(Error::invalid_graph(format!(
                        "Source {label} can't have inputs."
                    )));
                }
                NodeKind::Sink if !self.output_buses(label)?.is_empty() => {
                    return Err(Error::invalid_graph(format!(
                        "Sink {label} can't have outputs."
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Validates that conversion factors cover exactly the attached buses.
    ///
    ///  - **Transformers** need one factor per input and output bus.
    ///  - **Links** need one factor per `(input, output)` pair of distinct
    ///    buses.
    pub(super) fn validate_conversion_factors(&self) -> Result<(), Error> {
        for node in self.esg.components() {
            let label = node.label();
            let (inputs, outputs) = (self.input_buses(label)?, self.output_buses(label)?);

            match node.kind() {
                NodeKind::Transformer { conversion_factors } => {
                    let attached = inputs.union(&outputs).copied().collect::<BTreeSet<_>>();
                    let covered = conversion_factors
                        .keys()
                        .map(String::as_str)
                        .collect::<BTreeSet<_>>();
                    if let Some(bus) = attached.difference(&covered).next() {
                        return Err(Error::invalid_graph(format!(
                            "Transformer {label} has no conversion factor for bus {bus}."
                        )));
                    }
                    if let Some(bus) = covered.difference(&attached).next() {
                        return Err(Error::invalid_graph(format!(
                            "Transformer {label} has a conversion factor for bus {bus}, \
                             which is not attached to it."
                        )));
                    }
                }
                NodeKind::Link { conversion_factors } => {
                    let pairs = inputs
                        .iter()
                        .flat_map(|i| outputs.iter().map(move |o| (*i, *o)))
                        .filter(|(i, o)| i != o)
                        .collect::<BTreeSet<_>>();
                    let covered = conversion_factors
                        .keys()
                        .map(|(i, o)| (i.as_str(), o.as_str()))
                        .collect::<BTreeSet<_>>();
                    if let Some((from, to)) = pairs.difference(&covered).next() {
                        return Err(Error::invalid_graph(format!(
                            "Link {label} has no conversion factor from {from} to {to}."
                        )));
                    }
                    if let Some((from, to)) = covered.difference(&pairs).next() {
                        return Err(Error::invalid_graph(format!(
                            "Link {label} has a conversion factor from {from} to {to}, \
                             which it does not connect."
                        )));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Validates that storages are charged from and discharged into the same
    /// single bus.
    pub(super) fn validate_storages(&self) -> Result<(), Error> {
        for node in self.esg.components() {
            if !matches!(node.kind(), NodeKind::Storage(_)) {
                continue;
            }
            let label = node.label();
            let (inputs, outputs) = (self.input_buses(label)?, self.output_buses(label)?);
            if inputs.len() != 1 || inputs != outputs {
                return Err(Error::invalid_graph(format!(
                    "Storage {label} must be charged from and discharged into a single bus."
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::network::{
        BusRef, Component, Flow, Investment, Node, NodeKind, Series, StorageParameters,
    };
    use crate::{BuildConfig, EnergySystemGraph, Error};

    fn try_build(components: Vec<Component>) -> Result<EnergySystemGraph, Error> {
        let buses = ["el", "heat"]
            .into_iter()
            .map(|l| Node::new(l, NodeKind::Bus))
            .collect::<Vec<_>>();
        let config = BuildConfig {
            allow_unconnected_buses: true,
            ..Default::default()
        };
        EnergySystemGraph::try_new(buses, components, config)
    }

    fn transformer(factors: &[(&str, f64)]) -> Component {
        Component::new(
            "boiler",
            NodeKind::Transformer {
                conversion_factors: factors
                    .iter()
                    .map(|(bus, f)| (bus.to_string(), Series::Scalar(*f)))
                    .collect(),
            },
        )
        .with_input(&BusRef::new("el"), Flow::default())
        .with_output(&BusRef::new("heat"), Flow::default())
    }

    fn link(factors: &[((&str, &str), f64)]) -> Component {
        let (el, heat) = (BusRef::new("el"), BusRef::new("heat"));
        Component::new(
            "line",
            NodeKind::Link {
                conversion_factors: factors
                    .iter()
                    .map(|((from, to), f)| ((from.to_string(), to.to_string()), Series::Scalar(*f)))
                    .collect::<BTreeMap<_, _>>(),
            },
        )
        .with_input(&el, Flow::default())
        .with_input(&heat, Flow::default())
        .with_output(&heat, Flow::default())
        .with_output(&el, Flow::default())
    }

    fn storage(input: &str, output: &str) -> Component {
        Component::new(
            "tank",
            NodeKind::Storage(StorageParameters {
                loss_rate: Series::Scalar(0.0),
                fixed_losses_relative: None,
                fixed_losses_absolute: None,
                inflow_conversion_factor: 1.0,
                outflow_conversion_factor: 1.0,
                invest_relation_input_capacity: 1.0,
                invest_relation_output_capacity: 1.0,
                min_storage_level: None,
                max_storage_level: None,
                investment: Investment::default(),
            }),
        )
        .with_input(&BusRef::new(input), Flow::default())
        .with_output(&BusRef::new(output), Flow::default())
    }

    #[test]
    fn test_sources_and_sinks() {
        let el = BusRef::new("el");
        assert!(try_build(vec![
            Component::source("pv", &el, Flow::default()).with_input(&el, Flow::default())
        ])
        .is_err_and(|e| e == Error::invalid_graph("Source pv can't have inputs.")));
        assert!(try_build(vec![
            Component::sink("demand", &el, Flow::default()).with_output(&el, Flow::default())
        ])
        .is_err_and(|e| e == Error::invalid_graph("Sink demand can't have outputs.")));
    }

    #[test]
    fn test_transformer_conversion_factors() {
        assert!(try_build(vec![transformer(&[("el", 1.0), ("heat", 0.9)])]).is_ok());
        assert!(try_build(vec![transformer(&[("el", 1.0)])]).is_err_and(|e| e
            == Error::invalid_graph("Transformer boiler has no conversion factor for bus heat.")));
        assert!(
            try_build(vec![transformer(&[("el", 1.0), ("heat", 0.9), ("gas", 1.0)])])
                .is_err_and(|e| e
                    == Error::invalid_graph(
                        "Transformer boiler has a conversion factor for bus gas, \
                         which is not attached to it."
                    ))
        );
    }

    #[test]
    fn test_link_conversion_factors() {
        assert!(try_build(vec![link(&[(("el", "heat"), 0.9), (("heat", "el"), 0.0)])]).is_ok());
        assert!(try_build(vec![link(&[(("el", "heat"), 0.9)])]).is_err_and(|e| e
            == Error::invalid_graph("Link line has no conversion factor from heat to el.")));
        assert!(try_build(vec![link(&[
            (("el", "heat"), 0.9),
            (("heat", "el"), 0.9),
            (("el", "el"), 1.0)
        ])])
        .is_err_and(|e| e
            == Error::invalid_graph(
                "Link line has a conversion factor from el to el, which it does not connect."
            )));
    }

    #[test]
    fn test_storages() {
        assert!(try_build(vec![storage("heat", "heat")]).is_ok());
        assert!(try_build(vec![storage("heat", "el")]).is_err_and(|e| e
            == Error::invalid_graph(
                "Storage tank must be charged from and discharged into a single bus."
            )));
    }
}
