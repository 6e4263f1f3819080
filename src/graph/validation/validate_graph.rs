// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating that the nodes of an [`EnergySystemGraph`] are
//! connected.

use crate::Error;

use super::EnergySystemValidator;

impl EnergySystemValidator<'_> {
    /// Validates that every component has at least one flow.
    pub(super) fn validate_attached_components(&self) -> Result<(), Error> {
        for component in self.esg.components() {
            let label = component.label();
            if self.esg.inputs(label)?.next().is_none()
                && self.esg.outputs(label)?.next().is_none()
            {
                return Err(Error::invalid_graph(format!(
                    "Component {label} has no flows."
                )));
            }
        }
        Ok(())
    }

    /// Validates that every bus has at least one component attached to it.
    pub(super) fn validate_connected_buses(&self) -> Result<(), Error> {
        let unconnected = self.unconnected_buses()?;
        if !unconnected.is_empty() {
            return Err(Error::invalid_graph(format!(
                "Buses {:?} have no components attached.",
                unconnected
            )));
        }

        Ok(())
    }

    /// Logs the buses that no component is attached to.
    pub(super) fn warn_unconnected_buses(&self) -> Result<(), Error> {
        let unconnected = self.unconnected_buses()?;
        if !unconnected.is_empty() {
            tracing::warn!("Buses {:?} have no components attached.", unconnected);
        }
        Ok(())
    }

    fn unconnected_buses(&self) -> Result<Vec<&str>, Error> {
        let mut unconnected = vec![];
        for bus in self.esg.buses() {
            let label = bus.label();
            if self.esg.inputs(label)?.next().is_none()
                && self.esg.outputs(label)?.next().is_none()
            {
                unconnected.push(label);
            }
        }
        Ok(unconnected)
    }
}
