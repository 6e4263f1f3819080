// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating an [`EnergySystemGraph`].

mod validate_components;
mod validate_graph;

use crate::{EnergySystemGraph, Error};

pub(crate) struct EnergySystemValidator<'a> {
    esg: &'a EnergySystemGraph,
}

impl EnergySystemGraph {
    /// Checks the attachments of every component and the connectedness of
    /// the buses.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let validator = EnergySystemValidator { esg: self };

        validator.validate_attached_components()?;
        validator.validate_sources_and_sinks()?;
        validator.validate_conversion_factors()?;
        validator.validate_storages()?;
        if self.config.allow_unconnected_buses {
            validator.warn_unconnected_buses()?;
        } else {
            validator.validate_connected_buses()?;
        }

        Ok(())
    }
}
