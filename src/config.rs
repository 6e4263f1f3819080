// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for building an
//! `EnergySystemGraph`.

/// Configuration options for building an `EnergySystemGraph`.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Whether to allow buses in the graph that no component is attached
    /// to.  Allowed buses are only logged with a warning.
    pub allow_unconnected_buses: bool,

    /// Seed of the random number generator used by the stochastic
    /// residential demand model.  Builds with the same seed produce the same
    /// demand curves.
    pub occupancy_seed: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            allow_unconnected_buses: true,
            occupancy_seed: 42,
        }
    }
}
