// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Heat losses of a cylindrical stratified thermal storage tank.

/// Density of water, kg/m³.
const WATER_DENSITY: f64 = 971.78;
/// Heat capacity of water, J/(kg·K).
const WATER_HEAT_CAPACITY: f64 = 4195.52;

/// Loss coefficients of a stratified thermal storage.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct StorageLosses {
    /// Relative loss of the stored energy per timestep.
    pub loss_rate: f64,
    /// Loss per timestep relative to the nominal storage capacity.
    pub fixed_losses_relative: Vec<f64>,
    /// Absolute loss per timestep, kW.
    pub fixed_losses_absolute: Vec<f64>,
}

/// Computes the losses of a tank with the given insulation U-value
/// (W/(m²·K)) and diameter (m), hot and cold layer temperatures and ambient
/// temperature (°C), for timesteps of `time_increment` hours.
pub(crate) fn calculate_losses(
    u_value: f64,
    diameter: f64,
    temp_h: f64,
    temp_c: f64,
    temp_env: &[f64],
    time_increment: f64,
) -> StorageLosses {
    let seconds = time_increment * 3600.0;
    let wall = 4.0 * u_value / (diameter * WATER_DENSITY * WATER_HEAT_CAPACITY);

    StorageLosses {
        loss_rate: wall * seconds,
        fixed_losses_relative: temp_env
            .iter()
            .map(|env| wall * (temp_c - env) / (temp_h - temp_c) * seconds)
            .collect(),
        fixed_losses_absolute: temp_env
            .iter()
            .map(|env| {
                0.25 * u_value
                    * std::f64::consts::PI
                    * diameter.powi(2)
                    * (temp_h + temp_c - 2.0 * env)
                    * time_increment
                    * 1e-3
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_losses() {
        let losses = calculate_losses(0.04, 2.0, 80.0, 40.0, &[10.0, 40.0], 1.0);
        let wall = 4.0 * 0.04 / (2.0 * WATER_DENSITY * WATER_HEAT_CAPACITY);
        assert!((losses.loss_rate - wall * 3600.0).abs() < 1e-15);
        assert!((losses.fixed_losses_relative[0] - wall * 30.0 / 40.0 * 3600.0).abs() < 1e-15);
        // No relative loss when the cold layer has ambient temperature.
        assert_eq!(losses.fixed_losses_relative[1], 0.0);
        let expected = 0.25 * 0.04 * std::f64::consts::PI * 4.0 * 100.0 * 1e-3;
        assert!((losses.fixed_losses_absolute[0] - expected).abs() < 1e-12);
        assert!(losses.loss_rate > 0.0 && losses.loss_rate < 1e-3);
    }
}
