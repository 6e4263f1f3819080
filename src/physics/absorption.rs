// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! COP of absorption chillers from the characteristic equation method.

use crate::catalog::AbsorptionChillerParameters;

/// Returns the COP for every cooling water temperature, in °C.
///
/// The characteristic temperature difference is
/// `t_gen - a * t_cool + e * t_chill`, the evaporator and generator heat
/// fluxes are linear in it.  A non-positive generator heat flux yields a COP
/// of zero.
pub(crate) fn cops(
    params: &AbsorptionChillerParameters,
    t_gen: f64,
    t_chill: f64,
    t_cool: &[f64],
) -> Vec<f64> {
    t_cool
        .iter()
        .map(|&t_cool| {
            let ddt = t_gen - params.a * t_cool + params.e * t_chill;
            let q_evap = params.s_e * ddt + params.r_e;
            let q_gen = params.s_g * ddt + params.r_g;
            if q_gen > 0.0 {
                (q_evap / q_gen).max(0.0)
            } else {
                0.0
            }
        })
        .collect()
}

/// Cooling water temperature from ambient temperature and the recooling
/// temperature difference, truncated to whole degrees.
pub(crate) fn cooling_water_temperatures(temperature: &[f64], recooling_difference: f64) -> Vec<f64> {
    temperature
        .iter()
        .map(|t| (t + recooling_difference).trunc())
        .collect()
}
