// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Coefficients of performance of compression heat pumps and chillers.

use super::KELVIN;
use crate::component_category::HeatPumpMode;

/// COP derating of heat pumps for icing of the evaporator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Icing {
    /// Source temperature at or below which icing occurs, °C.
    pub threshold: f64,
    pub factor: f64,
}

/// Returns the COP for every pair of hot and cold side temperatures, in °C.
///
/// The COP is the Carnot COP reduced by the exergetic quality grade.  In
/// chiller mode, the hot side temperature is floored at 0.1 K above the cold
/// side temperature.  Icing only applies in heat pump mode.
pub(crate) fn cops(
    mode: HeatPumpMode,
    temp_high: &[f64],
    temp_low: &[f64],
    quality_grade: f64,
    icing: Option<Icing>,
) -> Vec<f64> {
    temp_high
        .iter()
        .zip(temp_low)
        .map(|(&high, &low)| {
            let high = match mode {
                HeatPumpMode::Chiller => high.max(low + 0.1),
                HeatPumpMode::HeatPump => high,
            };
            let (th, tl) = (high + KELVIN, low + KELVIN);
            match mode {
                HeatPumpMode::HeatPump => {
                    let cop = quality_grade * th / (th - tl);
                    match icing {
                        Some(icing) if low <= icing.threshold => cop * icing.factor,
                        _ => cop,
                    }
                }
                HeatPumpMode::Chiller => quality_grade * tl / (th - tl),
            }
        })
        .collect()
}
