// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Technology models that derive per-timestep series from weather data and
//! component parameters.

pub(crate) mod absorption;
pub(crate) mod heat_pump;
pub(crate) mod load_profile;
pub(crate) mod occupancy;
pub(crate) mod photovoltaic;
pub(crate) mod solar_position;
pub(crate) mod solar_thermal;
pub(crate) mod stratified_storage;
pub(crate) mod wind;

/// Offset between degrees Celsius and Kelvin.
pub(crate) const KELVIN: f64 = 273.15;

/// Clips feed-in values to `[0, 1]`, replacing `NaN` with `0`.
pub(crate) fn clip_unit_interval(values: Vec<f64>) -> Vec<f64> {
    values
        .into_iter()
        .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
        .collect()
}

/// Linearly interpolates `x` on the curve given by `points`, which must be
/// sorted by their first element.  Returns `0` outside the curve.
pub(crate) fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    if x.is_nan() || x < first.0 || x > last.0 {
        return 0.0;
    }
    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if x <= x1 {
            if x1 == x0 {
                return y1;
            }
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    last.1
}

/// Returns the mean of `values`, or `0` if it is empty.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
