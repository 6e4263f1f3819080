// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Sun position and irradiance on tilted surfaces.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Minimum cosine of the zenith angle used to project direct horizontal
/// irradiance onto a surface (zenith 85°).
const MIN_COS_ZENITH: f64 = 0.0872;

/// The position of the sun, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SolarPosition {
    pub zenith: f64,
    /// Measured clockwise from north.
    pub azimuth: f64,
}

impl SolarPosition {
    /// Computes the sun position at a UTC time, using the NOAA
    /// fractional-year approximation.
    pub(crate) fn at(time: NaiveDateTime, latitude: f64, longitude: f64) -> Self {
        let hour = time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0;
        let gamma = 2.0 * std::f64::consts::PI / 365.0 * (time.ordinal0() as f64 + (hour - 12.0) / 24.0);

        let eqtime = 229.18
            * (0.000075 + 0.001868 * gamma.cos()
                - 0.032077 * gamma.sin()
                - 0.014615 * (2.0 * gamma).cos()
                - 0.040849 * (2.0 * gamma).sin());
        let declination = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
            - 0.006758 * (2.0 * gamma).cos()
            + 0.000907 * (2.0 * gamma).sin()
            - 0.002697 * (3.0 * gamma).cos()
            + 0.00148 * (3.0 * gamma).sin();

        let true_solar_minutes = hour * 60.0 + eqtime + 4.0 * longitude;
        let hour_angle = (true_solar_minutes / 4.0 - 180.0).to_radians();
        let lat = latitude.to_radians();

        let cos_zenith = (lat.sin() * declination.sin()
            + lat.cos() * declination.cos() * hour_angle.cos())
        .clamp(-1.0, 1.0);
        let zenith = cos_zenith.acos().to_degrees();

        let azimuth = (hour_angle
            .sin()
            .atan2(hour_angle.cos() * lat.sin() - declination.tan() * lat.cos())
            .to_degrees()
            + 180.0)
            .rem_euclid(360.0);

        Self { zenith, azimuth }
    }

    /// Cosine of the angle of incidence on a surface with the given tilt and
    /// azimuth, in degrees.  Negative when the sun is behind the surface.
    pub(crate) fn cos_incidence(&self, tilt: f64, azimuth: f64) -> f64 {
        let (zenith, tilt) = (self.zenith.to_radians(), tilt.to_radians());
        zenith.cos() * tilt.cos()
            + zenith.sin() * tilt.sin() * (self.azimuth - azimuth).to_radians().cos()
    }

    /// Projects direct horizontal irradiance onto a surface.
    pub(crate) fn beam_on_surface(&self, dirhi: f64, tilt: f64, azimuth: f64) -> f64 {
        if self.zenith >= 90.0 {
            return 0.0;
        }
        let cos_zenith = self.zenith.to_radians().cos().max(MIN_COS_ZENITH);
        dirhi * self.cos_incidence(tilt, azimuth).max(0.0) / cos_zenith
    }
}

/// Irradiance on a tilted surface with the isotropic sky model, W/m².
pub(crate) fn plane_of_array(
    position: &SolarPosition,
    dirhi: f64,
    dhi: f64,
    tilt: f64,
    azimuth: f64,
    albedo: f64,
) -> f64 {
    let cos_tilt = tilt.to_radians().cos();
    let beam = position.beam_on_surface(dirhi, tilt, azimuth);
    let sky_diffuse = dhi * (1.0 + cos_tilt) / 2.0;
    let ground_reflected = (dirhi + dhi) * albedo * (1.0 - cos_tilt) / 2.0;
    beam + sky_diffuse + ground_reflected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn time(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2012, month, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_solar_noon() {
        // Greenwich, summer solstice: the sun is due south, about 28° from
        // the zenith.
        let position = SolarPosition::at(time(6, 21, 12), 51.5, 0.0);
        assert!((position.zenith - 28.0).abs() < 1.0, "{position:?}");
        assert!((position.azimuth - 180.0).abs() < 3.0, "{position:?}");

        let position = SolarPosition::at(time(12, 21, 12), 51.5, 0.0);
        assert!((position.zenith - 75.0).abs() < 1.0, "{position:?}");
    }

    #[test]
    fn test_night() {
        let position = SolarPosition::at(time(6, 21, 0), 51.5, 0.0);
        assert!(position.zenith > 90.0);
        assert_eq!(position.beam_on_surface(500.0, 30.0, 180.0), 0.0);
    }

    #[test]
    fn test_plane_of_array() {
        let position = SolarPosition {
            zenith: 30.0,
            azimuth: 180.0,
        };
        // A surface facing the sun receives the beam at normal incidence.
        assert!((position.cos_incidence(30.0, 180.0) - 1.0).abs() < 1e-9);

        // A horizontal surface receives the horizontal irradiance.
        let poa = plane_of_array(&position, 400.0, 100.0, 0.0, 180.0, 0.2);
        assert!((poa - 500.0).abs() < 1e-9);
    }
}
