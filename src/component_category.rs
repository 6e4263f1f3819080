// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the enums that represent the technology or category
//! declared in a component row, and parses them from the table values.

use std::fmt::Display;
use std::str::FromStr;

/// The value of a category column didn't match any known category.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownCategory(pub String);

impl Display for UnknownCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized value `{}`", self.0)
    }
}

/// Represents the type of a solar thermal collector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SolarCollector {
    FlatPlate,
    Concentrating,
}

impl Display for SolarCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolarCollector::FlatPlate => write!(f, "solar_thermal_flat_plate"),
            SolarCollector::Concentrating => write!(f, "concentrated_solar_power"),
        }
    }
}

/// Represents the technology of a source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SourceTechnology {
    Commodity,
    Timeseries,
    Photovoltaic,
    Windpower,
    SolarThermal(SolarCollector),
}

impl Display for SourceTechnology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceTechnology::Commodity => write!(f, "commodity"),
            SourceTechnology::Timeseries => write!(f, "timeseries"),
            SourceTechnology::Photovoltaic => write!(f, "photovoltaic"),
            SourceTechnology::Windpower => write!(f, "windpower"),
            SourceTechnology::SolarThermal(collector) => write!(f, "{collector}"),
        }
    }
}

impl FromStr for SourceTechnology {
    type Err = UnknownCategory;

    /// Only exact matches are accepted, an unknown technology never falls
    /// back to a solar thermal collector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "other" | "commodity" => Ok(SourceTechnology::Commodity),
            "timeseries" => Ok(SourceTechnology::Timeseries),
            "photovoltaic" => Ok(SourceTechnology::Photovoltaic),
            "windpower" => Ok(SourceTechnology::Windpower),
            "solar_thermal_flat_plate" => {
                Ok(SourceTechnology::SolarThermal(SolarCollector::FlatPlate))
            }
            "concentrated_solar_power" => {
                Ok(SourceTechnology::SolarThermal(SolarCollector::Concentrating))
            }
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// The family of a standard load profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlpFamily {
    Electricity,
    ResidentialHeat,
    CommercialHeat,
}

const ELECTRICITY_SLPS: &[&str] = &[
    "h0", "g0", "g1", "g2", "g3", "g4", "g5", "g6", "l0", "l1", "l2",
];
const RESIDENTIAL_HEAT_SLPS: &[&str] = &["efh", "mfh"];
const COMMERCIAL_HEAT_SLPS: &[&str] = &[
    "gmf", "gpd", "ghd", "gwa", "ggb", "gko", "gbd", "gba", "gmk", "gbh", "gga", "gha",
];

/// Represents the demand profile of a sink.
#[derive(Clone, Debug, PartialEq)]
pub enum SinkProfile {
    Unfixed,
    Timeseries,
    Standard { code: String, family: SlpFamily },
    Stochastic,
}

impl Display for SinkProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkProfile::Unfixed => write!(f, "x"),
            SinkProfile::Timeseries => write!(f, "timeseries"),
            SinkProfile::Standard { code, .. } => write!(f, "{code}"),
            SinkProfile::Stochastic => write!(f, "richardson"),
        }
    }
}

impl FromStr for SinkProfile {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let standard = |family| SinkProfile::Standard {
            code: s.to_string(),
            family,
        };
        match s {
            "x" => Ok(SinkProfile::Unfixed),
            "timeseries" => Ok(SinkProfile::Timeseries),
            "richardson" => Ok(SinkProfile::Stochastic),
            _ if ELECTRICITY_SLPS.contains(&s) => Ok(standard(SlpFamily::Electricity)),
            _ if RESIDENTIAL_HEAT_SLPS.contains(&s) => Ok(standard(SlpFamily::ResidentialHeat)),
            _ if COMMERCIAL_HEAT_SLPS.contains(&s) => Ok(standard(SlpFamily::CommercialHeat)),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Represents the type of a transformer.
///
/// `ExtractionTurbineChp` and `OffsetTransformer` are recognized, but are
/// not built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformerType {
    Generic,
    CompressionHeat,
    GenericChp,
    AbsorptionHeat,
    ExtractionTurbineChp,
    OffsetTransformer,
}

impl Display for TransformerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformerType::Generic => write!(f, "GenericTransformer"),
            TransformerType::CompressionHeat => write!(f, "compression_heat_transformer"),
            TransformerType::GenericChp => write!(f, "GenericCHP"),
            TransformerType::AbsorptionHeat => write!(f, "absorption_heat_transformer"),
            TransformerType::ExtractionTurbineChp => write!(f, "ExtractionTurbineCHP"),
            TransformerType::OffsetTransformer => write!(f, "OffsetTransformer"),
        }
    }
}

impl FromStr for TransformerType {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "GenericTransformer" => Ok(TransformerType::Generic),
            "compression_heat_transformer" => Ok(TransformerType::CompressionHeat),
            "GenericCHP" => Ok(TransformerType::GenericChp),
            "absorption_heat_transformer" => Ok(TransformerType::AbsorptionHeat),
            "ExtractionTurbineCHP" => Ok(TransformerType::ExtractionTurbineChp),
            "OffsetTransformer" => Ok(TransformerType::OffsetTransformer),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Represents the heat source of a compression heat transformer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeatSource {
    Ground,
    GroundWater,
    Air,
    Water,
}

impl HeatSource {
    /// The suffix used for the label of the heat source component.
    pub(crate) fn label_suffix(&self) -> &'static str {
        match self {
            HeatSource::Ground => "ground_source",
            HeatSource::GroundWater => "groundwater_source",
            HeatSource::Air => "air_source",
            HeatSource::Water => "water_source",
        }
    }
}

impl Display for HeatSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeatSource::Ground => write!(f, "Ground"),
            HeatSource::GroundWater => write!(f, "GroundWater"),
            HeatSource::Air => write!(f, "Air"),
            HeatSource::Water => write!(f, "Water"),
        }
    }
}

impl FromStr for HeatSource {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Ground" => Ok(HeatSource::Ground),
            "GroundWater" => Ok(HeatSource::GroundWater),
            "Air" => Ok(HeatSource::Air),
            "Water" => Ok(HeatSource::Water),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Represents the operating mode of a heat transformer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeatPumpMode {
    HeatPump,
    Chiller,
}

impl HeatPumpMode {
    /// The temperature level of the auxiliary bus, as used in its label.
    pub(crate) fn temperature_level(&self) -> &'static str {
        match self {
            HeatPumpMode::HeatPump => "_low_temp",
            HeatPumpMode::Chiller => "_high_temp",
        }
    }
}

impl Display for HeatPumpMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeatPumpMode::HeatPump => write!(f, "heat_pump"),
            HeatPumpMode::Chiller => write!(f, "chiller"),
        }
    }
}

impl FromStr for HeatPumpMode {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "heat_pump" => Ok(HeatPumpMode::HeatPump),
            "chiller" => Ok(HeatPumpMode::Chiller),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Represents the type of a storage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StorageType {
    Generic,
    Stratified,
}

impl Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageType::Generic => write!(f, "Generic"),
            StorageType::Stratified => write!(f, "Stratified"),
        }
    }
}

impl FromStr for StorageType {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Generic" => Ok(StorageType::Generic),
            "Stratified" => Ok(StorageType::Stratified),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Represents whether a link can transport energy in both directions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinkDirection {
    Directed,
    Undirected,
}

impl Display for LinkDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkDirection::Directed => write!(f, "directed"),
            LinkDirection::Undirected => write!(f, "undirected"),
        }
    }
}

impl FromStr for LinkDirection {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "directed" => Ok(LinkDirection::Directed),
            "undirected" => Ok(LinkDirection::Undirected),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_technology() {
        assert_eq!("other".parse(), Ok(SourceTechnology::Commodity));
        assert_eq!("commodity".parse(), Ok(SourceTechnology::Commodity));
        assert_eq!(
            "concentrated_solar_power".parse(),
            Ok(SourceTechnology::SolarThermal(SolarCollector::Concentrating))
        );
        assert_eq!(
            "solar_thermal".parse::<SourceTechnology>(),
            Err(UnknownCategory("solar_thermal".to_string()))
        );
        assert_eq!(
            SourceTechnology::SolarThermal(SolarCollector::FlatPlate).to_string(),
            "solar_thermal_flat_plate"
        );
    }

    #[test]
    fn test_load_profile() {
        assert_eq!("x".parse(), Ok(SinkProfile::Unfixed));
        assert_eq!(
            "h0".parse(),
            Ok(SinkProfile::Standard {
                code: "h0".to_string(),
                family: SlpFamily::Electricity
            })
        );
        assert_eq!(
            "efh".parse(),
            Ok(SinkProfile::Standard {
                code: "efh".to_string(),
                family: SlpFamily::ResidentialHeat
            })
        );
        assert_eq!(
            "ghd".parse(),
            Ok(SinkProfile::Standard {
                code: "ghd".to_string(),
                family: SlpFamily::CommercialHeat
            })
        );
        assert!("h7".parse::<SinkProfile>().is_err());
    }

    #[test]
    fn test_transformer_type() {
        assert_eq!("GenericCHP".parse(), Ok(TransformerType::GenericChp));
        assert_eq!(
            "OffsetTransformer".parse(),
            Ok(TransformerType::OffsetTransformer)
        );
        assert!("SteamTurbine".parse::<TransformerType>().is_err());
    }

    #[test]
    fn test_heat_pump_labels() {
        assert_eq!(HeatPumpMode::HeatPump.temperature_level(), "_low_temp");
        assert_eq!(HeatPumpMode::Chiller.temperature_level(), "_high_temp");
        assert_eq!(HeatSource::GroundWater.label_suffix(), "groundwater_source");
        assert_eq!("Geothermal".parse::<HeatSource>().map_err(|e| e.to_string()),
            Err("unrecognized value `Geothermal`".to_string()));
    }
}
