// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Typed rows of the scenario tables.
//!
//! Field names follow the column headers of the scenario workbook.  Blank
//! numeric cells default to `0`, flags accept `0`/`1`/`true`/`false`/`x`.

use serde::Deserialize;

use crate::network::Investment;

pub(crate) mod de {
    //! Lenient deserializers for hand-edited table cells.

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    const UNSET: &[&str] = &["", "x", "X", "None", "none"];

    pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        let value = value.trim();
        if UNSET.contains(&value) {
            return Ok(0.0);
        }
        value
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid number `{value}`")))
    }

    pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        match value.trim() {
            "1" | "1.0" | "true" | "True" | "TRUE" => Ok(true),
            "0" | "0.0" | "false" | "False" | "FALSE" | "" | "x" | "X" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag `{other}`"))),
        }
    }

    pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?
            .unwrap_or_default()
            .trim()
            .to_string())
    }
}

/// Returns `true` if a reference cell is left empty.
pub(crate) fn is_unset(value: &str) -> bool {
    ["X", "x", "", "0", "None", "none", "nan"].contains(&value.trim())
}

/// A row of the `energysystem` table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EnergySystemRow {
    #[serde(rename = "start date", deserialize_with = "de::text")]
    pub start_date: String,
    #[serde(rename = "temporal resolution", deserialize_with = "de::text")]
    pub temporal_resolution: String,
    #[serde(deserialize_with = "de::number")]
    pub periods: f64,
}

/// A row of the `buses` table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BusRow {
    #[serde(deserialize_with = "de::text")]
    pub label: String,
    #[serde(deserialize_with = "de::flag")]
    pub active: bool,
    #[serde(deserialize_with = "de::flag")]
    pub excess: bool,
    #[serde(deserialize_with = "de::flag")]
    pub shortage: bool,
    #[serde(rename = "excess costs /(CU/kWh)", deserialize_with = "de::number")]
    pub excess_costs: f64,
    #[serde(
        rename = "variable excess constraint costs /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub excess_constraint_costs: f64,
    #[serde(rename = "shortage costs /(CU/kWh)", deserialize_with = "de::number")]
    pub shortage_costs: f64,
    #[serde(
        rename = "variable shortage constraint costs /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub shortage_constraint_costs: f64,
}

/// A row of the `sources` table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SourceRow {
    #[serde(deserialize_with = "de::text")]
    pub label: String,
    #[serde(deserialize_with = "de::flag")]
    pub active: bool,
    #[serde(deserialize_with = "de::text")]
    pub fixed: String,
    #[serde(deserialize_with = "de::text")]
    pub technology: String,
    #[serde(deserialize_with = "de::text")]
    pub output: String,
    #[serde(deserialize_with = "de::text")]
    pub input: String,
    #[serde(rename = "variable costs /(CU/kWh)", deserialize_with = "de::number")]
    pub variable_costs: f64,
    #[serde(
        rename = "variable constraint costs /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub variable_constraint_costs: f64,
    #[serde(rename = "existing capacity /(kW)", deserialize_with = "de::number")]
    pub existing_capacity: f64,
    #[serde(
        rename = "min. investment capacity /(kW)",
        deserialize_with = "de::number"
    )]
    pub min_investment_capacity: f64,
    #[serde(
        rename = "max. investment capacity /(kW)",
        deserialize_with = "de::number"
    )]
    pub max_investment_capacity: f64,
    #[serde(
        rename = "periodical costs /(CU/(kW a))",
        deserialize_with = "de::number"
    )]
    pub periodical_costs: f64,
    #[serde(
        rename = "periodical constraint costs /(CU/(kW a))",
        deserialize_with = "de::number"
    )]
    pub periodical_constraint_costs: f64,
    #[serde(rename = "Non-Convex Investment", deserialize_with = "de::flag")]
    pub nonconvex_investment: bool,
    #[serde(rename = "Fix Investment Costs /(CU/a)", deserialize_with = "de::number")]
    pub fix_investment_costs: f64,

    #[serde(rename = "Modul Model (PV ONLY)", deserialize_with = "de::text")]
    pub pv_module: String,
    #[serde(rename = "Inverter Model (PV ONLY)", deserialize_with = "de::text")]
    pub pv_inverter: String,
    #[serde(rename = "Azimuth (PV ONLY)", deserialize_with = "de::number")]
    pub pv_azimuth: f64,
    #[serde(rename = "Surface Tilt (PV ONLY)", deserialize_with = "de::number")]
    pub pv_tilt: f64,
    #[serde(rename = "Albedo (PV ONLY)", deserialize_with = "de::number")]
    pub pv_albedo: f64,
    #[serde(rename = "Latitude (PV ONLY)", deserialize_with = "de::number")]
    pub pv_latitude: f64,
    #[serde(rename = "Longitude (PV ONLY)", deserialize_with = "de::number")]
    pub pv_longitude: f64,

    #[serde(rename = "Turbine Model (Windpower ONLY)", deserialize_with = "de::text")]
    pub turbine_model: String,
    #[serde(rename = "Hub Height (Windpower ONLY)", deserialize_with = "de::number")]
    pub hub_height: f64,

    #[serde(rename = "Latitude (Solar Heat)", deserialize_with = "de::number")]
    pub collector_latitude: f64,
    #[serde(rename = "Longitude (Solar Heat)", deserialize_with = "de::number")]
    pub collector_longitude: f64,
    #[serde(rename = "Surface Tilt (Solar Heat)", deserialize_with = "de::number")]
    pub collector_tilt: f64,
    #[serde(rename = "Azimuth (Solar Heat)", deserialize_with = "de::number")]
    pub collector_azimuth: f64,
    #[serde(rename = "Cleanliness (Solar Heat)", deserialize_with = "de::number")]
    pub cleanliness: f64,
    #[serde(rename = "ETA 0 (Solar Heat)", deserialize_with = "de::number")]
    pub eta_0: f64,
    #[serde(rename = "A1 (Solar Heat)", deserialize_with = "de::number")]
    pub a_1: f64,
    #[serde(rename = "A2 (Solar Heat)", deserialize_with = "de::number")]
    pub a_2: f64,
    #[serde(rename = "C1 (Solar Heat)", deserialize_with = "de::number")]
    pub c_1: f64,
    #[serde(rename = "C2 (Solar Heat)", deserialize_with = "de::number")]
    pub c_2: f64,
    #[serde(
        rename = "Temperature Inlet /deg C (Solar Heat)",
        deserialize_with = "de::number"
    )]
    pub temperature_inlet: f64,
    #[serde(
        rename = "Temperature Difference /deg C (Solar Heat)",
        deserialize_with = "de::number"
    )]
    pub temperature_difference: f64,
    #[serde(
        rename = "Conversion Factor /(sqm/kW) (Solar Heat)",
        deserialize_with = "de::number"
    )]
    pub area_per_kw: f64,
    #[serde(rename = "Peripheral Losses (Solar Heat)", deserialize_with = "de::number")]
    pub peripheral_losses: f64,
    #[serde(
        rename = "Electric Consumption (Solar Heat)",
        deserialize_with = "de::number"
    )]
    pub electric_consumption: f64,
}

impl SourceRow {
    pub(crate) fn investment(&self) -> Investment {
        Investment {
            existing: self.existing_capacity,
            minimum: self.min_investment_capacity,
            maximum: self.max_investment_capacity,
            periodic_cost: self.periodical_costs,
            periodic_constraint_cost: self.periodical_constraint_costs,
            nonconvex: self.nonconvex_investment,
            offset: self.fix_investment_costs,
        }
    }
}

/// A row of the `demand` table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SinkRow {
    #[serde(deserialize_with = "de::text")]
    pub label: String,
    #[serde(deserialize_with = "de::flag")]
    pub active: bool,
    #[serde(deserialize_with = "de::text")]
    pub fixed: String,
    #[serde(deserialize_with = "de::text")]
    pub input: String,
    #[serde(rename = "load profile", deserialize_with = "de::text")]
    pub load_profile: String,
    #[serde(rename = "nominal value /(kW)", deserialize_with = "de::number")]
    pub nominal_value: f64,
    #[serde(rename = "annual demand /(kWh/a)", deserialize_with = "de::number")]
    pub annual_demand: f64,
    #[serde(rename = "building class [HEAT SLP ONLY]", deserialize_with = "de::number")]
    pub building_class: f64,
    #[serde(rename = "wind class [HEAT SLP ONLY]", deserialize_with = "de::number")]
    pub wind_class: f64,
    #[serde(rename = "occupants [RICHARDSON]", deserialize_with = "de::number")]
    pub occupants: f64,
}

/// A row of the `transformers` table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransformerRow {
    #[serde(deserialize_with = "de::text")]
    pub label: String,
    #[serde(deserialize_with = "de::flag")]
    pub active: bool,
    #[serde(rename = "transformer type", deserialize_with = "de::text")]
    pub transformer_type: String,
    #[serde(deserialize_with = "de::text")]
    pub input: String,
    #[serde(deserialize_with = "de::text")]
    pub output: String,
    #[serde(deserialize_with = "de::text")]
    pub output2: String,
    #[serde(deserialize_with = "de::number")]
    pub efficiency: f64,
    #[serde(deserialize_with = "de::number")]
    pub efficiency2: f64,
    #[serde(
        rename = "variable input costs /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub variable_input_costs: f64,
    #[serde(
        rename = "variable input constraint costs /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub variable_input_constraint_costs: f64,
    #[serde(
        rename = "variable output costs /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub variable_output_costs: f64,
    #[serde(
        rename = "variable output constraint costs /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub variable_output_constraint_costs: f64,
    #[serde(
        rename = "variable output costs 2 /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub variable_output_costs_2: f64,
    #[serde(
        rename = "variable output constraint costs 2 /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub variable_output_constraint_costs_2: f64,
    #[serde(rename = "existing capacity /(kW)", deserialize_with = "de::number")]
    pub existing_capacity: f64,
    #[serde(
        rename = "min. investment capacity /(kW)",
        deserialize_with = "de::number"
    )]
    pub min_investment_capacity: f64,
    #[serde(
        rename = "max. investment capacity /(kW)",
        deserialize_with = "de::number"
    )]
    pub max_investment_capacity: f64,
    #[serde(
        rename = "periodical costs /(CU/(kW a))",
        deserialize_with = "de::number"
    )]
    pub periodical_costs: f64,
    #[serde(
        rename = "periodical constraint costs /(CU/(kW a))",
        deserialize_with = "de::number"
    )]
    pub periodical_constraint_costs: f64,
    #[serde(rename = "Non-Convex Investment", deserialize_with = "de::flag")]
    pub nonconvex_investment: bool,
    #[serde(rename = "Fix Investment Costs /(CU/a)", deserialize_with = "de::number")]
    pub fix_investment_costs: f64,

    #[serde(rename = "heat source (CHT)", deserialize_with = "de::text")]
    pub heat_source: String,
    #[serde(deserialize_with = "de::text")]
    pub mode: String,
    #[serde(rename = "temperature high /deg C (CHT)", deserialize_with = "de::number")]
    pub temperature_high: f64,
    #[serde(rename = "temperature low /deg C (CHT)", deserialize_with = "de::number")]
    pub temperature_low: f64,
    #[serde(rename = "quality grade (CHT)", deserialize_with = "de::number")]
    pub quality_grade: f64,
    #[serde(rename = "area /(sq m) (CHT)", deserialize_with = "de::number")]
    pub area: f64,
    #[serde(
        rename = "length of the geoth. probe /m (CHT)",
        deserialize_with = "de::number"
    )]
    pub probe_length: f64,
    #[serde(
        rename = "heat extraction /(kW/(m*a)) (CHT)",
        deserialize_with = "de::number"
    )]
    pub heat_extraction: f64,
    #[serde(
        rename = "min. borehole area /(sq m) (CHT)",
        deserialize_with = "de::number"
    )]
    pub min_borehole_area: f64,
    #[serde(rename = "temp threshold icing (CHT)", deserialize_with = "de::number")]
    pub icing_threshold: f64,
    #[serde(rename = "factor icing (CHT)", deserialize_with = "de::number")]
    pub icing_factor: f64,

    #[serde(rename = "name (AbsCH)", deserialize_with = "de::text")]
    pub chiller_name: String,
    #[serde(
        rename = "high temperature /deg C (AbsCH)",
        deserialize_with = "de::number"
    )]
    pub generator_temperature: f64,
    #[serde(
        rename = "chilling temperature /deg C (AbsCH)",
        deserialize_with = "de::number"
    )]
    pub chilling_temperature: f64,
    #[serde(
        rename = "recooling temperature difference /deg C (AbsCH)",
        deserialize_with = "de::number"
    )]
    pub recooling_difference: f64,
    #[serde(
        rename = "electrical input conversion factor (AbsCH)",
        deserialize_with = "de::number"
    )]
    pub electrical_input_factor: f64,

    #[serde(
        rename = "share of flue gas loss at max heat extraction [GenericCHP]",
        deserialize_with = "de::number"
    )]
    pub flue_gas_share_max: f64,
    #[serde(
        rename = "share of flue gas loss at min heat extraction [GenericCHP]",
        deserialize_with = "de::number"
    )]
    pub flue_gas_share_min: f64,
    #[serde(
        rename = "max. electric power without district heating [GenericCHP]",
        deserialize_with = "de::number"
    )]
    pub power_max_without_heat: f64,
    #[serde(
        rename = "min. electric power without district heating [GenericCHP]",
        deserialize_with = "de::number"
    )]
    pub power_min_without_heat: f64,
    #[serde(
        rename = "el. eff. at max. fuel flow w/o distr. heating [GenericCHP]",
        deserialize_with = "de::number"
    )]
    pub efficiency_max_without_heat: f64,
    #[serde(
        rename = "el. eff. at min. fuel flow w/o distr. heating [GenericCHP]",
        deserialize_with = "de::number"
    )]
    pub efficiency_min_without_heat: f64,
    #[serde(
        rename = "minimal therm. condenser load to cooling water [GenericCHP]",
        deserialize_with = "de::number"
    )]
    pub condenser_load_min: f64,
    #[serde(rename = "power loss index [GenericCHP]", deserialize_with = "de::number")]
    pub power_loss_index: f64,
    #[serde(rename = "back pressure [GenericCHP]", deserialize_with = "de::flag")]
    pub back_pressure: bool,
}

impl TransformerRow {
    pub(crate) fn investment(&self) -> Investment {
        Investment {
            existing: self.existing_capacity,
            minimum: self.min_investment_capacity,
            maximum: self.max_investment_capacity,
            periodic_cost: self.periodical_costs,
            periodic_constraint_cost: self.periodical_constraint_costs,
            nonconvex: self.nonconvex_investment,
            offset: self.fix_investment_costs,
        }
    }
}

/// A row of the `storages` table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct StorageRow {
    #[serde(deserialize_with = "de::text")]
    pub label: String,
    #[serde(deserialize_with = "de::flag")]
    pub active: bool,
    #[serde(rename = "storage type", deserialize_with = "de::text")]
    pub storage_type: String,
    #[serde(deserialize_with = "de::text")]
    pub bus: String,
    #[serde(rename = "existing capacity /(kWh)", deserialize_with = "de::number")]
    pub existing_capacity: f64,
    #[serde(
        rename = "min. investment capacity /(kWh)",
        deserialize_with = "de::number"
    )]
    pub min_investment_capacity: f64,
    #[serde(
        rename = "max. investment capacity /(kWh)",
        deserialize_with = "de::number"
    )]
    pub max_investment_capacity: f64,
    #[serde(
        rename = "periodical costs /(CU/(kWh a))",
        deserialize_with = "de::number"
    )]
    pub periodical_costs: f64,
    #[serde(
        rename = "periodical constraint costs /(CU/(kWh a))",
        deserialize_with = "de::number"
    )]
    pub periodical_constraint_costs: f64,
    #[serde(rename = "Non-Convex Investment", deserialize_with = "de::flag")]
    pub nonconvex_investment: bool,
    #[serde(rename = "Fix Investment Costs /(CU/a)", deserialize_with = "de::number")]
    pub fix_investment_costs: f64,
    #[serde(rename = "input/capacity ratio (invest)", deserialize_with = "de::number")]
    pub input_capacity_ratio: f64,
    #[serde(rename = "output/capacity ratio (invest)", deserialize_with = "de::number")]
    pub output_capacity_ratio: f64,
    #[serde(rename = "capacity loss (Generic only)", deserialize_with = "de::number")]
    pub capacity_loss: f64,
    #[serde(rename = "efficiency inflow", deserialize_with = "de::number")]
    pub efficiency_inflow: f64,
    #[serde(rename = "efficiency outflow", deserialize_with = "de::number")]
    pub efficiency_outflow: f64,
    #[serde(rename = "capacity min", deserialize_with = "de::number")]
    pub capacity_min: f64,
    #[serde(rename = "capacity max", deserialize_with = "de::number")]
    pub capacity_max: f64,
    #[serde(rename = "variable input costs", deserialize_with = "de::number")]
    pub variable_input_costs: f64,
    #[serde(rename = "variable output costs", deserialize_with = "de::number")]
    pub variable_output_costs: f64,
    #[serde(
        rename = "variable input constraint costs /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub variable_input_constraint_costs: f64,
    #[serde(
        rename = "variable output constraint costs /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub variable_output_constraint_costs: f64,
    #[serde(
        rename = "diameter /m (Stratified Storage)",
        deserialize_with = "de::number"
    )]
    pub diameter: f64,
    #[serde(
        rename = "temperature high /deg C (Stratified Storage)",
        deserialize_with = "de::number"
    )]
    pub temperature_high: f64,
    #[serde(
        rename = "temperature low /deg C (Stratified Storage)",
        deserialize_with = "de::number"
    )]
    pub temperature_low: f64,
    #[serde(
        rename = "U value /(W/(sqm*K)) (Stratified Storage)",
        deserialize_with = "de::number"
    )]
    pub u_value: f64,
}

impl StorageRow {
    pub(crate) fn investment(&self) -> Investment {
        Investment {
            existing: self.existing_capacity,
            minimum: self.min_investment_capacity,
            maximum: self.max_investment_capacity,
            periodic_cost: self.periodical_costs,
            periodic_constraint_cost: self.periodical_constraint_costs,
            nonconvex: self.nonconvex_investment,
            offset: self.fix_investment_costs,
        }
    }
}

/// A row of the `links` table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LinkRow {
    #[serde(deserialize_with = "de::text")]
    pub label: String,
    #[serde(deserialize_with = "de::flag")]
    pub active: bool,
    #[serde(deserialize_with = "de::text")]
    pub bus_1: String,
    #[serde(deserialize_with = "de::text")]
    pub bus_2: String,
    #[serde(rename = "(un)directed", deserialize_with = "de::text")]
    pub directedness: String,
    #[serde(deserialize_with = "de::number")]
    pub efficiency: f64,
    #[serde(
        rename = "variable output costs /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub variable_output_costs: f64,
    #[serde(
        rename = "variable constraint costs /(CU/kWh)",
        deserialize_with = "de::number"
    )]
    pub variable_constraint_costs: f64,
    #[serde(rename = "existing capacity /(kW)", deserialize_with = "de::number")]
    pub existing_capacity: f64,
    #[serde(
        rename = "min. investment capacity /(kW)",
        deserialize_with = "de::number"
    )]
    pub min_investment_capacity: f64,
    #[serde(
        rename = "max. investment capacity /(kW)",
        deserialize_with = "de::number"
    )]
    pub max_investment_capacity: f64,
    #[serde(
        rename = "periodical costs /(CU/(kW a))",
        deserialize_with = "de::number"
    )]
    pub periodical_costs: f64,
    #[serde(
        rename = "periodical constraint costs /(CU/(kW a))",
        deserialize_with = "de::number"
    )]
    pub periodical_constraint_costs: f64,
    #[serde(rename = "Non-Convex Investment", deserialize_with = "de::flag")]
    pub nonconvex_investment: bool,
    #[serde(rename = "Fix Investment Costs /(CU/a)", deserialize_with = "de::number")]
    pub fix_investment_costs: f64,
}

impl LinkRow {
    pub(crate) fn investment(&self) -> Investment {
        Investment {
            existing: self.existing_capacity,
            minimum: self.min_investment_capacity,
            maximum: self.max_investment_capacity,
            periodic_cost: self.periodical_costs,
            periodic_constraint_cost: self.periodical_constraint_costs,
            nonconvex: self.nonconvex_investment,
            offset: self.fix_investment_costs,
        }
    }
}

/// A row of the `weather_data` table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeatherRow {
    #[serde(deserialize_with = "de::number")]
    pub dhi: f64,
    #[serde(deserialize_with = "de::number")]
    pub dirhi: f64,
    #[serde(deserialize_with = "de::number")]
    pub pressure: f64,
    #[serde(deserialize_with = "de::number")]
    pub temperature: f64,
    #[serde(deserialize_with = "de::number")]
    pub windspeed: f64,
    #[serde(deserialize_with = "de::number")]
    pub z0: f64,
    #[serde(deserialize_with = "de::number")]
    pub ground_temp: f64,
    #[serde(deserialize_with = "de::number")]
    pub groundwater_temp: f64,
    #[serde(deserialize_with = "de::number")]
    pub water_temp: f64,
}
