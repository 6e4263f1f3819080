// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Generic and stratified thermal storages.

use super::parse_category;
use crate::component_category::StorageType;
use crate::context::ScenarioContext;
use crate::network::{Component, Flow, NodeKind, Series, StorageParameters};
use crate::physics::stratified_storage::calculate_losses;
use crate::registry::BusRegistry;
use crate::rows::StorageRow;
use crate::Error;

/// Creates the storage of a storage row, charged from and discharged into
/// the row's bus.
pub fn create_storage(
    row: &StorageRow,
    context: &ScenarioContext,
    registry: &BusRegistry,
) -> Result<Component, Error> {
    let label = row.label.as_str();
    let storage_type: StorageType = parse_category(label, "storage type", &row.storage_type)?;
    let bus = registry.bus(label, "bus", &row.bus)?;

    let mut params = StorageParameters {
        loss_rate: Series::Scalar(row.capacity_loss),
        fixed_losses_relative: None,
        fixed_losses_absolute: None,
        inflow_conversion_factor: row.efficiency_inflow,
        outflow_conversion_factor: row.efficiency_outflow,
        invest_relation_input_capacity: row.input_capacity_ratio,
        invest_relation_output_capacity: row.output_capacity_ratio,
        min_storage_level: (row.capacity_min > 0.0).then_some(row.capacity_min),
        max_storage_level: (row.capacity_max > 0.0).then_some(row.capacity_max),
        investment: row.investment(),
    };

    if storage_type == StorageType::Stratified {
        if row.diameter <= 0.0 {
            return Err(Error::field(
                label,
                "diameter /m (Stratified Storage)",
                format!("must be positive, found {}", row.diameter),
            ));
        }
        if row.temperature_high <= row.temperature_low {
            return Err(Error::field(
                label,
                "temperature high /deg C (Stratified Storage)",
                "must be above the low temperature",
            ));
        }
        let losses = calculate_losses(
            row.u_value,
            row.diameter,
            row.temperature_high,
            row.temperature_low,
            &context.weather().temperature,
            context.settings().timestep_hours(),
        );
        tracing::debug!("{label}: loss rate {:.2e} per timestep.", losses.loss_rate);
        params.loss_rate = Series::Scalar(losses.loss_rate);
        params.fixed_losses_relative = Some(Series::Values(losses.fixed_losses_relative));
        params.fixed_losses_absolute = Some(Series::Values(losses.fixed_losses_absolute));
    }

    tracing::info!("Created {storage_type} storage {label}.");
    Ok(Component::new(label, NodeKind::Storage(params))
        .with_input(
            &bus,
            Flow::with_costs(row.variable_input_costs, row.variable_input_constraint_costs),
        )
        .with_output(
            &bus,
            Flow::with_costs(
                row.variable_output_costs,
                row.variable_output_constraint_costs,
            ),
        ))
}
