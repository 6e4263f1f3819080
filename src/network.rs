// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The data model handed to the solver: buses, components and the flows that
//! attach them to each other.

use std::collections::BTreeMap;
use std::fmt::Display;

/// A parameter that is either constant over time or given per timestep.
#[derive(Clone, Debug, PartialEq)]
pub enum Series {
    Scalar(f64),
    Values(Vec<f64>),
}

impl Series {
    /// Returns the value at timestep `t`, or `None` if a time series is
    /// shorter than `t + 1`.
    pub fn at(&self, t: usize) -> Option<f64> {
        match self {
            Series::Scalar(v) => Some(*v),
            Series::Values(values) => values.get(t).copied(),
        }
    }

    /// Returns the number of timesteps, or `None` for a scalar.
    pub fn len(&self) -> Option<usize> {
        match self {
            Series::Scalar(_) => None,
            Series::Values(values) => Some(values.len()),
        }
    }

    /// Returns `true` if this is a time series without any values.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Returns the mean value, `NaN` for an empty time series.
    pub fn mean(&self) -> f64 {
        match self {
            Series::Scalar(v) => *v,
            Series::Values(values) => values.iter().sum::<f64>() / values.len() as f64,
        }
    }

    pub(crate) fn map(&self, f: impl Fn(f64) -> f64) -> Series {
        match self {
            Series::Scalar(v) => Series::Scalar(f(*v)),
            Series::Values(values) => Series::Values(values.iter().map(|v| f(*v)).collect()),
        }
    }
}

impl From<f64> for Series {
    fn from(value: f64) -> Self {
        Series::Scalar(value)
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Series::Values(values)
    }
}

/// The profile of a flow, relative to its nominal value or invested
/// capacity.
///
/// A flow is either fixed to an exact profile, or bounded by a minimum and a
/// maximum profile.
#[derive(Clone, Debug, PartialEq)]
pub enum Profile {
    Fixed(Series),
    Bounded { min: Series, max: Series },
}

impl Profile {
    /// A profile that allows any value between zero and the nominal value.
    pub fn flexible() -> Self {
        Profile::Bounded {
            min: Series::Scalar(0.0),
            max: Series::Scalar(1.0),
        }
    }

    /// Returns the relative `(min, max)` bounds at timestep `t`.
    pub fn bounds_at(&self, t: usize) -> Option<(f64, f64)> {
        match self {
            Profile::Fixed(fix) => fix.at(t).map(|v| (v, v)),
            Profile::Bounded { min, max } => Some((min.at(t)?, max.at(t)?)),
        }
    }
}

/// Sizing parameters for optional new capacity of a flow or storage.
///
/// `minimum` and `maximum` bound the *additional* capacity, `existing` is
/// added on top of it.
#[derive(Clone, Debug, PartialEq)]
pub struct Investment {
    pub existing: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub periodic_cost: f64,
    pub periodic_constraint_cost: f64,
    pub nonconvex: bool,
    pub offset: f64,
}

impl Default for Investment {
    fn default() -> Self {
        Self {
            existing: 0.0,
            minimum: 0.0,
            maximum: f64::INFINITY,
            periodic_cost: 0.0,
            periodic_constraint_cost: 0.0,
            nonconvex: false,
            offset: 0.0,
        }
    }
}

impl Investment {
    /// Returns the periodic cost of investing in `additional` capacity.
    ///
    /// The offset is only charged for non-convex investments with new
    /// capacity.
    pub fn periodic_cost_of(&self, additional: f64) -> f64 {
        let offset = if self.nonconvex && additional > 0.0 {
            self.offset
        } else {
            0.0
        };
        self.periodic_cost * additional + offset
    }

    /// Returns the `(min, max)` bounds of the total capacity.
    pub fn total_capacity_bounds(&self) -> (f64, f64) {
        (self.existing + self.minimum, self.existing + self.maximum)
    }

    /// Returns a copy with all capacity bounds multiplied by `factor`.
    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self {
            existing: self.existing * factor,
            minimum: self.minimum * factor,
            maximum: self.maximum * factor,
            ..self.clone()
        }
    }
}

/// A directed attachment between a bus and a component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Flow {
    pub variable_costs: f64,
    pub emission_factor: f64,
    pub nominal_value: Option<f64>,
    pub profile: Option<Profile>,
    pub investment: Option<Investment>,
}

impl Flow {
    /// Creates a flow with the given variable costs and emission factor.
    pub fn with_costs(variable_costs: f64, emission_factor: f64) -> Self {
        Self {
            variable_costs,
            emission_factor,
            ..Default::default()
        }
    }

    pub fn nominal_value(mut self, nominal_value: f64) -> Self {
        self.nominal_value = Some(nominal_value);
        self
    }

    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn investment(mut self, investment: Investment) -> Self {
        self.investment = Some(investment);
        self
    }

    /// Returns the absolute `(min, max)` bounds of the flow at timestep `t`.
    ///
    /// Only flows with a nominal value and a profile have absolute bounds,
    /// the bounds of invested flows depend on the solver's sizing decision.
    pub fn bounds_at(&self, t: usize) -> Option<(f64, f64)> {
        let nominal = self.nominal_value?;
        let (min, max) = self.profile.as_ref()?.bounds_at(t)?;
        Some((min * nominal, max * nominal))
    }
}

/// Parameters of a combined heat and power unit, one value per period.
#[derive(Clone, Debug, PartialEq)]
pub struct ChpParameters {
    pub flue_gas_share_max: Vec<f64>,
    pub flue_gas_share_min: Vec<f64>,
    pub power_max_without_heat: Vec<f64>,
    pub power_min_without_heat: Vec<f64>,
    pub efficiency_max_without_heat: Vec<f64>,
    pub efficiency_min_without_heat: Vec<f64>,
    pub condenser_load_min: Vec<f64>,
    pub power_loss_index: Vec<f64>,
    pub back_pressure: bool,
}

/// Parameters of a storage.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageParameters {
    pub loss_rate: Series,
    pub fixed_losses_relative: Option<Series>,
    pub fixed_losses_absolute: Option<Series>,
    pub inflow_conversion_factor: f64,
    pub outflow_conversion_factor: f64,
    pub invest_relation_input_capacity: f64,
    pub invest_relation_output_capacity: f64,
    pub min_storage_level: Option<f64>,
    pub max_storage_level: Option<f64>,
    pub investment: Investment,
}

/// The kind of a node, with the parameters that are specific to it.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Bus,
    Source,
    Sink,
    Transformer {
        /// Bus label to conversion factor.
        conversion_factors: BTreeMap<String, Series>,
    },
    GenericChp(ChpParameters),
    Storage(StorageParameters),
    Link {
        /// `(from bus, to bus)` to conversion factor.
        conversion_factors: BTreeMap<(String, String), Series>,
    },
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Bus => write!(f, "Bus"),
            NodeKind::Source => write!(f, "Source"),
            NodeKind::Sink => write!(f, "Sink"),
            NodeKind::Transformer { .. } => write!(f, "Transformer"),
            NodeKind::GenericChp(_) => write!(f, "GenericCHP"),
            NodeKind::Storage(_) => write!(f, "Storage"),
            NodeKind::Link { .. } => write!(f, "Link"),
        }
    }
}

/// A labeled node of the energy system.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    label: String,
    kind: NodeKind,
}

impl Node {
    pub fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_bus(&self) -> bool {
        self.kind == NodeKind::Bus
    }
}

/// A reference to a bus owned by the `BusRegistry`.
///
/// Instances are only handed out by the registry, so a `BusRef` always names
/// a bus that exists.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BusRef(String);

impl BusRef {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl Display for BusRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A component node together with its flow attachments.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    pub node: Node,
    /// Flows from a bus into the component.
    pub inputs: Vec<(BusRef, Flow)>,
    /// Flows from the component into a bus.
    pub outputs: Vec<(BusRef, Flow)>,
}

impl Component {
    pub(crate) fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            node: Node::new(label, kind),
            inputs: vec![],
            outputs: vec![],
        }
    }

    pub(crate) fn source(label: impl Into<String>, output: &BusRef, flow: Flow) -> Self {
        Self::new(label, NodeKind::Source).with_output(output, flow)
    }

    pub(crate) fn sink(label: impl Into<String>, input: &BusRef, flow: Flow) -> Self {
        Self::new(label, NodeKind::Sink).with_input(input, flow)
    }

    pub(crate) fn with_input(mut self, bus: &BusRef, flow: Flow) -> Self {
        self.inputs.push((bus.clone(), flow));
        self
    }

    pub(crate) fn with_output(mut self, bus: &BusRef, flow: Flow) -> Self {
        self.outputs.push((bus.clone(), flow));
        self
    }

    pub fn label(&self) -> &str {
        self.node.label()
    }

    /// Returns the flow from the given bus into this component.
    pub fn input(&self, bus: &str) -> Option<&Flow> {
        self.inputs
            .iter()
            .find(|(b, _)| b.label() == bus)
            .map(|(_, flow)| flow)
    }

    /// Returns the flow from this component into the given bus.
    pub fn output(&self, bus: &str) -> Option<&Flow> {
        self.outputs
            .iter()
            .find(|(b, _)| b.label() == bus)
            .map(|(_, flow)| flow)
    }
}
