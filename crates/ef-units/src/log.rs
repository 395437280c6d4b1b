//! Append-only process logs.
//!
//! Logs are an observability side channel: the simulation never reads them.
//! A process creates its log the first time a call asks for recording.

use ef_core::units::{Energy, Power, Time, j};
use ef_streams::{Basis, Component, FlowState};

/// Snapshots recorded in each representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasisLog {
    pub mass: Vec<FlowState>,
    pub volumetric: Vec<FlowState>,
}

impl BasisLog {
    pub fn push(&mut self, state: FlowState) {
        match state.basis() {
            Basis::Mass => self.mass.push(state),
            Basis::Volumetric => self.volumetric.push(state),
        }
    }

    pub fn get(&self, basis: Basis) -> &[FlowState] {
        match basis {
            Basis::Mass => &self.mass,
            Basis::Volumetric => &self.volumetric,
        }
    }

    /// Total rate of each snapshot, oldest first.
    pub fn total_series(&self, basis: Basis) -> Vec<f64> {
        self.get(basis).iter().map(FlowState::total).collect()
    }

    /// Amount of `component` in each snapshot; `None` where it was undefined.
    pub fn amount_series(&self, basis: Basis, component: Component) -> Vec<Option<f64>> {
        self.get(basis)
            .iter()
            .map(|s| s.amount().get(component))
            .collect()
    }

    /// Fraction of `component` in each snapshot; `None` where it was undefined.
    pub fn composition_series(&self, basis: Basis, component: Component) -> Vec<Option<f64>> {
        self.get(basis)
            .iter()
            .map(|s| s.composition().get(component))
            .collect()
    }

    pub fn len(&self, basis: Basis) -> usize {
        self.get(basis).len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty() && self.volumetric.is_empty()
    }
}

/// One `consume_power` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumptionRecord {
    pub rate: Power,
    pub energy: Energy,
    pub interval: Time,
}

/// Variable cost charged for one processed input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRecord {
    /// Cost per m³/s of throughput (USD)
    pub cost_per_flow: f64,
    /// Cost charged for this input (USD)
    pub cost_incurred: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessLog {
    pub inputs: BasisLog,
    pub outputs: BasisLog,
    pub consumption: Vec<ConsumptionRecord>,
    pub costs: Vec<CostRecord>,
}

impl ProcessLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_energy(&self) -> Energy {
        j(self.consumption.iter().map(|r| r.energy.value).sum())
    }

    pub fn total_cost(&self) -> f64 {
        self.costs.iter().map(|r| r.cost_incurred).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
            && self.outputs.is_empty()
            && self.consumption.is_empty()
            && self.costs.is_empty()
    }
}
