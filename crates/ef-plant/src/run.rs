//! Facility run inputs and results.

use ef_core::units::{Energy, Power, Time, VolumeRate, constants, m3ps, s, w};
use ef_streams::{Component, ComponentMap, FlowState};

/// Feed for one facility run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunInput {
    /// Volume fractions of all four components
    pub composition: ComponentMap,
    pub total_flow: VolumeRate,
    /// Interval process power is drawn over
    pub interval: Time,
}

impl RunInput {
    /// Feed with the default 1 s interval.
    pub fn new(composition: ComponentMap, total_flow: VolumeRate) -> Self {
        Self {
            composition,
            total_flow,
            interval: s(1.0),
        }
    }

    pub fn with_interval(mut self, interval: Time) -> Self {
        self.interval = interval;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Record inputs, outputs, cost and power in every process log.
    pub store_data: bool,
}

/// Power one element added to the run total.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerContribution {
    pub name: String,
    pub kind: &'static str,
    pub power: Power,
    pub energy: Energy,
}

/// Outcome of a facility run.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityRun {
    pub volumetric: FlowState,
    pub mass: FlowState,
    pub total_power: Power,
    pub total_energy: Energy,
    /// Pump first, then stages in order
    pub contributions: Vec<PowerContribution>,
}

impl FacilityRun {
    pub fn total_flow(&self) -> VolumeRate {
        m3ps(self.volumetric.total())
    }

    /// Chemical energy leaving in the ethanol stream (W).
    pub fn ethanol_energy_rate(&self) -> Power {
        let mdot = self.mass.amount().get(Component::Ethanol).unwrap_or(0.0);
        w(mdot * constants::ETHANOL_ENERGY_DENSITY_JPKG)
    }

    /// Ethanol energy out per unit of power drawn; `None` when nothing was drawn.
    pub fn energy_ratio(&self) -> Option<f64> {
        (self.total_power.value > 0.0)
            .then(|| self.ethanol_energy_rate().value / self.total_power.value)
    }
}
