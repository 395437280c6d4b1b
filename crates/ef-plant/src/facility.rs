//! Facility orchestrator.
//!
//! ## Run sequence
//!
//! ```text
//! feed (volumetric) -> mass view
//!   -> pump: rescale to delivered flow, resync mass
//!   -> for each stage:
//!        Process:   process_volumetric, resync mass, draw power
//!        Connector: draw power, rescale to outlet flow,
//!                   volumetric -> mass -> volumetric
//!   -> FacilityRun
//! ```
//!
//! The run is a single linear pass. Any stage error aborts it, and a
//! connector whose losses consume all of its kinetic power aborts it with
//! [`PlantError::ConnectorStalled`].

use ef_core::units::{Energy, Power, j, kgps, m3ps, w};
use ef_streams::{Basis, FlowState};
use ef_units::{FlowInput, IdealPump, ProcessOptions, Pump, UnitError};
use tracing::{debug, info_span};

use crate::error::{PlantError, PlantResult};
use crate::run::{FacilityRun, PowerContribution, RunInput, RunOptions};
use crate::stage::Stage;

#[derive(Debug)]
pub struct Facility {
    name: String,
    pump: Box<dyn Pump>,
    stages: Vec<Stage>,
}

impl Default for Facility {
    fn default() -> Self {
        Self::new("Facility")
    }
}

impl Facility {
    /// Empty facility fed by an [`IdealPump`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pump: Box::new(IdealPump),
            stages: Vec::new(),
        }
    }

    pub fn with_pump(mut self, pump: impl Pump + 'static) -> Self {
        self.pump = Box::new(pump);
        self
    }

    pub fn with_stage(mut self, stage: impl Into<Stage>) -> Self {
        self.add_stage(stage);
        self
    }

    /// Append a stage to the end of the sequence.
    pub fn add_stage(&mut self, stage: impl Into<Stage>) {
        self.stages.push(stage.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pump(&self) -> &dyn Pump {
        self.pump.as_ref()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stages_mut(&mut self) -> &mut [Stage] {
        &mut self.stages
    }

    /// Stage by name; the first match wins.
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name() == name)
    }

    /// Fixed cost of every process in the sequence (USD).
    pub fn fixed_cost(&self) -> f64 {
        self.stages
            .iter()
            .filter_map(Stage::as_process)
            .map(|p| p.cost())
            .sum()
    }

    /// Variable cost recorded in process logs so far (USD).
    pub fn recorded_cost(&self) -> f64 {
        self.stages
            .iter()
            .filter_map(Stage::as_process)
            .filter_map(|p| p.log())
            .map(|log| log.total_cost())
            .sum()
    }

    /// Push a feed through the pump and every stage.
    ///
    /// # Errors
    /// Returns error if the feed is invalid or any stage fails; the run
    /// stops at the first failure.
    pub fn run(&mut self, input: &RunInput, options: RunOptions) -> PlantResult<FacilityRun> {
        let _span = info_span!(
            "facility_run",
            facility = %self.name,
            stages = self.stages.len()
        )
        .entered();

        let interval = input.interval;
        if !interval.value.is_finite() || interval.value < 0.0 {
            return Err(PlantError::InvalidArg {
                what: "interval must be finite and non-negative",
            });
        }
        if !input.total_flow.value.is_finite() || input.total_flow.value <= 0.0 {
            return Err(PlantError::InvalidArg {
                what: "total flow must be finite and positive",
            });
        }
        input.composition.require_all()?;
        let feed = FlowState::from_composition(
            Basis::Volumetric,
            input.composition,
            input.total_flow.value,
        )?;

        let mut accumulator = PowerAccumulator::default();

        let pumped = self
            .pump
            .pump(m3ps(feed.total()), feed.composition())?;
        let mut volumetric = feed.rescaled(pumped.volumetric_flow.value);
        let mut mass = volumetric.to_basis(Basis::Mass)?;
        accumulator.add(
            self.pump.name(),
            "Pump",
            pumped.power,
            j(pumped.power.value * interval.value),
        );
        debug!(
            pump = self.pump.name(),
            flow = volumetric.total(),
            power = pumped.power.value,
            "pumped feed"
        );

        let process_options = if options.store_data {
            ProcessOptions::recording()
        } else {
            ProcessOptions::default()
        };

        for stage in &mut self.stages {
            match stage {
                Stage::Process(process) => {
                    // recording() and default() both request full output
                    volumetric = process
                        .process_volumetric(FlowInput::Full(volumetric), process_options)?
                        .into_state()
                        .ok_or(UnitError::StoreRequiresFullOutput)?;
                    mass = volumetric.to_basis(Basis::Mass)?;
                    let draw = process.consume_power(interval, options.store_data);
                    accumulator.add(process.name(), "Process", draw.rate, draw.energy);
                    debug!(
                        stage = process.name(),
                        flow = volumetric.total(),
                        power = draw.rate.value,
                        "processed"
                    );
                }
                Stage::Connector(connector) => {
                    let q = m3ps(volumetric.total());
                    let mdot = kgps(mass.total());
                    let power = connector.power_consumed(q, mdot);
                    let q_out = connector.output_flow(q, mdot);
                    accumulator.add(
                        connector.name(),
                        connector.kind(),
                        power,
                        j(power.value * interval.value),
                    );
                    if q_out.value <= 0.0 {
                        return Err(PlantError::ConnectorStalled {
                            stage: connector.name().to_string(),
                        });
                    }

                    mass = volumetric.rescaled(q_out.value).to_basis(Basis::Mass)?;
                    volumetric = mass.to_basis(Basis::Volumetric)?;
                    debug!(
                        stage = connector.name(),
                        flow_in = q.value,
                        flow_out = q_out.value,
                        power = power.value,
                        "transported"
                    );
                }
            }
        }

        debug!(
            total_power = accumulator.power.value,
            flow = volumetric.total(),
            "run complete"
        );

        Ok(FacilityRun {
            volumetric,
            mass,
            total_power: accumulator.power,
            total_energy: accumulator.energy,
            contributions: accumulator.contributions,
        })
    }
}

/// Power drawn during one run.
struct PowerAccumulator {
    power: Power,
    energy: Energy,
    contributions: Vec<PowerContribution>,
}

impl Default for PowerAccumulator {
    fn default() -> Self {
        Self {
            power: w(0.0),
            energy: j(0.0),
            contributions: Vec::new(),
        }
    }
}

impl PowerAccumulator {
    fn add(&mut self, name: &str, kind: &'static str, power: Power, energy: Energy) {
        self.power += power;
        self.energy += energy;
        self.contributions.push(PowerContribution {
            name: name.to_string(),
            kind,
            power,
            energy,
        });
    }
}
