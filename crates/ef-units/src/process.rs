//! Unit operation driven by a pluggable transform.
//!
//! ## Model
//!
//! Every call follows the same core, in the mass basis:
//!
//! ```text
//! normalize input -> record input -> transform amounts -> drop undefined
//!   -> recompute total and composition -> record output
//! ```
//!
//! The volumetric interface converts inbound amounts to mass, runs the core,
//! and converts the result back. Compositions are re-derived in each basis.
//!
//! Power consumption is a fixed rate, independent of flow.

use ef_core::units::{Energy, Power, PowerUnit, Time, j};
use ef_streams::{
    Basis, ComponentMap, FlowState, OutputForm, StreamError, mass_to_volumetric,
};
use tracing::trace;

use crate::common::{check_finite, check_finite_map};
use crate::dehydration::Dehydration;
use crate::distillation::Distillation;
use crate::error::{UnitError, UnitResult};
use crate::fermentation::Fermentation;
use crate::filtration::Filtration;
use crate::log::{ConsumptionRecord, CostRecord, ProcessLog};
use crate::traits::Transform;

/// Construction options for a [`Process`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessConfig {
    /// Conversion or removal fraction. Not bounded to [0, 1].
    pub efficiency: f64,
    /// Power consumption in `power_consumption_unit`
    pub power_consumption_rate: f64,
    pub power_consumption_unit: PowerUnit,
    /// Fixed cost per unit operation (USD)
    pub cost: f64,
    /// Variable cost per m³/s of throughput (USD)
    pub cost_per_flow: f64,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            efficiency: 1.0,
            power_consumption_rate: 0.0,
            power_consumption_unit: PowerUnit::default(),
            cost: 0.0,
            cost_per_flow: 0.0,
        }
    }
}

/// Stream handed to a process, in the basis of the interface it is passed to.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowInput {
    /// Amounts for all four components. `total` defaults to their sum.
    Amount {
        amount: ComponentMap,
        total: Option<f64>,
    },
    /// Fractions for all four components and the total rate.
    Composition {
        composition: ComponentMap,
        total: f64,
    },
    /// A complete state; converted if its basis differs from the interface.
    Full(FlowState),
}

impl FlowInput {
    pub fn amount(amount: ComponentMap) -> Self {
        FlowInput::Amount {
            amount,
            total: None,
        }
    }

    pub fn composition(composition: ComponentMap, total: f64) -> Self {
        FlowInput::Composition { composition, total }
    }

    /// Resolve to a state in `basis`, requiring every component.
    fn normalize(self, basis: Basis) -> UnitResult<FlowState> {
        let state = match self {
            FlowInput::Amount { amount, total } => {
                amount.require_all()?;
                let total = total.unwrap_or_else(|| amount.sum());
                FlowState::from_amounts_with_total(basis, amount, total)?
            }
            FlowInput::Composition { composition, total } => {
                composition.require_all()?;
                if total <= 0.0 {
                    return Err(StreamError::NonPositiveTotal {
                        what: basis.key(),
                        total,
                    }
                    .into());
                }
                FlowState::from_composition(basis, composition, total)?
            }
            FlowInput::Full(state) => {
                state.composition().require_all()?;
                state.to_basis(basis)?
            }
        };
        Ok(state)
    }
}

impl From<FlowState> for FlowInput {
    fn from(state: FlowState) -> Self {
        FlowInput::Full(state)
    }
}

/// Per-call output shape and recording switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessOptions {
    pub output: OutputForm,
    pub store_inputs: bool,
    pub store_outputs: bool,
    pub store_cost: bool,
}

impl ProcessOptions {
    /// Full output with every kind of recording enabled.
    pub fn recording() -> Self {
        Self {
            output: OutputForm::Full,
            store_inputs: true,
            store_outputs: true,
            store_cost: true,
        }
    }

    pub fn validate(&self) -> UnitResult<()> {
        if self.store_outputs && self.output != OutputForm::Full {
            return Err(UnitError::StoreRequiresFullOutput);
        }
        Ok(())
    }
}

/// Result of a process call, shaped by [`ProcessOptions::output`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutput {
    Amount(ComponentMap),
    Composition(ComponentMap),
    Full(FlowState),
}

impl ProcessOutput {
    pub fn amount(&self) -> Option<&ComponentMap> {
        match self {
            ProcessOutput::Amount(amount) => Some(amount),
            ProcessOutput::Full(state) => Some(state.amount()),
            ProcessOutput::Composition(_) => None,
        }
    }

    pub fn composition(&self) -> Option<&ComponentMap> {
        match self {
            ProcessOutput::Composition(composition) => Some(composition),
            ProcessOutput::Full(state) => Some(state.composition()),
            ProcessOutput::Amount(_) => None,
        }
    }

    pub fn state(&self) -> Option<&FlowState> {
        match self {
            ProcessOutput::Full(state) => Some(state),
            _ => None,
        }
    }

    pub fn into_state(self) -> Option<FlowState> {
        match self {
            ProcessOutput::Full(state) => Some(state),
            _ => None,
        }
    }
}

/// Power drawn over one interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerDraw {
    pub rate: Power,
    pub energy: Energy,
}

/// A unit operation in the plant.
#[derive(Debug)]
pub struct Process {
    name: String,
    efficiency: f64,
    transform: Option<Box<dyn Transform>>,
    power_rate: Power,
    cost: f64,
    cost_per_flow: f64,
    log: Option<ProcessLog>,
}

impl Process {
    /// Create a pass-through process.
    ///
    /// # Errors
    /// Returns error if any configured value is non-finite.
    pub fn new(name: impl Into<String>, config: ProcessConfig) -> UnitResult<Self> {
        check_finite(config.efficiency, "efficiency")?;
        check_finite(config.power_consumption_rate, "power consumption rate")?;
        check_finite(config.cost, "cost")?;
        check_finite(config.cost_per_flow, "cost per flow")?;

        Ok(Self {
            name: name.into(),
            efficiency: config.efficiency,
            transform: None,
            power_rate: config
                .power_consumption_unit
                .to_power(config.power_consumption_rate),
            cost: config.cost,
            cost_per_flow: config.cost_per_flow,
            log: None,
        })
    }

    /// Create a process named after `transform`.
    pub fn with_strategy(
        transform: impl Transform + 'static,
        config: ProcessConfig,
    ) -> UnitResult<Self> {
        let name = transform.name().to_string();
        Ok(Self::new(name, config)?.with_transform(transform))
    }

    pub fn fermentation(config: ProcessConfig) -> UnitResult<Self> {
        Self::with_strategy(Fermentation, config)
    }

    pub fn filtration(config: ProcessConfig) -> UnitResult<Self> {
        Self::with_strategy(Filtration, config)
    }

    pub fn distillation(config: ProcessConfig) -> UnitResult<Self> {
        Self::with_strategy(Distillation, config)
    }

    pub fn dehydration(config: ProcessConfig) -> UnitResult<Self> {
        Self::with_strategy(Dehydration, config)
    }

    pub fn with_transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach an empty log so recording starts from a known state.
    pub fn with_log(mut self) -> Self {
        self.log = Some(ProcessLog::new());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn power_rate(&self) -> Power {
        self.power_rate
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn cost_per_flow(&self) -> f64 {
        self.cost_per_flow
    }

    pub fn log(&self) -> Option<&ProcessLog> {
        self.log.as_ref()
    }

    /// Detach and return the log.
    pub fn take_log(&mut self) -> Option<ProcessLog> {
        self.log.take()
    }

    fn log_mut(&mut self) -> &mut ProcessLog {
        self.log.get_or_insert_with(ProcessLog::new)
    }

    /// Process a stream given in mass rates (kg/s).
    ///
    /// Nothing is logged unless the whole call succeeds.
    pub fn process_mass(
        &mut self,
        input: FlowInput,
        options: ProcessOptions,
    ) -> UnitResult<ProcessOutput> {
        options.validate()?;
        let inlet = input.normalize(Basis::Mass)?;

        let amount = self.transform_amounts(&inlet)?;
        let output = shape_output(Basis::Mass, amount, options.output)?;

        let inlet_volumetric = if options.store_inputs {
            Some(inlet.to_basis(Basis::Volumetric)?)
        } else {
            None
        };
        let outlet_volumetric = match output.state() {
            Some(state) if options.store_outputs => Some(state.to_basis(Basis::Volumetric)?),
            _ => None,
        };

        if options.store_cost {
            self.record_cost(mass_to_volumetric(inlet.amount()).sum());
        }
        if let Some(volumetric) = inlet_volumetric {
            let log = self.log_mut();
            log.inputs.push(volumetric);
            log.inputs.push(inlet);
        }
        if let Some(volumetric) = outlet_volumetric {
            let log = self.log_mut();
            log.outputs.push(volumetric);
            if let Some(state) = output.state() {
                log.outputs.push(state.clone());
            }
        }
        Ok(output)
    }

    /// Process a stream given in volumetric rates (m³/s).
    ///
    /// Nothing is logged unless the whole call succeeds.
    pub fn process_volumetric(
        &mut self,
        input: FlowInput,
        options: ProcessOptions,
    ) -> UnitResult<ProcessOutput> {
        options.validate()?;
        let inlet = input.normalize(Basis::Volumetric)?;
        let inlet_mass = inlet.to_basis(Basis::Mass)?;

        let mass_amount = self.transform_amounts(&inlet_mass)?;
        let output = shape_output(
            Basis::Volumetric,
            mass_to_volumetric(&mass_amount),
            options.output,
        )?;
        let outlet_mass = if options.store_outputs {
            Some(output_state(Basis::Mass, mass_amount)?)
        } else {
            None
        };

        if options.store_cost {
            self.record_cost(inlet.total());
        }
        if options.store_inputs {
            let log = self.log_mut();
            log.inputs.push(inlet);
            log.inputs.push(inlet_mass);
        }
        if let Some(mass) = outlet_mass {
            let log = self.log_mut();
            log.outputs.push(mass);
            if let Some(state) = output.state() {
                log.outputs.push(state.clone());
            }
        }
        Ok(output)
    }

    /// Power drawn over `interval`; optionally appended to the log.
    pub fn consume_power(&mut self, interval: Time, record: bool) -> PowerDraw {
        let energy = j(self.power_rate.value * interval.value);
        if record {
            let rate = self.power_rate;
            self.log_mut().consumption.push(ConsumptionRecord {
                rate,
                energy,
                interval,
            });
        }
        PowerDraw {
            rate: self.power_rate,
            energy,
        }
    }

    /// Process a series of mass-rate inputs, recording every input and output.
    pub fn iterate_mass<I>(&mut self, inputs: I, store_cost: bool) -> UnitResult<&ProcessLog>
    where
        I: IntoIterator<Item = FlowInput>,
    {
        let options = ProcessOptions {
            store_cost,
            ..ProcessOptions::recording()
        };
        for input in inputs {
            self.process_mass(input, options)?;
        }
        Ok(&*self.log_mut())
    }

    /// Process a series of volumetric-rate inputs, recording every input and output.
    pub fn iterate_volumetric<I>(&mut self, inputs: I, store_cost: bool) -> UnitResult<&ProcessLog>
    where
        I: IntoIterator<Item = FlowInput>,
    {
        let options = ProcessOptions {
            store_cost,
            ..ProcessOptions::recording()
        };
        for input in inputs {
            self.process_volumetric(input, options)?;
        }
        Ok(&*self.log_mut())
    }

    /// Apply the transform to a mass-basis inlet; undefined outputs are absent.
    fn transform_amounts(&self, inlet: &FlowState) -> UnitResult<ComponentMap> {
        let amount = match &self.transform {
            Some(transform) => transform.apply(self.efficiency, inlet.amount()),
            None => *inlet.amount(),
        };
        check_finite_map(&amount, "process output amount")?;

        trace!(
            process = %self.name,
            inlet = %inlet.amount(),
            outlet = %amount,
            "applied transform"
        );
        Ok(amount)
    }

    fn record_cost(&mut self, volumetric_total: f64) {
        let cost_per_flow = self.cost_per_flow;
        self.log_mut().costs.push(CostRecord {
            cost_per_flow,
            cost_incurred: cost_per_flow * volumetric_total,
        });
    }
}

fn shape_output(basis: Basis, amount: ComponentMap, form: OutputForm) -> UnitResult<ProcessOutput> {
    match form {
        OutputForm::Amount => Ok(ProcessOutput::Amount(amount)),
        OutputForm::Composition => {
            let state = output_state(basis, amount)?;
            Ok(ProcessOutput::Composition(*state.composition()))
        }
        OutputForm::Full => Ok(ProcessOutput::Full(output_state(basis, amount)?)),
    }
}

fn output_state(basis: Basis, amount: ComponentMap) -> UnitResult<FlowState> {
    FlowState::from_amounts(basis, amount).map_err(|e| match e {
        StreamError::NonPositiveTotal { total, .. } => UnitError::NonPositiveOutputTotal { total },
        StreamError::EmptyInput { .. } => UnitError::NonPositiveOutputTotal { total: 0.0 },
        other => other.into(),
    })
}
