//! ef-units: processing units for the ethanol plant.
//!
//! Provides:
//! - `Process`, a unit operation driven by a pluggable `Transform` strategy
//!   (fermentation, filtration, distillation, dehydration)
//! - `Connector`, a transport element driven by a pluggable `LossModel`
//!   (pipe, bend, valve)
//! - The `Pump` collaborator interface with pass-through and fixed-head pumps
//! - Optional per-process logs of inputs, outputs, power and cost
//!
//! # Example
//!
//! ```
//! use ef_streams::{Basis, ComponentMap, FlowState};
//! use ef_units::{FlowInput, Process, ProcessConfig, ProcessOptions};
//!
//! let mut fermenter = Process::fermentation(ProcessConfig {
//!     efficiency: 0.85,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let feed = FlowState::from_amounts(Basis::Mass, ComponentMap::from_values(0.0, 100.0, 50.0, 20.0)).unwrap();
//! let out = fermenter
//!     .process_mass(FlowInput::Full(feed), ProcessOptions::default())
//!     .unwrap();
//! println!("{}", out.state().unwrap());
//! ```

pub mod bend;
pub mod common;
pub mod connector;
pub mod dehydration;
pub mod distillation;
pub mod error;
pub mod fermentation;
pub mod filtration;
pub mod log;
pub mod pipe;
pub mod process;
pub mod pump;
pub mod traits;
pub mod valve;

// Re-exports
pub use bend::{Bend, BendConfig};
pub use connector::Connector;
pub use dehydration::Dehydration;
pub use distillation::Distillation;
pub use error::{UnitError, UnitResult};
pub use fermentation::Fermentation;
pub use filtration::Filtration;
pub use log::{BasisLog, ConsumptionRecord, CostRecord, ProcessLog};
pub use pipe::{Pipe, PipeConfig};
pub use process::{FlowInput, PowerDraw, Process, ProcessConfig, ProcessOptions, ProcessOutput};
pub use pump::{HeadPump, IdealPump, Pump, PumpOutput};
pub use traits::{Geometry, LossModel, Transform};
pub use valve::{Valve, ValveConfig};
