//! ef-streams: multi-component stream representation for ethaflow.
//!
//! Provides:
//! - The closed component registry (ethanol, water, sugar, fiber) with densities
//! - `ComponentMap` for per-component amounts or fractions, with undefined entries
//! - `FlowState`, a stream in mass-rate or volumetric-rate basis
//! - The conversion engine between the two bases
//!
//! # Example
//!
//! ```
//! use ef_streams::{Basis, ComponentMap, FlowState};
//!
//! let composition = ComponentMap::from_values(0.0, 0.7, 0.2, 0.1);
//! let volumetric = FlowState::from_composition(Basis::Volumetric, composition, 0.01).unwrap();
//! let mass = volumetric.to_basis(Basis::Mass).unwrap();
//! assert!(mass.total() > volumetric.total());
//! ```

pub mod basis;
pub mod component;
pub mod component_map;
pub mod convert;
pub mod error;
pub mod flow_state;

// Re-exports for ergonomics
pub use basis::Basis;
pub use component::Component;
pub use component_map::ComponentMap;
pub use convert::{
    ConversionMode, ConversionOutput, OutputForm, composition_of, composition_to_mass,
    composition_to_volumetric, convert, mass_to_volumetric, volumetric_to_mass,
};
pub use error::{StreamError, StreamResult};
pub use flow_state::FlowState;
