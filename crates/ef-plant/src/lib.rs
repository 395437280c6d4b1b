//! ef-plant: facility orchestration for the ethanol plant.
//!
//! A [`Facility`] owns a pump and an ordered list of [`Stage`]s. A run takes
//! a volumetric feed, pumps it once, and pushes it through every stage in
//! order, keeping the mass and volumetric views of the stream in step and
//! accumulating the power each element draws.

pub mod error;
pub mod facility;
pub mod run;
pub mod stage;

pub use error::{PlantError, PlantResult};
pub use facility::Facility;
pub use run::{FacilityRun, PowerContribution, RunInput, RunOptions};
pub use stage::Stage;
