//! Error types for facility runs.

use ef_streams::StreamError;
use ef_units::UnitError;
use thiserror::Error;

/// Errors that abort a facility run. Stage errors pass through unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlantError {
    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Connector '{stage}' stopped the flow (losses reach its kinetic power)")]
    ConnectorStalled { stage: String },
}

pub type PlantResult<T> = Result<T, PlantError>;
