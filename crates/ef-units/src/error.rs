//! Error types for unit operations and connectors.

use ef_core::CoreError;
use ef_streams::StreamError;
use thiserror::Error;

/// Errors that can occur while processing a stream through a unit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Output total must be greater than zero to calculate composition (got {total})")]
    NonPositiveOutputTotal { total: f64 },

    #[error("store_outputs requires full output form")]
    StoreRequiresFullOutput,

    #[error("Non-physical value: {what} = {value}")]
    NonPhysical { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type UnitResult<T> = Result<T, UnitError>;
