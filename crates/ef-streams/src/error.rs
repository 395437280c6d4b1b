//! Stream representation errors.

use ef_core::CoreError;
use thiserror::Error;

use crate::component::Component;

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors raised while building or converting streams.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StreamError {
    /// A component name outside the closed registry.
    #[error("Unknown component: {name}")]
    UnknownComponent { name: String },

    /// A representation selector other than mass or volumetric.
    #[error("Invalid representation '{name}': must be 'mass' or 'volumetric'")]
    InvalidBasis { name: String },

    /// A conversion or output selector that is not recognized.
    #[error("Invalid selector '{name}' for {what}")]
    InvalidSelector { what: &'static str, name: String },

    /// A component that must be present is undefined.
    #[error("Missing required component: {component}")]
    MissingComponent { component: Component },

    /// Composition requested from a stream with no positive total.
    #[error("Total {what} must be greater than zero to calculate composition (got {total})")]
    NonPositiveTotal { what: &'static str, total: f64 },

    /// Conversion or processing called with no component entries.
    #[error("No inputs provided for {what}")]
    EmptyInput { what: &'static str },

    /// Composition-mode conversion without the scalar total.
    #[error("Total flow must be provided for composition-mode conversion")]
    MissingTotal,

    /// Fractions that do not form a composition.
    #[error("Composition is not normalized: fractions sum to {sum}")]
    NotNormalized { sum: f64 },

    /// Negative entry where only non-negative values are physical.
    #[error("Negative value for {component}: {value}")]
    Negative { component: Component, value: f64 },

    /// NaN or infinite amounts and other numeric failures.
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StreamError::UnknownComponent {
            name: "yeast".into(),
        };
        assert!(err.to_string().contains("yeast"));

        let err = StreamError::MissingComponent {
            component: Component::Sugar,
        };
        assert!(err.to_string().contains("sugar"));
    }

    #[test]
    fn core_errors_pass_through() {
        let core = CoreError::UnknownPowerUnit { unit: "hp".into() };
        let err: StreamError = core.clone().into();
        assert_eq!(err.to_string(), core.to_string());
        assert!(matches!(err, StreamError::Core(CoreError::UnknownPowerUnit { .. })));
    }
}
