//! ef-core: stable foundation for ethaflow.
//!
//! Contains:
//! - units (uom SI types + constructors, power-rate units)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
