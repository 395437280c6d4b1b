//! Common utilities for unit calculations.

use crate::error::{UnitError, UnitResult};
use ef_core::numeric::ensure_finite;
use ef_streams::ComponentMap;

/// Ensure a value is finite, returning UnitError if not.
pub fn check_finite(value: f64, what: &'static str) -> UnitResult<()> {
    ensure_finite(value, what).map_err(|_| UnitError::NonPhysical { what, value })?;
    Ok(())
}

/// Ensure a geometric parameter is finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> UnitResult<()> {
    check_finite(value, what)?;
    if value < 0.0 {
        return Err(UnitError::NonPhysical { what, value });
    }
    Ok(())
}

/// Ensure every defined entry of a map is finite.
pub fn check_finite_map(map: &ComponentMap, what: &'static str) -> UnitResult<()> {
    for (_, value) in map.iter() {
        check_finite(value, what)?;
    }
    Ok(())
}
