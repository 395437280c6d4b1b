//! Strategy traits for processes and connectors.

use std::fmt;

use ef_core::numeric::div_or_zero;
use ef_core::units::Length;
use ef_streams::{Component, ComponentMap};

/// Transformation a unit operation applies to component amounts.
///
/// Implementations are pure functions of the efficiency and the input.
/// An output entry left undefined means "not computable from this input";
/// the owning process drops it before recomputing totals.
pub trait Transform: Send + Sync + fmt::Debug {
    /// Name used for the owning process when none is given.
    fn name(&self) -> &str;

    /// Map input amounts to output amounts.
    fn apply(&self, efficiency: f64, input: &ComponentMap) -> ComponentMap;
}

/// Run `f` on the four input amounts only when all of them are defined.
///
/// Any undefined input makes every output undefined.
pub fn when_complete(
    input: &ComponentMap,
    f: impl FnOnce([f64; Component::COUNT]) -> ComponentMap,
) -> ComponentMap {
    match input.complete() {
        Some(values) => f(values),
        None => ComponentMap::new(),
    }
}

/// Cross-section of a circular transport element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Inner diameter (m)
    pub diameter: f64,
    /// Cross-sectional area (m²)
    pub area: f64,
}

impl Geometry {
    pub fn circular(diameter: Length) -> Self {
        let d = diameter.value;
        Self {
            diameter: d,
            area: std::f64::consts::PI * (d / 2.0).powi(2),
        }
    }

    /// Mean velocity for a volumetric flow (0 when the area is zero).
    pub fn velocity(&self, volumetric_flow: f64) -> f64 {
        div_or_zero(volumetric_flow, self.area)
    }
}

/// Power a connector dissipates for a given flow.
///
/// Arguments are SI values: volumetric flow (m³/s) and mass flow (kg/s).
/// Returns watts. Degenerate inputs return 0 instead of failing.
pub trait LossModel: Send + Sync + fmt::Debug {
    /// Connector kind, used for default names and diagnostics.
    fn kind(&self) -> &'static str;

    fn power_loss(&self, geometry: &Geometry, volumetric_flow: f64, mass_flow: f64) -> f64;
}
