//! Filtration: fiber removed from the stream.

use ef_streams::{Component, ComponentMap};

use crate::traits::Transform;

/// Removes `efficiency` of the fiber; everything else passes through.
#[derive(Debug, Clone, Copy, Default)]
pub struct Filtration;

impl Transform for Filtration {
    fn name(&self) -> &str {
        "Filtration"
    }

    fn apply(&self, efficiency: f64, input: &ComponentMap) -> ComponentMap {
        input.map(|c, v| match c {
            Component::Fiber => (1.0 - efficiency) * v,
            _ => v,
        })
    }
}
