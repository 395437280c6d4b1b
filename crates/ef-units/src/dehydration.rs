//! Dehydration: water removed from the ethanol product.

use ef_streams::ComponentMap;

use crate::traits::{Transform, when_complete};

/// Removes `efficiency` of the water. Needs every component defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dehydration;

impl Transform for Dehydration {
    fn name(&self) -> &str {
        "Dehydration"
    }

    fn apply(&self, efficiency: f64, input: &ComponentMap) -> ComponentMap {
        when_complete(input, |[ethanol, water, sugar, fiber]| {
            ComponentMap::from_values(ethanol, water * (1.0 - efficiency), sugar, fiber)
        })
    }
}
