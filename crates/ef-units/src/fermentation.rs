//! Fermentation: sugar converted to ethanol.

use ef_streams::{Component, ComponentMap};

use crate::traits::Transform;

/// Mass of ethanol produced per mass of sugar fermented.
pub const ETHANOL_YIELD: f64 = 0.51;

/// Converts `efficiency` of the sugar into ethanol at [`ETHANOL_YIELD`].
///
/// Undefined propagation is per component: ethanol and sugar need sugar,
/// water needs both water and sugar, fiber needs only fiber.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fermentation;

impl Transform for Fermentation {
    fn name(&self) -> &str {
        "Fermentation"
    }

    fn apply(&self, efficiency: f64, input: &ComponentMap) -> ComponentMap {
        let sugar = input.get(Component::Sugar);
        // missing ethanol counts as none yet produced
        let ethanol_in = input.get(Component::Ethanol).unwrap_or(0.0);
        let mut out = ComponentMap::new();

        out.set_opt(
            Component::Ethanol,
            sugar.map(|s| ethanol_in + ETHANOL_YIELD * efficiency * s),
        );
        out.set_opt(Component::Water, sugar.and(input.get(Component::Water)));
        out.set_opt(Component::Sugar, sugar.map(|s| (1.0 - efficiency) * s));
        out.set_opt(Component::Fiber, input.get(Component::Fiber));
        out
    }
}
