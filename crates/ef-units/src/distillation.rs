//! Distillation: ethanol separated from water, sugar and fiber.

use ef_core::numeric::div_or_zero;
use ef_streams::ComponentMap;

use crate::traits::{Transform, when_complete};

/// Keeps all ethanol and carries impurities over in proportion to the
/// inefficiency `1/efficiency - 1`.
///
/// Each impurity `x` leaves as `x * ethanol * inefficiency / (water + sugar + fiber)`.
/// With efficiency 1 the product is pure ethanol. A feed with no impurities
/// carries none over. Efficiency 0 gives non-finite outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Distillation;

/// `1/efficiency - 1`
pub fn inefficiency(efficiency: f64) -> f64 {
    1.0 / efficiency - 1.0
}

impl Transform for Distillation {
    fn name(&self) -> &str {
        "Distillation"
    }

    fn apply(&self, efficiency: f64, input: &ComponentMap) -> ComponentMap {
        when_complete(input, |[ethanol, water, sugar, fiber]| {
            let carry = ethanol * inefficiency(efficiency);
            let non_ethanol = water + sugar + fiber;
            // a NaN carry (0 * inf) falls through so the process rejects it
            let share = |x: f64| {
                if carry == 0.0 || x == 0.0 {
                    0.0
                } else {
                    div_or_zero(x * carry, non_ethanol)
                }
            };
            ComponentMap::from_values(ethanol, share(water), share(sugar), share(fiber))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ef_core::numeric::{Tolerances, nearly_equal};
    use ef_streams::Component;

    #[test]
    fn perfect_efficiency_gives_pure_ethanol() {
        let input = ComponentMap::from_values(25.5, 100.0, 7.5, 20.0);
        let out = Distillation.apply(1.0, &input);
        assert_eq!(out, ComponentMap::from_values(25.5, 0.0, 0.0, 0.0));
    }

    #[test]
    fn impurities_proportional_to_input() {
        let input = ComponentMap::from_values(25.5, 100.0, 7.5, 20.0);
        let out = Distillation.apply(0.8, &input);
        let tol = Tolerances::default();
        // inefficiency 0.25, carried impurity total = 25.5 * 0.25
        let carried = 25.5 * 0.25;
        assert!(nearly_equal(out.get(Component::Water).unwrap(), 100.0 * carried / 127.5, tol));
        assert!(nearly_equal(out.get(Component::Sugar).unwrap(), 7.5 * carried / 127.5, tol));
        assert!(nearly_equal(out.get(Component::Fiber).unwrap(), 20.0 * carried / 127.5, tol));
        assert!(nearly_equal(out.sum() - 25.5, carried, tol));
    }

    #[test]
    fn any_missing_input_undefines_all() {
        let input = ComponentMap::new()
            .with(Component::Ethanol, 1.0)
            .with(Component::Water, 1.0)
            .with(Component::Sugar, 1.0);
        assert!(Distillation.apply(0.9, &input).is_empty());
    }

    #[test]
    fn no_impurities_carries_none() {
        let input = ComponentMap::from_values(5.0, 0.0, 0.0, 0.0);
        let out = Distillation.apply(0.5, &input);
        assert_eq!(out, input);
    }

    #[test]
    fn zero_efficiency_is_non_finite() {
        let input = ComponentMap::from_values(5.0, 1.0, 0.0, 0.0);
        let out = Distillation.apply(0.0, &input);
        assert!(!out.get(Component::Water).unwrap().is_finite());
    }
}
