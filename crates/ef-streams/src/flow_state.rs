//! A multi-component stream in one representation.

use std::fmt;

use ef_core::numeric::{Tolerances, ensure_finite, nearly_equal};

use crate::basis::Basis;
use crate::component_map::ComponentMap;
use crate::convert::{composition_of, mass_to_volumetric, volumetric_to_mass};
use crate::error::{StreamError, StreamResult};

/// Stream state: per-component amounts, their fractions, and the total rate.
///
/// Holds `amount[c] == total * composition[c]` for every defined component
/// and compositions summing to one. States are values; every processing
/// step produces a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    basis: Basis,
    amount: ComponentMap,
    composition: ComponentMap,
    total: f64,
}

impl FlowState {
    /// Build from per-component amounts; the total is their sum.
    pub fn from_amounts(basis: Basis, amount: ComponentMap) -> StreamResult<Self> {
        let total = amount.sum();
        Self::from_amounts_with_total(basis, amount, total)
    }

    /// Build from amounts and an externally supplied total.
    pub fn from_amounts_with_total(
        basis: Basis,
        amount: ComponentMap,
        total: f64,
    ) -> StreamResult<Self> {
        check_amounts(&amount)?;
        ensure_finite(total, "total flow")?;
        if total <= 0.0 {
            return Err(StreamError::NonPositiveTotal {
                what: basis.key(),
                total,
            });
        }
        let composition = amount.scaled(1.0 / total);
        Ok(Self {
            basis,
            amount,
            composition,
            total,
        })
    }

    /// Build from fractions of a total.
    ///
    /// Fractions must be non-negative and sum to one within input tolerance.
    pub fn from_composition(
        basis: Basis,
        composition: ComponentMap,
        total: f64,
    ) -> StreamResult<Self> {
        if composition.is_empty() {
            return Err(StreamError::EmptyInput {
                what: "composition",
            });
        }
        for (component, value) in composition.iter() {
            ensure_finite(value, "composition fraction")?;
            if value < 0.0 {
                return Err(StreamError::Negative { component, value });
            }
        }
        let sum = composition.sum();
        if !nearly_equal(sum, 1.0, Tolerances::input()) {
            return Err(StreamError::NotNormalized { sum });
        }
        ensure_finite(total, "total flow")?;

        Ok(Self {
            basis,
            amount: composition.scaled(total),
            composition,
            total,
        })
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }

    pub fn amount(&self) -> &ComponentMap {
        &self.amount
    }

    pub fn composition(&self) -> &ComponentMap {
        &self.composition
    }

    /// Total rate in the basis units (kg/s or m³/s).
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Convert to `target`, re-deriving the composition from converted amounts.
    pub fn to_basis(&self, target: Basis) -> StreamResult<FlowState> {
        if target == self.basis {
            return Ok(self.clone());
        }
        let amount = match target {
            Basis::Mass => volumetric_to_mass(&self.amount),
            Basis::Volumetric => mass_to_volumetric(&self.amount),
        };
        let composition = composition_of(&amount)?;
        Ok(Self {
            basis: target,
            total: amount.sum(),
            amount,
            composition,
        })
    }

    /// Same composition at a new total.
    pub fn rescaled(&self, total: f64) -> FlowState {
        Self {
            basis: self.basis,
            amount: self.composition.scaled(total),
            composition: self.composition,
            total,
        }
    }

    /// Whether the amount/composition/total invariant holds within `tol`.
    pub fn is_consistent(&self, tol: Tolerances) -> bool {
        if !nearly_equal(self.composition.sum(), 1.0, tol) {
            return false;
        }
        if !self.amount.defined_like(&self.composition) {
            return false;
        }
        self.amount.iter().all(|(c, a)| {
            let x = self.composition.get(c).unwrap_or(0.0);
            nearly_equal(a, self.total * x, tol)
        })
    }
}

fn check_amounts(amount: &ComponentMap) -> StreamResult<()> {
    if amount.is_empty() {
        return Err(StreamError::EmptyInput { what: "amounts" });
    }
    for (_, value) in amount.iter() {
        ensure_finite(value, "component amount")?;
    }
    Ok(())
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} flow {:.6} {} amount={} composition={}",
            self.basis,
            self.total,
            self.basis.unit(),
            self.amount,
            self.composition
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;

    fn feed() -> FlowState {
        FlowState::from_composition(
            Basis::Volumetric,
            ComponentMap::from_values(0.0, 0.7, 0.2, 0.1),
            0.01,
        )
        .unwrap()
    }

    #[test]
    fn from_composition_builds_amounts() {
        let state = feed();
        assert_eq!(state.total(), 0.01);
        let water = state.amount().get(Component::Water).unwrap();
        assert!(nearly_equal(water, 0.007, Tolerances::default()));
        assert!(state.is_consistent(Tolerances::default()));
    }

    #[test]
    fn from_composition_rejects_unnormalized() {
        let err = FlowState::from_composition(
            Basis::Volumetric,
            ComponentMap::from_values(0.5, 0.7, 0.0, 0.0),
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, StreamError::NotNormalized { .. }));
    }

    #[test]
    fn from_composition_rejects_negative() {
        let err = FlowState::from_composition(
            Basis::Volumetric,
            ComponentMap::from_values(-0.5, 1.5, 0.0, 0.0),
            1.0,
        )
        .unwrap_err();
        assert!(matches!(err, StreamError::Negative { .. }));
    }

    #[test]
    fn from_amounts_rejects_zero_total() {
        let err = FlowState::from_amounts(Basis::Mass, ComponentMap::from_values(0.0, 0.0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, StreamError::NonPositiveTotal { .. }));
    }

    #[test]
    fn to_basis_round_trip() {
        let vol = feed();
        let mass = vol.to_basis(Basis::Mass).unwrap();
        assert_eq!(mass.basis(), Basis::Mass);
        assert!(mass.is_consistent(Tolerances::default()));

        let back = mass.to_basis(Basis::Volumetric).unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(back.total(), vol.total(), tol));
        for (c, v) in vol.amount().iter() {
            assert!(nearly_equal(back.amount().get(c).unwrap(), v, tol));
        }
    }

    #[test]
    fn mass_composition_differs_from_volume_composition() {
        let mass = feed().to_basis(Basis::Mass).unwrap();
        let x_sugar_mass = mass.composition().get(Component::Sugar).unwrap();
        assert!(x_sugar_mass > 0.2, "sugar is denser than the mixture");
    }

    #[test]
    fn rescaled_keeps_composition() {
        let state = feed().rescaled(0.02);
        assert_eq!(state.total(), 0.02);
        assert!(state.is_consistent(Tolerances::default()));
        assert_eq!(state.composition(), feed().composition());
    }

    #[test]
    fn undefined_components_are_carried_as_absent() {
        let amounts = ComponentMap::new()
            .with(Component::Ethanol, 1.0)
            .with(Component::Water, 3.0);
        let state = FlowState::from_amounts(Basis::Mass, amounts).unwrap();
        assert_eq!(state.composition().get(Component::Ethanol), Some(0.25));
        assert_eq!(state.composition().get(Component::Sugar), None);
        assert!(state.is_consistent(Tolerances::default()));
    }
}
