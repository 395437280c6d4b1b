//! Mass ↔ volumetric conversion engine.
//!
//! Amount conversions are elementwise: `mass[c] = volumetric[c] * density[c]`.
//! Compositions are never converted directly; they are re-derived from the
//! converted amounts, since volume fractions and mass fractions differ.

use std::str::FromStr;

use crate::basis::Basis;
use crate::component_map::ComponentMap;
use crate::error::{StreamError, StreamResult};

/// Whether conversion inputs are per-component amounts or fractions of a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionMode {
    #[default]
    Amount,
    Composition,
}

/// Which views a conversion or process call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputForm {
    Amount,
    Composition,
    #[default]
    Full,
}

impl FromStr for ConversionMode {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "amount" => Ok(ConversionMode::Amount),
            "composition" => Ok(ConversionMode::Composition),
            other => Err(StreamError::InvalidSelector {
                what: "conversion mode",
                name: other.to_string(),
            }),
        }
    }
}

impl FromStr for OutputForm {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "amount" => Ok(OutputForm::Amount),
            "composition" => Ok(OutputForm::Composition),
            "full" => Ok(OutputForm::Full),
            other => Err(StreamError::InvalidSelector {
                what: "output form",
                name: other.to_string(),
            }),
        }
    }
}

/// Result of [`convert`], shaped by the requested [`OutputForm`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutput {
    Amount(ComponentMap),
    Composition(ComponentMap),
    Full {
        amount: ComponentMap,
        composition: ComponentMap,
    },
}

impl ConversionOutput {
    /// Converted amounts, when the output form carries them.
    pub fn amount(&self) -> Option<&ComponentMap> {
        match self {
            ConversionOutput::Amount(amount) | ConversionOutput::Full { amount, .. } => {
                Some(amount)
            }
            ConversionOutput::Composition(_) => None,
        }
    }

    /// Converted composition, when the output form carries it.
    pub fn composition(&self) -> Option<&ComponentMap> {
        match self {
            ConversionOutput::Composition(composition)
            | ConversionOutput::Full { composition, .. } => Some(composition),
            ConversionOutput::Amount(_) => None,
        }
    }
}

/// Convert mass rates (kg/s) to volumetric rates (m³/s).
pub fn mass_to_volumetric(amounts: &ComponentMap) -> ComponentMap {
    amounts.map(|c, v| v / c.density_kgpm3())
}

/// Convert volumetric rates (m³/s) to mass rates (kg/s).
pub fn volumetric_to_mass(amounts: &ComponentMap) -> ComponentMap {
    amounts.map(|c, v| v * c.density_kgpm3())
}

/// Mass rates from volume fractions and a total volumetric flow.
pub fn composition_to_mass(composition: &ComponentMap, total_volumetric: f64) -> ComponentMap {
    volumetric_to_mass(&composition.scaled(total_volumetric))
}

/// Volumetric rates from mass fractions and a total mass flow.
pub fn composition_to_volumetric(composition: &ComponentMap, total_mass: f64) -> ComponentMap {
    mass_to_volumetric(&composition.scaled(total_mass))
}

/// Fractions of the total for each defined amount.
pub fn composition_of(amounts: &ComponentMap) -> StreamResult<ComponentMap> {
    let total = amounts.sum();
    if total <= 0.0 || total.is_nan() {
        return Err(StreamError::NonPositiveTotal {
            what: "amount",
            total,
        });
    }
    Ok(amounts.scaled(1.0 / total))
}

/// Convert `inputs` expressed in the `from` basis into the other basis.
///
/// In [`ConversionMode::Composition`] the inputs are fractions and `total`
/// (in the `from` basis) is required.
pub fn convert(
    inputs: &ComponentMap,
    from: Basis,
    mode: ConversionMode,
    total: Option<f64>,
    output: OutputForm,
) -> StreamResult<ConversionOutput> {
    if inputs.is_empty() {
        return Err(StreamError::EmptyInput { what: "conversion" });
    }

    let source_amounts = match mode {
        ConversionMode::Amount => *inputs,
        ConversionMode::Composition => inputs.scaled(total.ok_or(StreamError::MissingTotal)?),
    };
    let amount = match from {
        Basis::Mass => mass_to_volumetric(&source_amounts),
        Basis::Volumetric => volumetric_to_mass(&source_amounts),
    };

    match output {
        OutputForm::Amount => Ok(ConversionOutput::Amount(amount)),
        OutputForm::Composition => Ok(ConversionOutput::Composition(composition_of(&amount)?)),
        OutputForm::Full => {
            let composition = composition_of(&amount)?;
            Ok(ConversionOutput::Full {
                amount,
                composition,
            })
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use ef_core::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mass_volumetric_round_trip(
            e in 0.0_f64..1e3, wa in 0.0_f64..1e3, su in 0.0_f64..1e3, fi in 0.0_f64..1e3,
        ) {
            let amounts = ComponentMap::from_values(e, wa, su, fi);
            let back = volumetric_to_mass(&mass_to_volumetric(&amounts));
            let tol = Tolerances { abs: 1e-12, rel: 1e-9 };
            for (c, v) in amounts.iter() {
                prop_assert!(nearly_equal(back.get(c).unwrap(), v, tol));
            }
        }

        #[test]
        fn composition_sums_to_one(
            e in 0.0_f64..1e3, wa in 1e-3_f64..1e3, su in 0.0_f64..1e3, fi in 0.0_f64..1e3,
        ) {
            let amounts = ComponentMap::from_values(e, wa, su, fi);
            let comp = composition_of(&amounts).unwrap();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            prop_assert!(nearly_equal(comp.sum(), 1.0, tol));
        }
    }
}
