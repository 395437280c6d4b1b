//! Property tests for stream states across bases.

use ef_core::numeric::{Tolerances, nearly_equal};
use ef_streams::{Basis, Component, ComponentMap, FlowState, StreamError};
use proptest::prelude::*;

fn fractions() -> impl Strategy<Value = ComponentMap> {
    (0.0_f64..1.0, 0.01_f64..1.0, 0.0_f64..1.0, 0.0_f64..1.0).prop_map(|(e, w, s, f)| {
        let sum = e + w + s + f;
        ComponentMap::from_values(e / sum, w / sum, s / sum, f / sum)
    })
}

proptest! {
    #[test]
    fn states_stay_consistent_across_bases(x in fractions(), q in 1e-6_f64..10.0) {
        let tol = Tolerances { abs: 1e-12, rel: 1e-9 };
        let vol = FlowState::from_composition(Basis::Volumetric, x, q).unwrap();
        prop_assert!(vol.is_consistent(tol));

        let mass = vol.to_basis(Basis::Mass).unwrap();
        prop_assert!(mass.is_consistent(tol));
        for c in Component::ALL {
            let expected = vol.amount().get(c).unwrap() * c.density_kgpm3();
            prop_assert!(nearly_equal(mass.amount().get(c).unwrap(), expected, tol));
        }

        let back = mass.to_basis(Basis::Volumetric).unwrap();
        prop_assert!(nearly_equal(back.total(), q, tol));
    }

    #[test]
    fn rescaling_preserves_composition(x in fractions(), q in 1e-6_f64..10.0, k in 0.1_f64..10.0) {
        let vol = FlowState::from_composition(Basis::Volumetric, x, q).unwrap();
        let scaled = vol.rescaled(q * k);
        prop_assert_eq!(scaled.composition(), vol.composition());
        let consistency_tol = Tolerances { abs: 1e-12, rel: 1e-9 };
        prop_assert!(scaled.is_consistent(consistency_tol));
    }
}

#[test]
fn named_parsing_rejects_unknown_components() {
    let err = ComponentMap::from_named([("ethanol", 0.5), ("methanol", 0.5)]).unwrap_err();
    assert_eq!(
        err,
        StreamError::UnknownComponent {
            name: "methanol".to_string()
        }
    );
}

#[test]
fn composition_within_input_tolerance_is_accepted() {
    let x = ComponentMap::from_values(0.25, 0.25, 0.25, 0.250_000_1);
    assert!(FlowState::from_composition(Basis::Volumetric, x, 1.0).is_ok());
}
