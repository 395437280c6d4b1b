use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Looser tolerance for values typed in by a user (compositions, fractions).
    pub const fn input() -> Self {
        Self {
            abs: 1e-6,
            rel: 1e-6,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Divide, returning 0 when the denominator is exactly zero.
///
/// Connector physics relies on this for startup and no-flow conditions.
#[inline]
pub fn div_or_zero(num: Real, den: Real) -> Real {
    if den == 0.0 { 0.0 } else { num / den }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn input_tolerance_is_looser() {
        assert!(nearly_equal(1.0, 1.0 + 5e-7, Tolerances::input()));
        assert!(!nearly_equal(1.0, 1.0 + 5e-7, Tolerances::default()));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn div_or_zero_guards_zero() {
        assert_eq!(div_or_zero(3.0, 0.0), 0.0);
        assert_eq!(div_or_zero(3.0, 2.0), 1.5);
    }
}
