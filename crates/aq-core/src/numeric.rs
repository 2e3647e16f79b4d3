//! Numeric conventions shared across the workspace.

use thiserror::Error;

/// Scalar type for flows, concentrations and positions.
pub type Real = f64;

/// A scalar that must be finite arrived as NaN or an infinity.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Non-finite {quantity}: {value}")]
pub struct NonFiniteError {
    pub quantity: &'static str,
    pub value: Real,
}

/// Gate an externally supplied scalar before it enters the graph.
///
/// Every input value passes through here; calculated values then stay
/// finite because propagation only adds and multiplies finite terms.
pub fn ensure_finite(value: Real, quantity: &'static str) -> Result<Real, NonFiniteError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NonFiniteError { quantity, value })
    }
}

/// Absolute and relative comparison thresholds.
///
/// Flow magnitudes in one network span from litres of urine to an
/// upstream river volume, so conservation checks need the relative
/// bound; the absolute bound covers comparisons against zero.
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
    /// True when `a` and `b` agree within either bound.
    pub fn close(self, a: Real, b: Real) -> bool {
        let diff = (a - b).abs();
        diff <= self.abs || diff <= self.rel * a.abs().max(b.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn close_covers_both_magnitude_scales() {
        let tol = Tolerances::default();
        assert!(tol.close(10_000_000.0, 10_000_000.001));
        assert!(tol.close(0.0, 1e-13));
        assert!(!tol.close(0.7, 0.71));
    }

    #[test]
    fn non_finite_scalars_are_rejected() {
        assert_eq!(ensure_finite(0.7, "flow").unwrap(), 0.7);
        let err = ensure_finite(Real::NAN, "flow").unwrap_err();
        assert_eq!(err.quantity, "flow");
        assert!(ensure_finite(Real::INFINITY, "flow").is_err());
        assert!(ensure_finite(Real::NEG_INFINITY, "flow").is_err());
    }

    proptest! {
        #[test]
        fn close_is_symmetric(a in -1e9f64..1e9, b in -1e9f64..1e9) {
            let tol = Tolerances::default();
            prop_assert_eq!(tol.close(a, b), tol.close(b, a));
        }
    }
}
