//! Edge thickness scale.

use aq_core::Real;

/// Maps a flow magnitude to a stroke width.
///
/// The domain is fitted to the observed positive magnitudes across all
/// node values for the selected basis; the range is fixed. Linear or
/// logarithmic mapping is caller-selectable, and both preserve the
/// relative ordering of magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThicknessScale {
    min: Real,
    max: Real,
    log: bool,
}

impl ThicknessScale {
    /// Output width range.
    pub const RANGE: (Real, Real) = (0.01, 10.0);
    /// Near-zero flows stay perceptible at this width.
    pub const MIN_VISIBLE_WIDTH: Real = 0.6;
    /// Fallback domain when no positive magnitude is observed.
    const FALLBACK_DOMAIN: (Real, Real) = (0.01, 100.0);

    /// Fit the domain to the positive values of `magnitudes`.
    pub fn fit<I: IntoIterator<Item = Real>>(magnitudes: I, log: bool) -> Self {
        let mut min = Real::INFINITY;
        let mut max = Real::NEG_INFINITY;
        for m in magnitudes {
            if m > 0.0 && m.is_finite() {
                min = min.min(m);
                max = max.max(m);
            }
        }
        if !min.is_finite() || !max.is_finite() {
            (min, max) = Self::FALLBACK_DOMAIN;
        }
        Self { min, max, log }
    }

    /// Width for a magnitude. Zero (or negative) magnitude draws nothing.
    pub fn width(&self, magnitude: Real) -> Real {
        if magnitude <= 0.0 || !magnitude.is_finite() {
            return 0.0;
        }
        let t = if self.max <= self.min {
            // Degenerate domain: every positive magnitude maps alike.
            0.5
        } else if self.log {
            (magnitude.ln() - self.min.ln()) / (self.max.ln() - self.min.ln())
        } else {
            (magnitude - self.min) / (self.max - self.min)
        };
        let t = t.clamp(0.0, 1.0);
        let width = Self::RANGE.0 + t * (Self::RANGE.1 - Self::RANGE.0);
        width.max(Self::MIN_VISIBLE_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_magnitude_is_invisible() {
        let scale = ThicknessScale::fit([1.0, 10.0], false);
        assert_eq!(scale.width(0.0), 0.0);
        assert_eq!(scale.width(-5.0), 0.0);
    }

    #[test]
    fn small_positive_magnitude_clamps_to_visible_minimum() {
        let scale = ThicknessScale::fit([1.0, 1_000.0], false);
        assert_eq!(scale.width(1.0), ThicknessScale::MIN_VISIBLE_WIDTH);
    }

    #[test]
    fn max_magnitude_hits_range_top() {
        let scale = ThicknessScale::fit([1.0, 1_000.0], true);
        assert!((scale.width(1_000.0) - ThicknessScale::RANGE.1).abs() < 1e-9);
    }

    #[test]
    fn ordering_is_preserved_under_both_mappings() {
        let values = [0.5, 2.0, 8.0, 64.0, 512.0];
        for log in [false, true] {
            let scale = ThicknessScale::fit(values, log);
            let widths: Vec<_> = values.iter().map(|&v| scale.width(v)).collect();
            for pair in widths.windows(2) {
                assert!(pair[0] <= pair[1], "widths out of order ({log}): {widths:?}");
            }
        }
    }

    #[test]
    fn empty_fit_falls_back_to_default_domain() {
        let scale = ThicknessScale::fit([0.0, -1.0], false);
        // Still yields sane widths for arbitrary positive queries.
        let w = scale.width(50.0);
        assert!(w >= ThicknessScale::MIN_VISIBLE_WIDTH && w <= ThicknessScale::RANGE.1);
    }

    #[test]
    fn single_value_domain_is_degenerate_but_finite() {
        let scale = ThicknessScale::fit([7.0], true);
        let w = scale.width(7.0);
        assert!(w.is_finite() && w > 0.0);
    }
}
