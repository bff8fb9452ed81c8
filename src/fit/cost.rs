//! Cost evaluation for complete hypotheses.

use nalgebra::DVector;

use crate::domain::SizeBounds;
use crate::math::{fit_through_origin, sum_squared_residuals};

/// Step energies `Σ h_i²` at or below this value carry no size information.
pub const MIN_STEP_ENERGY: f64 = 1e-3;

/// Evaluated complete hypothesis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Fitted unit, already clamped to the bounds.
    pub size: f64,
    /// `Σ_{i≥1} (x_i - h_i · size)²` at the clamped size.
    pub cost: f64,
}

/// Fit the unit size for `hypothesis` and score it.
///
/// Returns `None` when every non-reference step is zero.
///
/// # Panics
/// Panics if `hypothesis` and `normalized` differ in length.
pub fn evaluate(hypothesis: &[i64], normalized: &[f64], bounds: &SizeBounds) -> Option<Evaluation> {
    assert_eq!(hypothesis.len(), normalized.len(), "hypothesis must be complete");
    if hypothesis.is_empty() {
        return None;
    }

    // Index 0 is the reference plane (h_0 = 0, x_0 = 0) and adds nothing.
    let steps = DVector::from_iterator(hypothesis.len() - 1, hypothesis[1..].iter().map(|&h| h as f64));
    let values = DVector::from_row_slice(&normalized[1..]);

    let size = bounds.clamp(fit_through_origin(&steps, &values).slope(MIN_STEP_ENERGY)?);
    let cost = sum_squared_residuals(&steps, &values, size);
    cost.is_finite().then_some(Evaluation { size, cost })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_unclamped_regression() {
        let x = [0.0, 332.0, 662.0, 996.0];
        let b = SizeBounds::new(250.0, 600.0).unwrap();
        let e = evaluate(&[0, 1, 2, 3], &x, &b).unwrap();

        let expected = (332.0 + 2.0 * 662.0 + 3.0 * 996.0) / 14.0;
        assert!((e.size - expected).abs() < 1e-9);
        let cost: f64 = [(332.0, 1.0), (662.0, 2.0), (996.0, 3.0)]
            .iter()
            .map(|(v, h)| (v - h * expected).powi(2))
            .sum();
        assert!((e.cost - cost).abs() < 1e-6);
    }

    #[test]
    fn evaluate_clamps_then_scores() {
        let x = [0.0, 400.0];
        let b = SizeBounds::new(100.0, 600.0).unwrap();
        let e = evaluate(&[0, 5], &x, &b).unwrap();
        assert_eq!(e.size, 100.0);
        assert!((e.cost - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn evaluate_rejects_all_zero_steps() {
        let b = SizeBounds::new(1.0, 2.0).unwrap();
        assert_eq!(evaluate(&[0, 0, 0], &[0.0, 1.0, 2.0], &b), None);
    }
}
