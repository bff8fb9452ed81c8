//! Least squares through the origin.
//!
//! For a fixed hypothesis the model is `x_i ≈ h_i · s` with a single unknown
//! `s`, so the normal equations collapse to one scalar ratio:
//!
//! ```text
//! s = Σ h_i x_i / Σ h_i²
//! ```
//!
//! The reference measurement (`h_0 = 0`, `x_0 = 0`) contributes nothing to either
//! sum, so callers can pass the full vectors.

use nalgebra::DVector;

/// Numerator and denominator of the origin-constrained slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginFit {
    /// `Σ h_i x_i`
    pub cross: f64,
    /// `Σ h_i²`
    pub energy: f64,
}

impl OriginFit {
    /// Slope `cross / energy`, or `None` when `energy <= min_energy`.
    pub fn slope(&self, min_energy: f64) -> Option<f64> {
        if self.energy <= min_energy {
            return None;
        }
        let s = self.cross / self.energy;
        s.is_finite().then_some(s)
    }
}

/// Accumulate the sums for an origin-constrained fit of `y ≈ x · s`.
///
/// # Panics
/// Panics if `x` and `y` have different lengths.
pub fn fit_through_origin(x: &DVector<f64>, y: &DVector<f64>) -> OriginFit {
    OriginFit {
        cross: x.dot(y),
        energy: x.norm_squared(),
    }
}

/// Sum of squared residuals `Σ (y_i - x_i · s)²`.
pub fn sum_squared_residuals(x: &DVector<f64>, y: &DVector<f64>, s: f64) -> f64 {
    (y - x * s).norm_squared()
}
