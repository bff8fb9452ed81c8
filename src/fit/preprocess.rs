//! Measurement validation and normalization.
//!
//! The search works on offsets from the smallest measurement, sorted ascending:
//! the smallest plane becomes the zero-step reference for every hypothesis.

use crate::error::{AppError, ErrorKind};

/// Sorted copy of `sizes`, offset so the first element is exactly 0.
///
/// Returns `Ok(None)` when fewer than two measurements are supplied: a unit
/// cannot be fitted through a single plane.
pub fn normalize(sizes: &[f64]) -> Result<Option<Vec<f64>>, AppError> {
    if let Some((idx, v)) = sizes.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(AppError::with_kind(
            ErrorKind::InvalidMeasurement,
            2,
            format!("Measurement #{idx} is not finite ({v})."),
        ));
    }
    if sizes.len() < 2 {
        return Ok(None);
    }

    let mut sorted = sizes.to_vec();
    sorted.sort_by(f64::total_cmp);
    let z0 = sorted[0];
    for v in &mut sorted {
        *v -= z0;
    }
    Ok(Some(sorted))
}

/// Measurement closest to `target`.
///
/// When `target` sits strictly between two measurements at equal distance, the
/// lower one wins. Returns `None` for an empty slice.
pub fn closest_measurement(values: &[f64], target: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let upper = sorted.partition_point(|&v| v < target);
    if upper == 0 {
        return Some(sorted[0]);
    }
    if upper == sorted.len() {
        return Some(sorted[sorted.len() - 1]);
    }
    let above = sorted[upper];
    let below = sorted[upper - 1];
    if (above - target).abs() < (below - target).abs() {
        Some(above)
    } else {
        Some(below)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_sorts_and_offsets() {
        let out = normalize(&[1745.0, 1083.0, 2079.0, 1415.0]).unwrap().unwrap();
        assert_eq!(out, vec![0.0, 332.0, 662.0, 996.0]);
    }

    #[test]
    fn normalize_needs_two_points() {
        assert_eq!(normalize(&[]).unwrap(), None);
        assert_eq!(normalize(&[42.0]).unwrap(), None);
    }

    #[test]
    fn normalize_rejects_non_finite() {
        let err = normalize(&[1.0, f64::NAN, 3.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMeasurement);
        // Even a single bad value is an error, not a sentinel.
        assert!(normalize(&[f64::INFINITY]).is_err());
    }

    #[test]
    fn closest_measurement_picks_nearest() {
        let depths = [1083.0, 1415.0, 1745.0, 2079.0];
        assert_eq!(closest_measurement(&depths, 80.0), Some(1083.0));
        assert_eq!(closest_measurement(&depths, 5000.0), Some(2079.0));
        assert_eq!(closest_measurement(&depths, 1700.0), Some(1745.0));
        assert_eq!(closest_measurement(&depths, 1415.0), Some(1415.0));
        assert_eq!(closest_measurement(&[], 1.0), None);
    }

    #[test]
    fn closest_measurement_ties_go_low() {
        assert_eq!(closest_measurement(&[10.0, 20.0], 15.0), Some(10.0));
    }
}
