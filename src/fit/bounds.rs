//! Step windows for extending partial hypotheses.
//!
//! A partial hypothesis `[0, h_1, ..., h_k]` is extended with every integer in
//! `[h_k + min_step, h_k + max_step]`. The two policies differ only in where the
//! window comes from:
//!
//! - `Local`: recomputed at every expansion from two neighbouring measurements
//! - `Global`: computed once from the largest and the smallest usable gap
//!
//! Gaps are non-negative, so `floor` here agrees with truncation.

use std::ops::RangeInclusive;

use crate::domain::{BoundPolicy, SizeBounds};

/// Window ends outside this range are suspicious for box stacks.
pub const SANE_STEPS: RangeInclusive<i64> = 0..=10;

/// Inclusive range of step increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepWindow {
    pub min_step: i64,
    pub max_step: i64,
}

impl StepWindow {
    pub fn is_empty(&self) -> bool {
        self.min_step > self.max_step
    }

    /// True when either end falls outside [`SANE_STEPS`].
    pub fn is_unusual(&self) -> bool {
        !SANE_STEPS.contains(&self.min_step) || !SANE_STEPS.contains(&self.max_step)
    }

    /// Absolute child steps for a parent whose last step is `last`.
    ///
    /// Returns `None` if the window is empty or the range would overflow.
    pub fn children_of(&self, last: i64) -> Option<RangeInclusive<i64>> {
        if self.is_empty() {
            return None;
        }
        let lo = last.checked_add(self.min_step)?;
        let hi = last.checked_add(self.max_step)?;
        Some(lo..=hi)
    }
}

/// Number of whole `size` units in `gap`.
///
/// The float to int cast saturates, so huge ratios cannot wrap.
fn whole_steps(gap: f64, size: f64) -> i64 {
    (gap / size).floor() as i64
}

/// Local window for a partial hypothesis of length `partial_len`.
///
/// Uses the measurements at `idx1 = max(0, L - 2)` and `idx2 = min(idx1 + 1, N - 1)`.
pub fn local_window(normalized: &[f64], partial_len: usize, bounds: &SizeBounds) -> StepWindow {
    let n = normalized.len();
    let idx1 = partial_len.saturating_sub(2);
    let idx2 = (idx1 + 1).min(n.saturating_sub(1));
    let delta = normalized[idx2] - normalized[idx1];

    StepWindow {
        min_step: whole_steps(delta, bounds.max_size),
        max_step: whole_steps(delta, bounds.min_size).saturating_add(1),
    }
}

/// Smallest consecutive gap strictly larger than `min_size`.
///
/// With exactly two measurements the single gap is used as-is.
pub fn smallest_usable_gap(normalized: &[f64], min_size: f64) -> Option<f64> {
    match normalized {
        [] | [_] => None,
        [first, last] => Some(last - first),
        _ => normalized
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|&gap| gap > min_size)
            .min_by(f64::total_cmp),
    }
}

/// Global window for the whole set.
///
/// Returns `None` when no gap is usable, which leaves the search with nothing
/// to expand.
pub fn global_window(normalized: &[f64], bounds: &SizeBounds) -> Option<StepWindow> {
    let (first, last) = (normalized.first()?, normalized.last()?);
    let max_gap = last - first;
    let min_gap = smallest_usable_gap(normalized, bounds.min_size)?;

    Some(StepWindow {
        min_step: whole_steps(min_gap, bounds.max_size).saturating_add(1),
        max_step: whole_steps(max_gap, bounds.min_size),
    })
}

/// Window source for one run, prepared before the search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepBounds {
    Local,
    /// Precomputed global window (`None`: no usable gap).
    Global(Option<StepWindow>),
}

impl StepBounds {
    pub fn prepare(policy: BoundPolicy, normalized: &[f64], bounds: &SizeBounds) -> Self {
        match policy {
            BoundPolicy::Local => StepBounds::Local,
            BoundPolicy::Global => StepBounds::Global(global_window(normalized, bounds)),
        }
    }

    /// Window for extending a partial hypothesis of length `partial_len`.
    pub fn window(&self, normalized: &[f64], partial_len: usize, bounds: &SizeBounds) -> Option<StepWindow> {
        match self {
            StepBounds::Local => Some(local_window(normalized, partial_len, bounds)),
            StepBounds::Global(window) => *window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(lo: f64, hi: f64) -> SizeBounds {
        SizeBounds::new(lo, hi).unwrap()
    }

    #[test]
    fn local_window_uses_lagging_neighbours() {
        let x = [0.0, 15.0, 215.0, 800.0, 1100.0];
        let b = bounds(200.0, 600.0);

        // L = 1 and L = 2 both look at the first gap (0 -> 15).
        assert_eq!(local_window(&x, 1, &b), StepWindow { min_step: 0, max_step: 1 });
        assert_eq!(local_window(&x, 2, &b), StepWindow { min_step: 0, max_step: 1 });
        // L = 3 looks at 15 -> 215, L = 4 at 215 -> 800.
        assert_eq!(local_window(&x, 3, &b), StepWindow { min_step: 0, max_step: 2 });
        assert_eq!(local_window(&x, 4, &b), StepWindow { min_step: 0, max_step: 3 });
    }

    #[test]
    fn local_window_always_admits_a_positive_step() {
        let x = [0.0, 0.0, 0.0];
        let w = local_window(&x, 1, &bounds(1.0, 2.0));
        assert_eq!(w, StepWindow { min_step: 0, max_step: 1 });
    }

    #[test]
    fn global_window_from_gaps() {
        let x = [0.0, 15.0, 215.0, 800.0, 1100.0];
        // gaps 15, 200, 585, 300; usable (> 200): 585, 300 -> min_gap = 300.
        let w = global_window(&x, &bounds(200.0, 600.0)).unwrap();
        assert_eq!(w, StepWindow { min_step: 1, max_step: 5 });
        assert!(!w.is_unusual());
    }

    #[test]
    fn global_window_two_points_uses_full_gap() {
        let w = global_window(&[0.0, 400.0], &bounds(100.0, 600.0)).unwrap();
        assert_eq!(w, StepWindow { min_step: 1, max_step: 4 });
    }

    #[test]
    fn global_window_without_usable_gap() {
        assert_eq!(global_window(&[0.0, 10.0, 20.0], &bounds(50.0, 100.0)), None);
    }

    #[test]
    fn unusual_window_flags_large_steps() {
        let w = global_window(&[0.0, 5.0, 5000.0], &bounds(1.0, 10.0)).unwrap();
        assert!(w.is_unusual());
    }

    #[test]
    fn children_of_handles_empty_and_overflow() {
        let empty = StepWindow { min_step: 1, max_step: 0 };
        assert!(empty.children_of(3).is_none());

        let w = StepWindow { min_step: 1, max_step: 3 };
        assert_eq!(w.children_of(2), Some(3..=5));
        assert!(w.children_of(i64::MAX).is_none());
    }
}
