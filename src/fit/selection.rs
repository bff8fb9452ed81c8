//! Best-hypothesis tracking.
//!
//! Selection rules, applied to every evaluated hypothesis in discovery order:
//!
//! 1. A strictly lower cost replaces the current best.
//! 2. A cost within [`TIE_EPSILON`] of the best replaces it only if the candidate is
//!    *coarser*: each of its non-zero steps divides the best's step at the same index.
//! 3. Anything else is discarded.
//!
//! Rule 2 compares against whatever is recorded at that moment, which may itself
//! have been installed by an earlier tie-break, so the winner among near-equal
//! costs depends on traversal order.

use crate::domain::{FitResult, Hypothesis};
use crate::fit::cost::Evaluation;

/// Costs closer than this are treated as equal.
pub const TIE_EPSILON: f64 = 1e-3;

/// What the selector did with an offered candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Improved,
    TieBreak,
    Discarded,
}

/// `true` if every non-zero step of `candidate` divides the step of `best` at
/// the same index (index 0 excluded).
pub fn is_coarser(candidate: &[i64], best: &[i64]) -> bool {
    if candidate.len() != best.len() {
        return false;
    }
    candidate
        .iter()
        .zip(best)
        .skip(1)
        .filter(|&(&c, _)| c != 0)
        .all(|(&c, &b)| b % c == 0)
}

/// Running best for a single fit.
#[derive(Debug, Clone)]
pub struct Selector {
    best_cost: f64,
    best_size: f64,
    best_hypothesis: Hypothesis,
    cost_trace: Vec<f64>,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector {
    pub fn new() -> Self {
        let empty = FitResult::insufficient();
        Self {
            best_cost: empty.best_cost,
            best_size: empty.best_size,
            best_hypothesis: empty.best_hypothesis,
            cost_trace: Vec::new(),
        }
    }

    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    pub fn best_hypothesis(&self) -> &[i64] {
        &self.best_hypothesis
    }

    /// `best_cost` after each accepted replacement.
    pub fn cost_trace(&self) -> &[f64] {
        &self.cost_trace
    }

    pub fn offer(&mut self, hypothesis: &[i64], eval: Evaluation) -> Decision {
        let decision = if eval.cost < self.best_cost {
            self.best_cost = eval.cost;
            Decision::Improved
        } else if (eval.cost - self.best_cost).abs() <= TIE_EPSILON
            && is_coarser(hypothesis, &self.best_hypothesis)
        {
            // Keep the recorded cost from creeping upward across chained ties.
            self.best_cost = self.best_cost.min(eval.cost);
            Decision::TieBreak
        } else {
            return Decision::Discarded;
        };

        self.best_size = eval.size;
        self.best_hypothesis = hypothesis.to_vec();
        self.cost_trace.push(self.best_cost);
        decision
    }

    pub fn finish(self) -> (FitResult, Vec<f64>) {
        let result = FitResult {
            best_size: self.best_size,
            best_hypothesis: self.best_hypothesis,
            best_cost: self.best_cost,
        };
        (result, self.cost_trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(size: f64, cost: f64) -> Evaluation {
        Evaluation { size, cost }
    }

    #[test]
    fn coarser_requires_divisibility_on_non_zero_steps() {
        assert!(is_coarser(&[0, 1, 2], &[0, 2, 4]));
        assert!(is_coarser(&[0, 0, 2], &[0, 3, 4]));
        assert!(!is_coarser(&[0, 3], &[0, 4]));
        assert!(!is_coarser(&[0, 1], &[]));
    }

    #[test]
    fn strict_improvement_always_wins() {
        let mut s = Selector::new();
        assert_eq!(s.offer(&[0, 5], eval(100.0, 10_000.0)), Decision::Improved);
        assert_eq!(s.offer(&[0, 3], eval(133.0, 5.0)), Decision::Improved);
        assert_eq!(s.best_hypothesis(), &[0, 3]);
    }

    #[test]
    fn near_tie_prefers_coarser_divisor() {
        let mut s = Selector::new();
        s.offer(&[0, 2, 4], eval(100.0, 1.0));
        assert_eq!(s.offer(&[0, 1, 2], eval(200.0, 1.0005)), Decision::TieBreak);

        let (result, trace) = s.finish();
        assert_eq!(result.best_hypothesis, vec![0, 1, 2]);
        assert_eq!(result.best_size, 200.0);
        assert_eq!(result.best_cost, 1.0);
        assert_eq!(trace, vec![1.0, 1.0]);
    }

    #[test]
    fn near_tie_without_divisibility_is_discarded() {
        let mut s = Selector::new();
        s.offer(&[0, 4], eval(100.0, 0.0));
        assert_eq!(s.offer(&[0, 3], eval(133.3, 0.0)), Decision::Discarded);
        assert_eq!(s.best_hypothesis(), &[0, 4]);
    }

    #[test]
    fn outside_tie_band_is_discarded() {
        let mut s = Selector::new();
        s.offer(&[0, 2], eval(100.0, 1.0));
        assert_eq!(s.offer(&[0, 1], eval(200.0, 1.01)), Decision::Discarded);
    }

    #[test]
    fn tie_break_is_order_dependent() {
        // [0,4] -> [0,3] rejected (4 % 3 != 0) -> [0,1] accepted.
        let mut a = Selector::new();
        for h in [[0, 4], [0, 3], [0, 1]] {
            a.offer(&h, eval(400.0 / h[1] as f64, 0.0));
        }
        assert_eq!(a.best_hypothesis(), &[0, 1]);

        // [0,3] first: neither [0,4] nor [0,2] divide 3, so [0,3] stays.
        let mut b = Selector::new();
        for h in [[0, 3], [0, 4], [0, 2]] {
            b.offer(&h, eval(400.0 / h[1] as f64, 0.0));
        }
        assert_eq!(b.best_hypothesis(), &[0, 3]);
    }

    #[test]
    fn recorded_cost_never_increases() {
        let mut s = Selector::new();
        s.offer(&[0, 8], eval(50.0, 2.0));
        s.offer(&[0, 4], eval(100.0, 2.0008));
        s.offer(&[0, 2], eval(200.0, 2.0009));
        s.offer(&[0, 1], eval(400.0, 1.5));

        let trace = s.cost_trace().to_vec();
        assert_eq!(trace.len(), 4);
        assert!(trace.windows(2).all(|w| w[1] <= w[0]), "trace={trace:?}");
        assert_eq!(s.best_hypothesis(), &[0, 1]);
    }
}
