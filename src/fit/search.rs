//! Exhaustive hypothesis search for a single measurement set.
//!
//! Given:
//! - normalized measurements `x_0 = 0 <= x_1 <= ... <= x_{N-1}`
//! - size bounds `[min_size, max_size]`
//! - a bound policy
//!
//! we enumerate every integer step sequence the policy admits, fit the unit size
//! of each complete sequence by least squares through the origin, and keep the
//! best one according to `fit::selection`.
//!
//! Traversal is depth-first over an explicit LIFO worklist seeded with `[0]`.
//! Children are pushed in ascending step order, so the largest step of each
//! window is explored first. This order is part of the contract: it decides
//! which of several near-equal hypotheses the tie-break sees first.
//!
//! The search is exponential in `N` times the window width. Callers are expected
//! to keep `N` and `max_size / min_size` small.

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{BoundPolicy, FitResult, Hypothesis, SizeBounds};
use crate::error::AppError;
use crate::fit::bounds::StepBounds;
use crate::fit::cost::evaluate;
use crate::fit::preprocess::normalize;
use crate::fit::selection::{Decision, Selector};

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Partial hypotheses popped from the worklist.
    pub expanded: usize,
    /// Complete hypotheses handed to the evaluator.
    pub evaluated: usize,
    /// Complete hypotheses rejected because every step was zero.
    pub degenerate: usize,
    pub improvements: usize,
    pub tie_breaks: usize,
    /// The global window was unusual (outside `0..=10`) or had no usable gap.
    pub window_flagged: bool,
}

/// Full output of a fit, for reporting and export.
#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    pub policy: BoundPolicy,
    pub bounds: SizeBounds,
    /// Sorted, zero-offset measurements the search ran on.
    pub normalized: Vec<f64>,
    pub result: FitResult,
    pub stats: SearchStats,
    /// `best_cost` after each accepted replacement, in discovery order.
    pub cost_trace: Vec<f64>,
}

/// Depth-first enumerator of complete hypotheses.
///
/// Yields complete hypotheses in traversal order; partial ones are expanded
/// internally.
#[derive(Debug, Clone)]
pub struct HypothesisGenerator<'a> {
    normalized: &'a [f64],
    bounds: SizeBounds,
    step_bounds: StepBounds,
    worklist: Vec<Hypothesis>,
    expanded: usize,
}

impl<'a> HypothesisGenerator<'a> {
    pub fn new(normalized: &'a [f64], bounds: SizeBounds, step_bounds: StepBounds) -> Self {
        Self {
            normalized,
            bounds,
            step_bounds,
            worklist: vec![vec![0]],
            expanded: 0,
        }
    }

    /// Number of partial hypotheses expanded so far.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    fn expand(&mut self, parent: Hypothesis) {
        self.expanded += 1;
        let Some(window) = self.step_bounds.window(self.normalized, parent.len(), &self.bounds) else {
            return;
        };
        let Some(&last) = parent.last() else {
            return;
        };
        let Some(children) = window.children_of(last) else {
            return;
        };
        for step in children {
            let mut child = Vec::with_capacity(parent.len() + 1);
            child.extend_from_slice(&parent);
            child.push(step);
            self.worklist.push(child);
        }
    }
}

impl Iterator for HypothesisGenerator<'_> {
    type Item = Hypothesis;

    fn next(&mut self) -> Option<Hypothesis> {
        while let Some(top) = self.worklist.pop() {
            if top.len() >= self.normalized.len() {
                return Some(top);
            }
            self.expand(top);
        }
        None
    }
}

/// Fit the common unit size of `sizes`.
///
/// Returns the `-1` sentinel result for fewer than two measurements, and an
/// `InvalidBounds` error unless `0 < min_size < max_size`.
pub fn fit_box_size(
    sizes: &[f64],
    min_size: f64,
    max_size: f64,
    policy: BoundPolicy,
) -> Result<FitResult, AppError> {
    let bounds = SizeBounds::new(min_size, max_size)?;
    Ok(fit_with_report(sizes, &bounds, policy)?.result)
}

/// Fit `sizes` and keep the intermediate diagnostics.
pub fn fit_with_report(sizes: &[f64], bounds: &SizeBounds, policy: BoundPolicy) -> Result<FitReport, AppError> {
    let Some(normalized) = normalize(sizes)? else {
        return Ok(FitReport {
            policy,
            bounds: *bounds,
            normalized: Vec::new(),
            result: FitResult::insufficient(),
            stats: SearchStats::default(),
            cost_trace: Vec::new(),
        });
    };

    let mut stats = SearchStats::default();
    let step_bounds = StepBounds::prepare(policy, &normalized, bounds);
    if let StepBounds::Global(window) = step_bounds {
        match window {
            Some(w) if w.is_unusual() => {
                warn!(
                    min_step = w.min_step,
                    max_step = w.max_step,
                    "global step window outside 0..=10; inputs look unusual"
                );
                stats.window_flagged = true;
            }
            Some(_) => {}
            None => {
                warn!(min_size = bounds.min_size, "no consecutive gap exceeds min_size; nothing to search");
                stats.window_flagged = true;
            }
        }
    }

    let mut selector = Selector::new();
    let mut generator = HypothesisGenerator::new(&normalized, *bounds, step_bounds);
    for hypothesis in generator.by_ref() {
        stats.evaluated += 1;
        let Some(eval) = evaluate(&hypothesis, &normalized, bounds) else {
            stats.degenerate += 1;
            continue;
        };
        match selector.offer(&hypothesis, eval) {
            Decision::Improved => stats.improvements += 1,
            Decision::TieBreak => stats.tie_breaks += 1,
            Decision::Discarded => {}
        }
    }
    stats.expanded = generator.expanded();

    let (result, cost_trace) = selector.finish();
    debug!(
        policy = policy.display_name(),
        n = normalized.len(),
        evaluated = stats.evaluated,
        degenerate = stats.degenerate,
        best_size = result.best_size,
        best_cost = result.best_cost,
        "box size search finished"
    );

    Ok(FitReport {
        policy,
        bounds: *bounds,
        normalized,
        result,
        stats,
        cost_trace,
    })
}
