//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the hypothesis search
//! - exported to JSON
//! - printed by the report layer without reaching into the search internals

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `best_size` value reported when no size could be fitted.
pub const INSUFFICIENT_SIZE: f64 = -1.0;

/// Integer step multipliers, one per normalized measurement.
///
/// Element 0 is always 0: the smallest measurement is the reference plane.
pub type Hypothesis = Vec<i64>;

/// Rule used to bound the step window when a partial hypothesis is extended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BoundPolicy {
    /// Window derived at every expansion from the two measurements next to the
    /// frontier of the partial hypothesis.
    #[default]
    Local,
    /// One window derived before the search from the largest and the smallest
    /// usable gap of the whole set.
    Global,
}

impl BoundPolicy {
    pub const ALL: [BoundPolicy; 2] = [BoundPolicy::Local, BoundPolicy::Global];

    pub fn display_name(self) -> &'static str {
        match self {
            BoundPolicy::Local => "local",
            BoundPolicy::Global => "global",
        }
    }
}

/// Which policies a run should fit with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PolicySpec {
    #[default]
    Local,
    Global,
    /// Fit every measurement set with both policies side by side.
    Both,
}

impl PolicySpec {
    pub fn policies(self) -> Vec<BoundPolicy> {
        match self {
            PolicySpec::Local => vec![BoundPolicy::Local],
            PolicySpec::Global => vec![BoundPolicy::Global],
            PolicySpec::Both => BoundPolicy::ALL.to_vec(),
        }
    }
}

/// Admissible range for the fitted unit size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeBounds {
    pub min_size: f64,
    pub max_size: f64,
}

impl SizeBounds {
    /// Validate `0 < min_size < max_size` (both finite).
    pub fn new(min_size: f64, max_size: f64) -> Result<Self, AppError> {
        if !(min_size.is_finite() && max_size.is_finite() && min_size > 0.0 && max_size > min_size) {
            return Err(AppError::invalid_bounds(min_size, max_size));
        }
        Ok(Self { min_size, max_size })
    }

    /// Clamp `size` into `[min_size, max_size]`.
    pub fn clamp(&self, size: f64) -> f64 {
        size.min(self.max_size).max(self.min_size)
    }

    pub fn contains(&self, size: f64) -> bool {
        size >= self.min_size && size <= self.max_size
    }
}

/// Outcome of one fitting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Fitted unit, or [`INSUFFICIENT_SIZE`] when nothing was fitted.
    pub best_size: f64,
    /// Winning step multipliers (empty when nothing was fitted).
    pub best_hypothesis: Hypothesis,
    /// Squared-residual cost of the winner (`+inf` when nothing was fitted).
    pub best_cost: f64,
}

impl FitResult {
    /// Sentinel result: fewer than two measurements, or no admissible hypothesis.
    pub fn insufficient() -> Self {
        Self {
            best_size: INSUFFICIENT_SIZE,
            best_hypothesis: Vec::new(),
            best_cost: f64::INFINITY,
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.best_hypothesis.is_empty() && self.best_size != INSUFFICIENT_SIZE
    }
}

/// A named measurement sequence, as produced by ingest or the synthetic generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSet {
    pub label: String,
    pub values: Vec<f64>,
}

impl MeasurementSet {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Synthetic stacked-plane sample settings (`boxfit demo`).
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// True unit size the planes are spaced by.
    pub unit: f64,
    /// Number of planes (measurements) to generate.
    pub planes: usize,
    /// Largest number of units skipped between consecutive planes.
    pub max_skip: u32,
    /// Gaussian noise standard deviation added to every measurement.
    pub noise: f64,
    /// Offset of the lowest plane.
    pub origin: f64,
    pub seed: u64,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub bounds: SizeBounds,
    pub policy: PolicySpec,
    /// Optional value to snap to the nearest measurement of each set.
    pub reference: Option<f64>,
    pub export_json: Option<PathBuf>,
    pub quiet: bool,
}
