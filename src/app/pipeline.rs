//! Shared "fit pipeline" logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> per-set fits (one per requested policy) -> nearest-measurement lookup
//!
//! Each fit owns its own worklist and selector, so sets are fitted in parallel
//! without coordination. Results come back in input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::domain::{FitConfig, MeasurementSet};
use crate::error::AppError;
use crate::fit::preprocess::closest_measurement;
use crate::fit::search::{FitReport, fit_with_report};
use crate::io::ingest::IngestedData;

/// Everything computed for one measurement set.
#[derive(Debug, Clone, Serialize)]
pub struct SetOutcome {
    pub label: String,
    /// Measurements as supplied (unsorted).
    pub measurements: Vec<f64>,
    /// Measurement nearest to the configured reference, if any.
    pub closest: Option<f64>,
    /// One report per requested policy, in `PolicySpec::policies()` order.
    pub fits: Vec<FitReport>,
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub outcomes: Vec<SetOutcome>,
}

/// Fit every set of `ingest` according to `config`.
pub fn run_fit(ingest: IngestedData, config: &FitConfig) -> Result<RunOutput, AppError> {
    let outcomes = fit_sets(&ingest.sets, config)?;
    Ok(RunOutput { ingest, outcomes })
}

/// Fit each set with each requested policy (sets in parallel).
pub fn fit_sets(sets: &[MeasurementSet], config: &FitConfig) -> Result<Vec<SetOutcome>, AppError> {
    let policies = config.policy.policies();
    sets.par_iter()
        .map(|set| -> Result<SetOutcome, AppError> {
            let fits = policies
                .iter()
                .map(|&policy| fit_with_report(&set.values, &config.bounds, policy))
                .collect::<Result<Vec<_>, _>>()?;
            let closest = config
                .reference
                .and_then(|target| closest_measurement(&set.values, target));
            Ok(SetOutcome {
                label: set.label.clone(),
                measurements: set.values.clone(),
                closest,
                fits,
            })
        })
        .collect()
}
