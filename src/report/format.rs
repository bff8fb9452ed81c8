//! Formatted terminal output for fit runs.
//!
//! We keep formatting code in one place so:
//! - the search code stays free of presentation concerns
//! - output changes are localized

use crate::app::pipeline::{RunOutput, SetOutcome};
use crate::domain::{FitConfig, FitResult};
use crate::fit::search::FitReport;
use crate::io::ingest::IngestedData;

/// Format the full run summary (ingest stats + one block per set).
pub fn format_run_summary(run: &RunOutput, config: &FitConfig) -> String {
    let mut out = String::new();

    out.push_str("=== boxfit - box size fit ===\n");
    out.push_str(&format!(
        "Bounds: [{}, {}] | policy: {:?}\n",
        config.bounds.min_size, config.bounds.max_size, config.policy
    ));
    out.push_str(&format_ingest(&run.ingest));

    for outcome in &run.outcomes {
        out.push('\n');
        out.push_str(&format_outcome(outcome));
    }

    out
}

fn format_ingest(ingest: &IngestedData) -> String {
    let mut out = format!(
        "Input: sets={} | rows read={} used={} skipped={}\n",
        ingest.sets.len(),
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    );
    for err in ingest.row_errors.iter().take(10) {
        out.push_str(&format!("  line {}: {}\n", err.line, err.message));
    }
    if ingest.row_errors.len() > 10 {
        out.push_str(&format!("  ... {} more\n", ingest.row_errors.len() - 10));
    }
    out
}

/// Format one measurement set and its fits.
pub fn format_outcome(outcome: &SetOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("Set: {} (n={})\n", outcome.label, outcome.measurements.len()));
    if let Some(closest) = outcome.closest {
        out.push_str(&format!("  closest to reference: {closest:.3}\n"));
    }
    for fit in &outcome.fits {
        out.push_str(&format_fit_line(fit));
        out.push('\n');
    }
    out
}

/// Single-line summary of a fit, e.g. `local  size=400.000 cost=0.000 steps=[0, 1]`.
pub fn format_fit_line(fit: &FitReport) -> String {
    let policy = fit.policy.display_name();
    let mut line = format!("  {policy:<7} {}", format_result(&fit.result));
    line.push_str(&format!(
        " | evaluated={} degenerate={} ties={}",
        fit.stats.evaluated, fit.stats.degenerate, fit.stats.tie_breaks
    ));
    if fit.stats.window_flagged {
        line.push_str(" (unusual step window)");
    }
    line
}

fn format_result(result: &FitResult) -> String {
    if !result.is_fitted() {
        return "no fit".to_string();
    }
    format!(
        "size={:.3} cost={:.3} steps={}",
        result.best_size,
        result.best_cost,
        fmt_steps(&result.best_hypothesis)
    )
}

fn fmt_steps(v: &[i64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
