//! Command-line parsing for the box size fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! search code. Numeric options can also come from `BOXFIT_*` environment
//! variables (a `.env` file is loaded before parsing).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::PolicySpec;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "boxfit", version, about = "Fit a common box size to stacked-plane measurements")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit measurements given inline or in a CSV file.
    Fit(FitArgs),
    /// Generate a synthetic stack with a known unit and fit it.
    Demo(DemoArgs),
}

/// Options shared by every fitting subcommand.
#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    /// Smallest admissible box size.
    #[arg(long, env = "BOXFIT_MIN_SIZE")]
    pub min_size: f64,

    /// Largest admissible box size.
    #[arg(long, env = "BOXFIT_MAX_SIZE")]
    pub max_size: f64,

    /// Step window policy (local, global, or both side by side).
    #[arg(long, value_enum, env = "BOXFIT_POLICY", default_value_t = PolicySpec::Local)]
    pub policy: PolicySpec,

    /// Report the measurement closest to this value for each set.
    #[arg(long)]
    pub reference: Option<f64>,

    /// Export the full report to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Do not print the terminal summary.
    #[arg(long)]
    pub quiet: bool,
}

/// `boxfit fit`
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Measurements (any order). Ignored when `--csv` is given.
    #[arg(value_name = "VALUE", allow_negative_numbers = true)]
    pub values: Vec<f64>,

    /// Read measurements from a CSV file instead.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// CSV column holding the measurements.
    #[arg(long, default_value = crate::io::ingest::DEFAULT_VALUE_COLUMN)]
    pub column: String,

    /// CSV column grouping rows into independent sets.
    #[arg(long)]
    pub set_column: Option<String>,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// `boxfit demo`
#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// True unit size of the synthetic stack.
    #[arg(long, default_value_t = 330.0)]
    pub unit: f64,

    /// Number of planes.
    #[arg(long, default_value_t = 4)]
    pub planes: usize,

    /// Largest number of units between consecutive planes.
    #[arg(long, default_value_t = 1)]
    pub max_skip: u32,

    /// Gaussian noise standard deviation.
    #[arg(long, default_value_t = 2.0)]
    pub noise: f64,

    /// Position of the lowest plane.
    #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true)]
    pub origin: f64,

    /// Random seed.
    #[arg(long, env = "BOXFIT_SEED", default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub search: SearchArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inline_fit() {
        let cli = Cli::try_parse_from([
            "boxfit", "fit", "100", "500", "--min-size", "100", "--max-size", "600", "--policy", "both",
        ])
        .unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.values, vec![100.0, 500.0]);
        assert_eq!(args.search.policy, PolicySpec::Both);
        assert_eq!(args.column, "value");
    }

    #[test]
    fn demo_has_defaults() {
        let cli = Cli::try_parse_from(["boxfit", "demo", "--min-size", "250", "--max-size", "600"]).unwrap();
        let Command::Demo(args) = cli.command else {
            panic!("expected demo");
        };
        assert_eq!(args.planes, 4);
        assert_eq!(args.search.policy, PolicySpec::Local);
    }
}
