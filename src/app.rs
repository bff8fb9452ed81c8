//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs logging
//! - parses CLI arguments
//! - ingests or generates measurements
//! - runs the fit pipeline
//! - prints the summary and writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{Command, DemoArgs, FitArgs, SearchArgs};
use crate::domain::{FitConfig, SizeBounds, SynthConfig};
use crate::error::AppError;
use crate::io::ingest::{CsvLayout, IngestedData};

pub mod pipeline;

/// Entry point for the `boxfit` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn init_logging() {
    // Warnings (e.g. unusual step windows) are shown unless RUST_LOG says otherwise.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args.search)?;

    let ingest = match &args.csv {
        Some(path) => {
            let layout = CsvLayout {
                value_column: args.column.clone(),
                set_column: args.set_column.clone(),
            };
            crate::io::ingest::load_measurements(path, &layout)?
        }
        None => {
            if args.values.is_empty() {
                return Err(AppError::new(2, "No measurements given (pass values or --csv)."));
            }
            crate::io::ingest::from_values("inline", &args.values)
        }
    };

    run_and_report(ingest, &config)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args.search)?;
    let synth = SynthConfig {
        unit: args.unit,
        planes: args.planes,
        max_skip: args.max_skip,
        noise: args.noise,
        origin: args.origin,
        seed: args.seed,
    };
    let stack = crate::data::synth::generate_stack(&synth)?;
    info!(unit = stack.unit, true_steps = ?stack.true_steps, "generated synthetic stack");
    if !config.quiet {
        println!("True unit: {} | true steps: {:?}", stack.unit, stack.true_steps);
    }

    let ingest = crate::io::ingest::from_values(&stack.set.label, &stack.set.values);
    run_and_report(ingest, &config)
}

fn run_and_report(ingest: IngestedData, config: &FitConfig) -> Result<(), AppError> {
    let run = pipeline::run_fit(ingest, config)?;

    if !config.quiet {
        println!("{}", crate::report::format_run_summary(&run, config));
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_report_json(path, &config.bounds, &run.outcomes)?;
        info!(path = %path.display(), "wrote JSON report");
    }
    Ok(())
}

pub fn fit_config_from_args(args: &SearchArgs) -> Result<FitConfig, AppError> {
    Ok(FitConfig {
        bounds: SizeBounds::new(args.min_size, args.max_size)?,
        policy: args.policy,
        reference: args.reference,
        export_json: args.export_json.clone(),
        quiet: args.quiet,
    })
}
