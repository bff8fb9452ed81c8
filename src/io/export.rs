//! Export fit reports to JSON.
//!
//! The export is meant to be easy to consume from scripts: one object per
//! measurement set, each with one entry per bound policy. Non-finite costs
//! (nothing fitted) are written as `null`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::app::pipeline::SetOutcome;
use crate::domain::SizeBounds;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ExportFile<'a> {
    tool: &'static str,
    version: &'static str,
    bounds: SizeBounds,
    sets: &'a [SetOutcome],
}

/// Write all outcomes of a run as pretty-printed JSON.
pub fn write_report_json(path: &Path, bounds: &SizeBounds, outcomes: &[SetOutcome]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create JSON export '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, bounds, outcomes)?;
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to write JSON export: {e}")))
}

/// Serialize outcomes to any writer.
pub fn write_report<W: Write>(writer: W, bounds: &SizeBounds, outcomes: &[SetOutcome]) -> Result<(), AppError> {
    let export = ExportFile {
        tool: "boxfit",
        version: env!("CARGO_PKG_VERSION"),
        bounds: *bounds,
        sets: outcomes,
    };
    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| AppError::io(format!("Failed to write JSON export: {e}")))
}
