//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - configuration enums (`BoundPolicy`, `PolicySpec`)
//! - validated size bounds (`SizeBounds`)
//! - measurement inputs (`MeasurementSet`) and fit outputs (`FitResult`)

pub mod types;

pub use types::*;
