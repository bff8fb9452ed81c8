//! Input/output helpers.
//!
//! - CSV / inline measurement ingest (`ingest`)
//! - JSON report export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
