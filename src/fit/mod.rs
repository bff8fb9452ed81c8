//! Box size fitting.
//!
//! Responsibilities:
//!
//! - normalize measurements (`preprocess`)
//! - derive step windows per bound policy (`bounds`)
//! - enumerate hypotheses depth-first and drive the fit (`search`)
//! - score complete hypotheses (`cost`)
//! - keep the best one with the divisibility tie-break (`selection`)

pub mod bounds;
pub mod cost;
pub mod preprocess;
pub mod search;
pub mod selection;

pub use bounds::*;
pub use cost::*;
pub use preprocess::*;
pub use search::*;
pub use selection::*;
