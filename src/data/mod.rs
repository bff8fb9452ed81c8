//! Measurement sources that do not come from a file.

pub mod synth;

pub use synth::*;
