//! Mathematical utilities: least squares through the origin.

pub mod regression;

pub use regression::*;
