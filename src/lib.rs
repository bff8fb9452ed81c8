//! `boxfit` library crate.
//!
//! Estimates the common unit ("box size") behind a handful of stacked-plane
//! measurements by exhaustive search over integer step assignments.
//!
//! The binary (`boxfit`) is a thin wrapper around this library so that:
//!
//! - the search is testable without spawning processes
//! - other front-ends can call [`fit::fit_box_size`] directly

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod report;
