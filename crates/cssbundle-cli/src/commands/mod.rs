//! Command implementations.
//!
//! - [`build`] - Compile the fixed entry point into the output bundle

pub mod build;

pub use build::{run, run_with};
