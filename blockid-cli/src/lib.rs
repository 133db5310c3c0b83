//! CLI library, exposed for integration testing.

pub mod archive;
pub mod build;

pub use build::{BuildOptions, run_build, run_convert};
