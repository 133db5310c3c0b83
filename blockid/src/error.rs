//! All error types for the blockid crate.
//!
//! These are returned from all fallible operations (parsing, table loading,
//! rendering, manifest generation).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing glyph `{0}` in glyph table")]
    MissingGlyph(String),

    #[error("invalid pack version `{0}`: expected `major.minor.patch`")]
    InvalidVersion(String),

    #[error("invalid data: {0}")]
    DataMismatch(String),
}

impl Error {
    /// Creates a missing-glyph error for the given symbolic name.
    pub fn missing_glyph(name: impl Into<String>) -> Self {
        Error::MissingGlyph(name.into())
    }
}
