//! Supported resource file formats.
//!
//! Bedrock `.lang` is the only input format; the module keeps the
//! per-format layout so the [`Parser`](crate::traits::Parser) machinery
//! stays format-agnostic.

pub mod lang;

pub use lang::Format as LangFormat;
