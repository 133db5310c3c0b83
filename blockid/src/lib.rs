#![forbid(unsafe_code)]
//! Annotates Minecraft Bedrock `.lang` files with Java numeric IDs,
//! namespaces, and block states.
//!
//! The library splits each file into catalog lines (`tile.` / `item.`
//! scope) and passthrough lines, joins the catalog entries against a
//! static metadata table, and renders two annotated variants per file:
//! compact (IDs and namespaces) and detailed (additionally block states).
//! It also generates the resource pack manifest and language index
//! artifacts that the CLI bundles into an `.mcpack`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use blockid::{annotate, formats::LangFormat, tables::{GlyphTable, MetadataTable}, traits::Parser};
//!
//! let format = LangFormat::read_from("en_US.lang")?;
//! let annotated = annotate::annotate(&format, MetadataTable::builtin(), GlyphTable::builtin())?;
//! std::fs::write("en_US.p.lang", annotated.compact_document())?;
//! std::fs::write("en_US.s.lang", annotated.detailed_document())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod annotate;
pub mod error;
pub mod formats;
pub mod pack;
pub mod tables;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    annotate::{AnnotatedFile, Variant},
    error::Error,
    formats::LangFormat,
    pack::{LanguageSet, Manifest, PackVersion},
    tables::{GlyphTable, MetadataTable},
    types::{CatalogEntry, Category, JoinedEntry, MetadataRecord},
};
