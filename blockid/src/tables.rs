//! Static metadata and glyph tables.
//!
//! Both tables are plain JSON key-value documents, externally supplied and
//! read-only for the duration of a run. Built-in defaults are embedded so
//! the tool works out of the box; callers can load replacements from disk
//! through the [`Parser`](crate::traits::Parser) trait.

use std::{
    collections::HashMap,
    io::{BufRead, Write},
};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::{error::Error, traits::Parser, types::MetadataRecord};

lazy_static! {
    static ref BUILTIN_TILES: MetadataTable =
        serde_json::from_str(include_str!("../resources/tiles.json"))
            .expect("embedded tiles.json is valid");
    static ref BUILTIN_GLYPHS: GlyphTable =
        serde_json::from_str(include_str!("../resources/glyphs.json"))
            .expect("embedded glyphs.json is valid");
}

/// Mapping from catalog key to its [`MetadataRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MetadataTable {
    records: HashMap<String, MetadataRecord>,
}

impl MetadataTable {
    /// The built-in table shipped with the crate.
    pub fn builtin() -> &'static MetadataTable {
        &BUILTIN_TILES
    }

    /// Looks up a catalog key.
    pub fn get(&self, key: &str) -> Option<&MetadataRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(String, MetadataRecord)> for MetadataTable {
    fn from_iter<T: IntoIterator<Item = (String, MetadataRecord)>>(iter: T) -> Self {
        MetadataTable {
            records: iter.into_iter().collect(),
        }
    }
}

impl Parser for MetadataTable {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, self).map_err(Error::Parse)
    }
}

/// Mapping from symbolic annotation names (`error`, `id`, `namespace`,
/// `block_state`, plus arbitrary block-state identifiers) to short display
/// strings, typically private-use glyph characters from the pack font.
///
/// A missing key is a configuration error, not a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct GlyphTable {
    glyphs: HashMap<String, String>,
}

impl GlyphTable {
    /// The built-in table shipped with the crate, matching the pack font.
    pub fn builtin() -> &'static GlyphTable {
        &BUILTIN_GLYPHS
    }

    /// Resolves a symbolic name to its display glyph.
    ///
    /// Fails fast on unknown names so a broken table never leaks
    /// placeholder text into rendered output.
    pub fn glyph(&self, name: &str) -> Result<&str, Error> {
        self.glyphs
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::missing_glyph(name))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl FromIterator<(String, String)> for GlyphTable {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        GlyphTable {
            glyphs: iter.into_iter().collect(),
        }
    }
}

impl Parser for GlyphTable {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, self).map_err(Error::Parse)
    }
}
