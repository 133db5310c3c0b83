//! Core types for blockid.
//!
//! The classifier and extractor decode `.lang` lines into these; the joiner
//! and renderers consume them.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The two recognized catalog categories, derived from the line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Lines starting with `tile.`.
    Tile,
    /// Lines starting with `item.`.
    Item,
}

impl Category {
    /// The line prefix for this category, including the trailing dot.
    pub fn prefix(self) -> &'static str {
        match self {
            Category::Tile => "tile.",
            Category::Item => "item.",
        }
    }

    /// The bare category name, as it appears at the start of a rendered line.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tile => "tile",
            Category::Item => "item",
        }
    }

    /// Detects the category from a raw line, if any.
    pub fn of_line(line: &str) -> Option<Category> {
        if line.starts_with(Category::Tile.prefix()) {
            Some(Category::Tile)
        } else if line.starts_with(Category::Item.prefix()) {
            Some(Category::Item)
        } else {
            None
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A name-defining catalog entry extracted from a single `.lang` line.
///
/// The raw line is kept so that entries without metadata can degrade back
/// to verbatim passthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Lookup key into the metadata table (prefix and `.name` suffix stripped).
    pub key: String,
    /// The display name, i.e. everything after the last `=` on the line.
    pub display_name: String,
    /// Whether the line came from the `tile.` or `item.` scope.
    pub category: Category,
    /// The original line, untouched.
    pub raw: String,
}

/// Static metadata for one catalog key.
///
/// Supplied externally as JSON; read-only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct MetadataRecord {
    /// Java numeric block ID. IDs above 255 are item IDs and are not rendered.
    #[serde(rename = "id", skip_serializing_if = "Option::is_none", default)]
    pub numeric_id: Option<u32>,

    /// Damage/metadata value. `Some(0)` is meaningful and must render as `0`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub meta: Option<u32>,

    /// Namespaced path, optionally followed by `|` and a block-state suffix.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub namespace: Option<String>,

    /// Whether this block is represented by an item in the inventory
    /// (doors, crops, beds and the like).
    #[serde(rename = "isItem", default)]
    pub is_item_representation: bool,

    /// Whether this entry exists only on Bedrock and has no Java counterpart.
    #[serde(rename = "isBedrockOnly", default)]
    pub is_bedrock_only: bool,
}

/// A catalog entry joined with its metadata record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedEntry {
    /// Lookup key, preserved from the catalog entry.
    pub key: String,
    /// Display name, preserved from the catalog entry.
    pub display_name: String,
    /// True when the source line came from the `item.` scope.
    pub is_item: bool,
    /// The matched metadata record.
    pub record: MetadataRecord,
}

impl JoinedEntry {
    /// The category prefix a rendered line starts with.
    pub fn prefix(&self) -> &'static str {
        if self.is_item {
            Category::Item.as_str()
        } else {
            Category::Tile.as_str()
        }
    }
}
