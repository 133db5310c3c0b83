//! Support for Minecraft Bedrock `.lang` resource files.
//!
//! Splits a file into catalog lines (`tile.` / `item.` scope) and everything
//! else, and extracts lookup keys from the name-defining catalog lines.

use std::io::{BufRead, Read, Write};

use crate::{
    error::Error,
    traits::Parser,
    types::{CatalogEntry, Category},
};

/// A classified Bedrock `.lang` file.
///
/// `catalog` holds the name-defining entries in original order; `other`
/// holds every remaining line verbatim, also in original order. Catalog
/// lines that fail name extraction are reclassified into `other` after
/// the lines the classifier put there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// Name-defining catalog entries, in original relative order.
    pub catalog: Vec<CatalogEntry>,
    /// All other lines, verbatim, in original relative order.
    pub other: Vec<String>,
}

/// Partitions raw file content into catalog lines and other lines.
///
/// A line is a catalog line iff it starts with the literal `tile.` or
/// `item.` prefix; everything else, including blank lines, is other.
/// Both `\n` and `\r\n` terminators are accepted. Pure function; order
/// within each partition matches the original file.
pub fn classify(content: &str) -> (Vec<&str>, Vec<&str>) {
    let mut catalog = Vec::new();
    let mut other = Vec::new();

    for line in content.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if Category::of_line(line).is_some() {
            catalog.push(line);
        } else {
            other.push(line);
        }
    }

    (catalog, other)
}

/// Extracts a [`CatalogEntry`] from a catalog line, or `None` when the
/// line is not a name-defining entry and must pass through unchanged.
///
/// The display name is everything after the *last* `=` on the line, so
/// values containing `=` stay intact. The key is the line minus its
/// category prefix and minus everything from the first `.name` onward.
/// If the candidate key still carries a `segment.rest=value` shape, the
/// line denotes a non-name property of an entry (e.g. a state message)
/// and is rejected.
pub fn extract(line: &str) -> Option<CatalogEntry> {
    let category = Category::of_line(line)?;

    let display_name = match line.rfind('=') {
        Some(pos) => &line[pos + 1..],
        None => line,
    };

    let stripped = &line[category.prefix().len()..];
    let key = match stripped.find(".name") {
        Some(pos) => &stripped[..pos],
        None => stripped,
    };

    if is_non_name_property(key) {
        return None;
    }

    Some(CatalogEntry {
        key: key.to_string(),
        display_name: display_name.to_string(),
        category,
        raw: line.to_string(),
    })
}

/// True when the candidate key still looks like `segment.moretext=value`:
/// a `.`, at least one character, an `=`, and at least one character to
/// the end of the string.
///
/// A key containing dots but no such assignment shape (compound block
/// state keys, for instance) is a valid key.
fn is_non_name_property(key: &str) -> bool {
    let Some(dot) = key.find('.') else {
        return false;
    };
    key[dot + 1..]
        .match_indices('=')
        .any(|(i, _)| i >= 1 && dot + 1 + i + 1 < key.len())
}

impl Parser for Format {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Format::from_content(&content))
    }

    /// Writes the file back out, catalog lines first, then other lines.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let lines: Vec<&str> = self
            .catalog
            .iter()
            .map(|entry| entry.raw.as_str())
            .chain(self.other.iter().map(String::as_str))
            .collect();
        writer
            .write_all(lines.join("\n").as_bytes())
            .map_err(Error::Io)
    }
}

impl Format {
    /// Classifies and extracts in one pass over raw file content.
    pub fn from_content(content: &str) -> Self {
        let (catalog_lines, other_lines) = classify(content);

        let mut other: Vec<String> = other_lines.iter().map(|s| s.to_string()).collect();
        let mut catalog = Vec::with_capacity(catalog_lines.len());

        for line in catalog_lines {
            match extract(line) {
                Some(entry) => catalog.push(entry),
                None => other.push(line.to_string()),
            }
        }

        Format { catalog, other }
    }
}
