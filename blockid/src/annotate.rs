//! Metadata joining and annotation rendering.
//!
//! Joins extracted catalog entries against the static metadata table and
//! produces the two annotated line variants: compact (`.p.lang`, Java IDs
//! and namespaces) and detailed (`.s.lang`, additionally block states).

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    error::Error,
    formats::lang::Format,
    tables::{GlyphTable, MetadataTable},
    types::{CatalogEntry, Category, JoinedEntry},
};

lazy_static! {
    // Block-state identifier tokens inside a namespace suffix, e.g. "$:powered".
    static ref STATE_TOKEN: Regex = Regex::new(r"\$:[a-z0-9_]+").unwrap();
}

/// Marker appended after the decorated primary path by the game's own
/// tooltips; the compact variant truncates from here on.
const DECORATION_MARKER: &str = "\u{a7}8[";

/// The two output variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Numeric ID and bare namespace only.
    Compact,
    /// Numeric ID, decorated namespace, and block states.
    Detailed,
}

/// The fully annotated contents of one `.lang` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotatedFile {
    /// Rendered compact lines, in original catalog order.
    pub compact: Vec<String>,
    /// Rendered detailed lines, in original catalog order.
    pub detailed: Vec<String>,
    /// Untouched lines, including entries that degraded to passthrough.
    pub other: Vec<String>,
    /// Keys of tile entries dropped for lack of metadata.
    pub dropped: Vec<String>,
}

impl AnnotatedFile {
    /// Assembles the compact output document: rendered catalog lines
    /// first, then the untouched lines, each trimmed of trailing
    /// whitespace.
    pub fn compact_document(&self) -> String {
        join_trimmed(&self.compact, &self.other)
    }

    /// Assembles the detailed output document.
    pub fn detailed_document(&self) -> String {
        join_trimmed(&self.detailed, &self.other)
    }
}

fn join_trimmed(rendered: &[String], other: &[String]) -> String {
    rendered
        .iter()
        .chain(other.iter())
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Joins a classified file against the metadata table and renders both
/// variants.
///
/// Item-scope entries without a metadata match degrade to untouched
/// passthrough; tile-scope entries without a match are dropped with a
/// warning. Matched entries are rendered once per variant.
pub fn annotate(
    format: &Format,
    tiles: &MetadataTable,
    glyphs: &GlyphTable,
) -> Result<AnnotatedFile, Error> {
    let mut out = AnnotatedFile {
        other: format.other.clone(),
        ..AnnotatedFile::default()
    };

    for entry in &format.catalog {
        let Some(joined) = join(entry, tiles) else {
            match entry.category {
                // Items without block metadata are assumed to be plain
                // inventory items, not an error.
                Category::Item => out.other.push(entry.raw.clone()),
                Category::Tile => {
                    warn!(key = %entry.key, "language file entry is unknown");
                    out.dropped.push(entry.key.clone());
                }
            }
            continue;
        };

        out.compact.push(render(&joined, glyphs, Variant::Compact)?);
        out.detailed
            .push(render(&joined, glyphs, Variant::Detailed)?);
    }

    Ok(out)
}

/// Looks up one catalog entry in the metadata table.
pub fn join(entry: &CatalogEntry, tiles: &MetadataTable) -> Option<JoinedEntry> {
    let record = tiles.get(&entry.key)?.clone();
    let is_item = entry.category == Category::Item;
    if record.is_item_representation != is_item {
        debug!(
            key = %entry.key,
            scope = %entry.category,
            "catalog scope disagrees with the table's isItem flag"
        );
    }
    Some(JoinedEntry {
        key: entry.key.clone(),
        display_name: entry.display_name.clone(),
        is_item,
        record,
    })
}

/// Renders one annotated line in the requested variant.
///
/// Output shape is `<tile|item>.<key>.name=<name>` followed by
/// space-separated annotation segments, with trailing whitespace
/// trimmed from the assembled line.
pub fn render(entry: &JoinedEntry, glyphs: &GlyphTable, variant: Variant) -> Result<String, Error> {
    let mut line = format!(
        "{}.{}.name={}",
        entry.prefix(),
        entry.key,
        clean_name(&entry.display_name)
    );

    for segment in segments(entry, glyphs, variant)? {
        line.push(' ');
        line.push_str(&segment);
    }

    Ok(line.trim_end().to_string())
}

fn segments(
    entry: &JoinedEntry,
    glyphs: &GlyphTable,
    variant: Variant,
) -> Result<Vec<String>, Error> {
    if entry.record.is_bedrock_only {
        // Identical in both variants, regardless of other fields.
        return Ok(vec![format!("{} Bedrock Exclusive", glyphs.glyph("error")?)]);
    }

    let mut segments = Vec::with_capacity(2);

    if let Some(segment) = id_segment(entry, glyphs)? {
        segments.push(segment);
    }
    segments.push(namespace_segment(entry, glyphs, variant)?);

    Ok(segments)
}

/// `<id-glyph> <id>:<meta>`, only for block-range IDs (<= 255).
///
/// `meta` renders by presence: an explicit 0 must show as `0`, only an
/// absent value falls back to the error glyph.
fn id_segment(entry: &JoinedEntry, glyphs: &GlyphTable) -> Result<Option<String>, Error> {
    let Some(id) = entry.record.numeric_id.filter(|&id| id <= 255) else {
        return Ok(None);
    };
    let meta = match entry.record.meta {
        Some(meta) => meta.to_string(),
        None => glyphs.glyph("error")?.to_string(),
    };
    Ok(Some(format!("{} {}:{}", glyphs.glyph("id")?, id, meta)))
}

fn namespace_segment(
    entry: &JoinedEntry,
    glyphs: &GlyphTable,
    variant: Variant,
) -> Result<String, Error> {
    let Some(namespace) = entry.record.namespace.as_deref() else {
        return Ok(format!("{} Unknown", glyphs.glyph("error")?));
    };

    let (primary, block_states) = match namespace.split_once('|') {
        Some((primary, states)) => (primary, Some(states)),
        None => (namespace, None),
    };

    let glyph = glyphs.glyph("namespace")?;
    match variant {
        Variant::Compact => {
            let primary = primary
                .split(DECORATION_MARKER)
                .next()
                .unwrap_or(primary)
                .trim();
            Ok(format!("{} {}", glyph, primary))
        }
        Variant::Detailed => {
            let mut segment = format!("{} {}", glyph, primary.trim());
            if let Some(states) = block_states.filter(|s| !s.is_empty()) {
                let states = substitute_state_tokens(states, glyphs)?;
                segment.push(' ');
                segment.push_str(glyphs.glyph("block_state")?);
                segment.push(' ');
                segment.push_str(states.trim());
            }
            Ok(segment)
        }
    }
}

/// Replaces every `$:identifier` token with its glyph-table lookup.
///
/// An identifier missing from the table is a configuration error and
/// fails the whole run rather than leaking placeholder text.
fn substitute_state_tokens(states: &str, glyphs: &GlyphTable) -> Result<String, Error> {
    let mut out = String::with_capacity(states.len());
    let mut last = 0;
    for token in STATE_TOKEN.find_iter(states) {
        out.push_str(&states[last..token.start()]);
        out.push_str(glyphs.glyph(&token.as_str()[2..])?);
        out.push(' ');
        last = token.end();
    }
    out.push_str(&states[last..]);
    Ok(out)
}

/// Strips one trailing `#` marker and surrounding whitespace from a
/// display name.
fn clean_name(display_name: &str) -> &str {
    display_name
        .strip_suffix('#')
        .unwrap_or(display_name)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetadataRecord;

    fn test_glyphs() -> GlyphTable {
        [
            ("id", "#"),
            ("namespace", "@"),
            ("block_state", ">"),
            ("error", "!"),
            ("flag", "F"),
            ("powered", "P"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn entry(record: MetadataRecord) -> JoinedEntry {
        JoinedEntry {
            key: "foo".to_string(),
            display_name: "Bar#".to_string(),
            is_item: false,
            record,
        }
    }

    #[test]
    fn test_render_conformance_example() {
        let joined = entry(MetadataRecord {
            numeric_id: Some(5),
            meta: Some(0),
            namespace: Some("ns|$:flag".to_string()),
            ..MetadataRecord::default()
        });
        let glyphs = test_glyphs();
        assert_eq!(
            render(&joined, &glyphs, Variant::Compact).unwrap(),
            "tile.foo.name=Bar # 5:0 @ ns"
        );
        assert_eq!(
            render(&joined, &glyphs, Variant::Detailed).unwrap(),
            "tile.foo.name=Bar # 5:0 @ ns > F"
        );
    }

    #[test]
    fn test_render_meta_zero_is_not_error_glyph() {
        let joined = entry(MetadataRecord {
            numeric_id: Some(5),
            meta: Some(0),
            namespace: Some("ns".to_string()),
            ..MetadataRecord::default()
        });
        let rendered = render(&joined, &test_glyphs(), Variant::Compact).unwrap();
        assert!(rendered.contains("5:0"));
        assert!(!rendered.contains("5:!"));
    }

    #[test]
    fn test_render_absent_meta_uses_error_glyph() {
        let joined = entry(MetadataRecord {
            numeric_id: Some(5),
            meta: None,
            namespace: Some("ns".to_string()),
            ..MetadataRecord::default()
        });
        let rendered = render(&joined, &test_glyphs(), Variant::Compact).unwrap();
        assert!(rendered.contains("5:!"));
    }

    #[test]
    fn test_render_high_id_omits_numeric_segment() {
        let joined = entry(MetadataRecord {
            numeric_id: Some(412),
            meta: Some(0),
            namespace: Some("minecraft:conduit".to_string()),
            ..MetadataRecord::default()
        });
        let rendered = render(&joined, &test_glyphs(), Variant::Compact).unwrap();
        assert_eq!(rendered, "tile.foo.name=Bar @ minecraft:conduit");
    }

    #[test]
    fn test_render_bedrock_only_identical_in_both_variants() {
        let joined = entry(MetadataRecord {
            numeric_id: Some(247),
            meta: Some(0),
            namespace: Some("ns|$:flag".to_string()),
            is_bedrock_only: true,
            ..MetadataRecord::default()
        });
        let glyphs = test_glyphs();
        let compact = render(&joined, &glyphs, Variant::Compact).unwrap();
        let detailed = render(&joined, &glyphs, Variant::Detailed).unwrap();
        assert_eq!(compact, detailed);
        assert_eq!(compact, "tile.foo.name=Bar ! Bedrock Exclusive");
    }

    #[test]
    fn test_render_missing_namespace_renders_unknown() {
        let joined = entry(MetadataRecord {
            numeric_id: Some(5),
            meta: Some(0),
            namespace: None,
            ..MetadataRecord::default()
        });
        let glyphs = test_glyphs();
        assert_eq!(
            render(&joined, &glyphs, Variant::Compact).unwrap(),
            "tile.foo.name=Bar # 5:0 ! Unknown"
        );
        assert_eq!(
            render(&joined, &glyphs, Variant::Detailed).unwrap(),
            "tile.foo.name=Bar # 5:0 ! Unknown"
        );
    }

    #[test]
    fn test_compact_truncates_decorated_primary() {
        let joined = entry(MetadataRecord {
            namespace: Some("minecraft:stone \u{a7}8[granite]|$:flag".to_string()),
            ..MetadataRecord::default()
        });
        let glyphs = test_glyphs();
        assert_eq!(
            render(&joined, &glyphs, Variant::Compact).unwrap(),
            "tile.foo.name=Bar @ minecraft:stone"
        );
        // The detailed variant keeps the decoration.
        assert_eq!(
            render(&joined, &glyphs, Variant::Detailed).unwrap(),
            "tile.foo.name=Bar @ minecraft:stone \u{a7}8[granite] > F"
        );
    }

    #[test]
    fn test_substitute_state_tokens_multiple() {
        let glyphs = test_glyphs();
        let result = substitute_state_tokens("$:flag $:powered", &glyphs).unwrap();
        assert_eq!(result, "F  P ");
    }

    #[test]
    fn test_substitute_state_tokens_missing_glyph_fails() {
        let glyphs = test_glyphs();
        let err = substitute_state_tokens("$:unmapped", &glyphs).unwrap_err();
        assert!(matches!(err, Error::MissingGlyph(name) if name == "unmapped"));
    }

    #[test]
    fn test_clean_name_strips_single_trailing_marker() {
        assert_eq!(clean_name("Bar#"), "Bar");
        assert_eq!(clean_name("Bar##"), "Bar#");
        assert_eq!(clean_name("  Bar  "), "Bar");
        assert_eq!(clean_name("Bar"), "Bar");
    }

    #[test]
    fn test_item_prefix_follows_line_scope() {
        let joined = JoinedEntry {
            key: "bed".to_string(),
            display_name: "Bed".to_string(),
            is_item: true,
            record: MetadataRecord {
                numeric_id: Some(26),
                namespace: Some("minecraft:bed".to_string()),
                is_item_representation: true,
                ..MetadataRecord::default()
            },
        };
        let rendered = render(&joined, &test_glyphs(), Variant::Compact).unwrap();
        assert!(rendered.starts_with("item.bed.name=Bed"));
    }
}
