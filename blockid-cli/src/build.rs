//! The pack build pipeline: directory setup, asset copying, manifest
//! stamping, per-file annotation, language index generation, and
//! archiving.

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use tracing::{info, warn};
use walkdir::WalkDir;

use blockid::{
    LanguageSet, Manifest, PackVersion,
    annotate::{AnnotatedFile, annotate},
    formats::LangFormat,
    tables::{GlyphTable, MetadataTable},
    traits::Parser,
};

use crate::archive;

/// Options for a full pack build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory tree of input `.lang` files.
    pub input: PathBuf,
    /// Output directory; removed and recreated on every run.
    pub output: PathBuf,
    /// Pack name; defaults to `BlockID v<version>`.
    pub name: Option<String>,
    /// External metadata table, overriding the built-in one.
    pub tiles: Option<PathBuf>,
    /// External glyph table, overriding the built-in one.
    pub glyphs: Option<PathBuf>,
    /// Static assets (font, pack_icon.png) copied into the pack root.
    pub assets: Option<PathBuf>,
    /// Whether to bundle the pack directory into an `.mcpack`.
    pub archive: bool,
}

fn load_tables(
    tiles: Option<&Path>,
    glyphs: Option<&Path>,
) -> Result<(MetadataTable, GlyphTable), blockid::Error> {
    let tiles = match tiles {
        Some(path) => MetadataTable::read_from(path)?,
        None => MetadataTable::builtin().clone(),
    };
    let glyphs = match glyphs {
        Some(path) => GlyphTable::read_from(path)?,
        None => GlyphTable::builtin().clone(),
    };
    Ok((tiles, glyphs))
}

/// Annotates one `.lang` file and writes the `.p.lang` / `.s.lang` pair
/// into `texts_dir`, recording the basename in the accumulator.
fn process_lang_file(
    path: &Path,
    texts_dir: &Path,
    tiles: &MetadataTable,
    glyphs: &GlyphTable,
    languages: &mut LanguageSet,
) -> Result<AnnotatedFile, Box<dyn Error>> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("input file {} has no usable basename", path.display()))?;

    let format = LangFormat::read_from(path)?;
    let annotated = annotate(&format, tiles, glyphs)?;

    fs::write(
        texts_dir.join(format!("{stem}.p.lang")),
        annotated.compact_document(),
    )?;
    fs::write(
        texts_dir.join(format!("{stem}.s.lang")),
        annotated.detailed_document(),
    )?;

    languages.record(stem);
    info!("compiled {stem}.p.lang, {stem}.s.lang");

    Ok(annotated)
}

/// Recursively discovers `.lang` files, sorted for deterministic
/// processing order.
fn discover_lang_files(input: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some("lang") {
            files.push(entry.path().to_path_buf());
        } else {
            warn!(path = %entry.path().display(), "skipping non-.lang file");
        }
    }
    Ok(files)
}

fn copy_assets(assets: &Path, pack_dir: &Path) -> Result<(), Box<dyn Error>> {
    for entry in WalkDir::new(assets) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(assets)?;
        let target = pack_dir.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Runs the full build pipeline and returns the pack directory path.
pub fn run_build(options: &BuildOptions) -> Result<PathBuf, Box<dyn Error>> {
    let (tiles, glyphs) = load_tables(options.tiles.as_deref(), options.glyphs.as_deref())?;

    let version = PackVersion::current();
    let pack_name = options
        .name
        .clone()
        .unwrap_or_else(|| format!("BlockID v{version}"));

    // Always start on a clean output folder.
    if options.output.exists() {
        fs::remove_dir_all(&options.output)?;
    }
    let pack_dir = options.output.join(&pack_name);
    let texts_dir = pack_dir.join("texts");
    fs::create_dir_all(&texts_dir)?;

    if let Some(assets) = &options.assets {
        copy_assets(assets, &pack_dir)?;
    }

    let manifest = Manifest::resource_pack(
        &pack_name,
        "Shows Java IDs, namespaces and block states in item names",
        version,
    );
    blockid::pack::write_json_pretty(&manifest, pack_dir.join("manifest.json"))?;

    let mut languages = LanguageSet::new();
    for path in discover_lang_files(&options.input)? {
        process_lang_file(&path, &texts_dir, &tiles, &glyphs, &mut languages)?;
    }

    if languages.is_empty() {
        warn!(input = %options.input.display(), "no .lang files found in input directory");
    }

    blockid::pack::write_json_pretty(&languages.codes(), texts_dir.join("languages.json"))?;
    blockid::pack::write_json_pretty(
        &languages.names(version),
        texts_dir.join("language_names.json"),
    )?;

    if options.archive {
        let archive_path = options.output.join(format!("{pack_name}.mcpack"));
        archive::zip_directory(&pack_dir, &archive_path, &pack_name)?;
        info!(path = %archive_path.display(), "wrote pack archive");
    }

    Ok(pack_dir)
}

/// Annotates a single `.lang` file into `output_dir`, without any pack
/// scaffolding. Returns the language accumulator for the caller to merge.
pub fn run_convert(
    input: &Path,
    output_dir: &Path,
    tiles: Option<&Path>,
    glyphs: Option<&Path>,
) -> Result<LanguageSet, Box<dyn Error>> {
    let (tiles, glyphs) = load_tables(tiles, glyphs)?;
    fs::create_dir_all(output_dir)?;

    let mut languages = LanguageSet::new();
    process_lang_file(input, output_dir, &tiles, &glyphs, &mut languages)?;
    Ok(languages)
}
