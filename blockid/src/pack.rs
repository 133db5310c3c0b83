//! Bedrock resource pack metadata: the `manifest.json` document and the
//! language index artifacts (`languages.json`, `language_names.json`).

use std::{path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::warn;
use unic_langid::LanguageIdentifier;
use uuid::Uuid;

use crate::error::Error;

/// A `major.minor.patch` pack version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PackVersion([u32; 3]);

impl PackVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        PackVersion([major, minor, patch])
    }

    /// The crate's own version, the default for generated packs.
    pub fn current() -> Self {
        // CARGO_PKG_VERSION always parses; a broken triple is a build
        // configuration defect caught by the tests.
        PackVersion::from_str(env!("CARGO_PKG_VERSION")).unwrap_or(PackVersion([0, 0, 0]))
    }
}

impl FromStr for PackVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidVersion(s.to_string()))?;
        match parts.as_slice() {
            [major, minor, patch] => Ok(PackVersion([*major, *minor, *patch])),
            _ => Err(Error::InvalidVersion(s.to_string())),
        }
    }
}

impl std::fmt::Display for PackVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [major, minor, patch] = self.0;
        write!(f, "{}.{}.{}", major, minor, patch)
    }
}

/// A Bedrock pack `manifest.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Manifest {
    pub format_version: u32,
    pub header: ManifestHeader,
    pub modules: Vec<ManifestModule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ManifestHeader {
    pub name: String,
    pub description: String,
    pub uuid: Uuid,
    pub version: PackVersion,
    pub min_engine_version: [u32; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ManifestModule {
    #[serde(rename = "type")]
    pub module_type: String,
    pub description: String,
    pub uuid: Uuid,
    pub version: PackVersion,
}

impl Manifest {
    /// Builds a resource pack manifest with freshly generated UUIDs.
    ///
    /// The UUIDs are the one intentionally non-deterministic output of
    /// a run; everything else is reproducible.
    pub fn resource_pack(name: &str, description: &str, version: PackVersion) -> Self {
        Manifest {
            format_version: 2,
            header: ManifestHeader {
                name: name.to_string(),
                description: description.to_string(),
                uuid: Uuid::new_v4(),
                version,
                min_engine_version: [1, 16, 0],
            },
            modules: vec![ManifestModule {
                module_type: "resources".to_string(),
                description: description.to_string(),
                uuid: Uuid::new_v4(),
                version,
            }],
        }
    }
}

/// Accumulator for the basenames of processed language files.
///
/// Each file-processing invocation records into an accumulator that the
/// caller owns and merges, in file-processing order; there is no global
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageSet {
    stems: Vec<String>,
}

impl LanguageSet {
    pub fn new() -> Self {
        LanguageSet::default()
    }

    /// Records one processed file basename (`en_US` for `en_US.lang`).
    ///
    /// Stems that do not look like locale codes are still recorded, but
    /// warned about: the game will list them even if it cannot match
    /// them to a locale.
    pub fn record(&mut self, stem: &str) {
        if stem.replace('_', "-").parse::<LanguageIdentifier>().is_err() {
            warn!(stem, "file basename is not a recognizable locale code");
        }
        self.stems.push(stem.to_string());
    }

    /// Appends another accumulator, preserving its internal order.
    pub fn merge(&mut self, other: LanguageSet) {
        self.stems.extend(other.stems);
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }

    /// The `languages.json` artifact: every registered variant code, the
    /// detailed (`.s`) one first per stem.
    pub fn codes(&self) -> Vec<String> {
        self.stems
            .iter()
            .flat_map(|stem| [format!("{stem}.s"), format!("{stem}.p")])
            .collect()
    }

    /// The `language_names.json` artifact: `[code, decorated label]`
    /// pairs describing what each variant adds.
    pub fn names(&self, version: PackVersion) -> Vec<(String, String)> {
        self.stems
            .iter()
            .flat_map(|stem| {
                [
                    (
                        format!("{stem}.s"),
                        format!(
                            "\u{a7}a[{stem}]\u{a7}f v{version} Modified to show Java IDs & Namespaces as well as some block states"
                        ),
                    ),
                    (
                        format!("{stem}.p"),
                        format!(
                            "\u{a7}a[{stem}]\u{a7}f v{version} Modified to show Java IDs & Namespaces"
                        ),
                    ),
                ]
            })
            .collect()
    }
}

/// Writes any serializable value as pretty-printed JSON, the way every
/// pack artifact is stamped.
pub fn write_json_pretty<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<(), Error> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value).map_err(Error::Parse)
}
