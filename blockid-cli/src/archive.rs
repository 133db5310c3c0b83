//! Zip bundling of the finished pack directory into an `.mcpack`.

use std::{error::Error, fs::File, io, path::Path};

use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Zips `source` into `dest`, placing every entry under `root` inside
/// the archive (the game expects the pack folder itself at the top
/// level of an `.mcpack`).
pub fn zip_directory(source: &Path, dest: &Path, root: &str) -> Result<(), Box<dyn Error>> {
    let file = File::create(dest)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source)?;
        if relative.as_os_str().is_empty() {
            continue;
        }
        let name = format!("{}/{}", root, relative.to_string_lossy().replace('\\', "/"));

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else {
            zip.start_file(name, options)?;
            let mut reader = File::open(entry.path())?;
            io::copy(&mut reader, &mut zip)?;
        }
    }

    zip.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_zip_directory_contains_all_entries() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("pack");
        fs::create_dir_all(source.join("texts")).unwrap();
        fs::write(source.join("manifest.json"), "{}").unwrap();
        fs::write(source.join("texts/en_US.p.lang"), "tile.stone.name=Stone").unwrap();

        let dest = dir.path().join("pack.mcpack");
        zip_directory(&source, &dest, "My Pack").unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains(&"My Pack/manifest.json".to_string()));
        assert!(names.contains(&"My Pack/texts/en_US.p.lang".to_string()));
    }
}
