use std::fs;

use assert_cmd::Command;
use tempfile::TempDir;

fn write_tables(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let tiles = dir.path().join("tiles.json");
    let glyphs = dir.path().join("glyphs.json");
    fs::write(
        &tiles,
        r#"{"foo": {"id": 5, "meta": 0, "namespace": "ns|$:flag"}}"#,
    )
    .unwrap();
    fs::write(
        &glyphs,
        r##"{"id": "#", "namespace": "@", "block_state": ">", "error": "!", "flag": "F"}"##,
    )
    .unwrap();
    (tiles, glyphs)
}

#[test]
fn test_convert_writes_both_variants() {
    let dir = TempDir::new().unwrap();
    let (tiles, glyphs) = write_tables(&dir);

    let input = dir.path().join("en_US.lang");
    fs::write(&input, "tile.foo.name=Bar#\nmenu.play=Play").unwrap();
    let out = dir.path().join("out");

    Command::cargo_bin("blockid")
        .unwrap()
        .args(["convert", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .arg("--tiles")
        .arg(&tiles)
        .arg("--glyphs")
        .arg(&glyphs)
        .assert()
        .success();

    let compact = fs::read_to_string(out.join("en_US.p.lang")).unwrap();
    assert_eq!(compact, "tile.foo.name=Bar # 5:0 @ ns\nmenu.play=Play");

    let detailed = fs::read_to_string(out.join("en_US.s.lang")).unwrap();
    assert_eq!(detailed, "tile.foo.name=Bar # 5:0 @ ns > F\nmenu.play=Play");
}

#[test]
fn test_convert_fails_on_missing_input() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("blockid")
        .unwrap()
        .args(["convert", "--input"])
        .arg(dir.path().join("nope.lang"))
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .failure();
}

#[test]
fn test_build_produces_pack_layout_and_archive() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("en_US.lang"), "tile.stone.name=Stone").unwrap();
    fs::write(input.join("de_DE.lang"), "tile.stone.name=Stein").unwrap();

    let output = dir.path().join("output");

    Command::cargo_bin("blockid")
        .unwrap()
        .args(["build", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--name", "Test Pack"])
        .assert()
        .success();

    let pack = output.join("Test Pack");
    assert!(pack.join("manifest.json").is_file());
    assert!(pack.join("texts/en_US.p.lang").is_file());
    assert!(pack.join("texts/en_US.s.lang").is_file());
    assert!(pack.join("texts/de_DE.p.lang").is_file());
    assert!(output.join("Test Pack.mcpack").is_file());

    // Both variants of both locales are indexed, deterministically ordered.
    let codes: Vec<String> =
        serde_json::from_str(&fs::read_to_string(pack.join("texts/languages.json")).unwrap())
            .unwrap();
    assert_eq!(codes, vec!["de_DE.s", "de_DE.p", "en_US.s", "en_US.p"]);

    let names: Vec<(String, String)> =
        serde_json::from_str(&fs::read_to_string(pack.join("texts/language_names.json")).unwrap())
            .unwrap();
    assert_eq!(names.len(), 4);
    assert!(names[0].1.contains("as well as some block states"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(pack.join("manifest.json")).unwrap()).unwrap();
    assert_eq!(manifest["format_version"], 2);
    assert_eq!(manifest["header"]["name"], "Test Pack");
    assert_eq!(manifest["modules"][0]["type"], "resources");
    assert!(manifest["header"]["uuid"].is_string());
}

#[test]
fn test_build_no_archive_skips_mcpack() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("en_US.lang"), "tile.stone.name=Stone").unwrap();

    let output = dir.path().join("output");

    Command::cargo_bin("blockid")
        .unwrap()
        .args(["build", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--name", "Test Pack", "--no-archive"])
        .assert()
        .success();

    assert!(output.join("Test Pack").is_dir());
    assert!(!output.join("Test Pack.mcpack").exists());
}

#[test]
fn test_build_cleans_previous_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("en_US.lang"), "tile.stone.name=Stone").unwrap();

    let output = dir.path().join("output");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("stale.txt"), "leftover").unwrap();

    Command::cargo_bin("blockid")
        .unwrap()
        .args(["build", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--name", "Test Pack", "--no-archive"])
        .assert()
        .success();

    assert!(!output.join("stale.txt").exists());
}

#[test]
fn test_build_copies_assets_into_pack() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("en_US.lang"), "tile.stone.name=Stone").unwrap();

    let assets = dir.path().join("assets");
    fs::create_dir_all(assets.join("font")).unwrap();
    fs::write(assets.join("pack_icon.png"), [0u8; 4]).unwrap();
    fs::write(assets.join("font/glyph_E3.png"), [0u8; 4]).unwrap();

    let output = dir.path().join("output");

    Command::cargo_bin("blockid")
        .unwrap()
        .args(["build", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--name", "Test Pack", "--no-archive"])
        .arg("--assets")
        .arg(&assets)
        .assert()
        .success();

    let pack = output.join("Test Pack");
    assert!(pack.join("pack_icon.png").is_file());
    assert!(pack.join("font/glyph_E3.png").is_file());
}
