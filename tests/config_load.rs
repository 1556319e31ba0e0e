use gapdash::config::{AppConfig, ConfigError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn load_reads_all_sections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gapdash.toml");
    fs::write(
        &path,
        "dataset = \"/data/gapminder.csv\"\nlocale = \"de\"\n\n[render]\nwidth = 1200\nheight = 700\n",
    )
    .unwrap();
    let cfg = AppConfig::load(&path).unwrap();
    assert_eq!(cfg.dataset_path(), PathBuf::from("/data/gapminder.csv"));
    assert_eq!(cfg.locale, "de");
    assert_eq!(cfg.render.width, 1200);
    assert_eq!(cfg.render.height, Some(700));
}

#[test]
fn partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gapdash.toml");
    fs::write(&path, "[render]\nheight = 480\n").unwrap();
    let cfg = AppConfig::load(&path).unwrap();
    assert_eq!(cfg.locale, "en");
    assert_eq!(cfg.render.width, 1000);
    assert_eq!(cfg.dataset, None);
}

#[test]
fn bad_toml_and_missing_file_are_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "locale = [\n").unwrap();
    assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse { .. })));
    assert!(matches!(
        AppConfig::load(&dir.path().join("absent.toml")),
        Err(ConfigError::Io { .. })
    ));
}
