//! Tests for settings persistence.

use feednav_core::{NavigatorSettings, SettingsError};

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    let mut settings = NavigatorSettings::default();
    settings.history.max_length = 10;
    settings.url.base_path = "/editor".to_string();
    settings.cache.preload_on_open = false;
    settings.save_to(&path).unwrap();

    assert_eq!(NavigatorSettings::try_load_from(&path).unwrap(), settings);
    assert_eq!(NavigatorSettings::load_from(&path), settings);
}

#[test]
fn missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert_eq!(NavigatorSettings::load_from(&path), NavigatorSettings::default());
    assert!(matches!(
        NavigatorSettings::try_load_from(&path),
        Err(SettingsError::Io { .. })
    ));
}

#[test]
fn malformed_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[history]\nmax_length = \"many\"\n").unwrap();

    assert!(matches!(
        NavigatorSettings::try_load_from(&path),
        Err(SettingsError::Parse { .. })
    ));
    assert_eq!(NavigatorSettings::load_from(&path), NavigatorSettings::default());
}
