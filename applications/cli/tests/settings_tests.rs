/// Settings loading tests
///
/// Environment overrides are not exercised here: they are process-global and
/// would race with other tests.
use rg2soundcheck::config::Settings;
use rg2soundcheck::Cli;
use clap::Parser;
use std::ffi::OsString;
use std::fs;
use tempfile::TempDir;

#[test]
fn loads_settings_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "album = true\npreserve_mtime = true\n").unwrap();

    let settings = Settings::load(Some(path.as_path())).unwrap();
    assert!(settings.album);
    assert!(!settings.verbose);
    assert!(settings.preserve_mtime);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(Settings::load(Some(path.as_path())).is_err());
}

#[test]
fn invalid_value_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "album = \"sometimes\"\n").unwrap();

    assert!(Settings::load(Some(path.as_path())).is_err());
}

#[test]
fn cli_flags_override_file_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "album = false\nverbose = false\n").unwrap();

    let args: Vec<OsString> = vec![
        "rg2soundcheck".into(),
        "--config".into(),
        path.clone().into_os_string(),
        "--album".into(),
        "-t".into(),
        "song.mp3".into(),
    ];
    let cli = Cli::try_parse_from(args).unwrap();

    let options = cli.settings().unwrap().convert_options();
    assert!(options.album);
    assert!(!options.verbose);
    assert!(options.preserve_mtime);
}
