use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use dlnacat::cli::Args;
use dlnacat::config::{find_config_file, load_config, Config, ConfigError, FileConfig};

fn make_args(port: Option<u16>, name: Option<String>, paths: Vec<PathBuf>) -> Args {
    Args {
        port,
        name,
        paths,
        config: None,
        host: None,
        localhost: false,
    }
}

#[test]
fn test_defaults_when_nothing_set() {
    let args = make_args(None, None, vec![PathBuf::from("/tmp")]);
    let config = Config::resolve(None, &args);
    assert_eq!(config.port, 8200);
    assert!(
        config.name == "dlnacat" || config.name.starts_with("dlnacat@"),
        "expected default name to be 'dlnacat' or 'dlnacat@<hostname>', got: {}",
        config.name
    );
    assert_eq!(config.host, None);
    assert_eq!(config.announce_interval, Duration::from_secs(30));
}

#[test]
fn test_cli_flag_overrides_default() {
    let args = make_args(Some(9000), None, vec![PathBuf::from("/tmp")]);
    let config = Config::resolve(None, &args);
    assert_eq!(config.port, 9000);
}

#[test]
fn test_toml_overrides_default() {
    let file = FileConfig { port: Some(7777), ..Default::default() };
    let args = make_args(None, None, vec![PathBuf::from("/tmp")]);
    let config = Config::resolve(Some(file), &args);
    assert_eq!(config.port, 7777);
}

#[test]
fn test_cli_overrides_toml() {
    let file = FileConfig {
        port: Some(7777),
        name: Some("From File".to_string()),
        host: Some(Ipv4Addr::new(10, 0, 0, 1)),
        ..Default::default()
    };
    let mut args = make_args(Some(9000), Some("From CLI".to_string()), vec![PathBuf::from("/tmp")]);
    args.host = Some(Ipv4Addr::new(10, 0, 0, 2));
    let config = Config::resolve(Some(file), &args);
    assert_eq!(config.port, 9000); // CLI wins
    assert_eq!(config.name, "From CLI");
    assert_eq!(config.host, Some(Ipv4Addr::new(10, 0, 0, 2)));
}

#[test]
fn test_toml_parse() {
    let toml_str = "port = 9000\nname = \"Living Room\"\nhost = \"192.168.1.20\"\nannounce_interval_secs = 15\n";
    let parsed: FileConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(parsed.port, Some(9000));
    assert_eq!(parsed.name.as_deref(), Some("Living Room"));
    assert_eq!(parsed.host, Some(Ipv4Addr::new(192, 168, 1, 20)));
    assert_eq!(parsed.announce_interval_secs, Some(15));
}

#[test]
fn test_toml_unknown_fields_ignored() {
    // Future keys must not break parsing
    let toml_str = "port = 9000\nunknown_future_key = true\n";
    let parsed: Result<FileConfig, _> = toml::from_str(toml_str);
    assert!(parsed.is_ok());
}

#[test]
fn test_localhost_default_false() {
    let args = make_args(None, None, vec![PathBuf::from("/tmp")]);
    let config = Config::resolve(None, &args);
    assert!(!config.localhost, "localhost should default to false when neither CLI nor TOML sets it");
}

#[test]
fn test_localhost_from_toml() {
    let file = FileConfig { localhost: Some(true), ..Default::default() };
    let args = make_args(None, None, vec![PathBuf::from("/tmp")]);
    assert!(Config::resolve(Some(file), &args).localhost);
}

#[test]
fn test_announce_interval_from_toml() {
    let file = FileConfig { announce_interval_secs: Some(5), ..Default::default() };
    let args = make_args(None, None, vec![PathBuf::from("/tmp")]);
    let config = Config::resolve(Some(file), &args);
    assert_eq!(config.announce_interval, Duration::from_secs(5));
}

#[test]
fn test_zero_announce_interval_falls_back_to_default() {
    let file = FileConfig { announce_interval_secs: Some(0), ..Default::default() };
    let args = make_args(None, None, vec![PathBuf::from("/tmp")]);
    let config = Config::resolve(Some(file), &args);
    assert_eq!(config.announce_interval, Duration::from_secs(30));
}

#[test]
fn test_explicit_config_path_wins() {
    let path = PathBuf::from("/nonexistent/custom.toml");
    assert_eq!(find_config_file(Some(path.as_path())), Some(path));
}

#[test]
fn test_load_config_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dlnacat.toml");
    std::fs::write(&path, "port = 8300\n").unwrap();
    let parsed = load_config(&path).unwrap();
    assert_eq!(parsed.port, Some(8300));
}

#[test]
fn test_load_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(load_config(&dir.path().join("missing.toml")), Err(ConfigError::Io(_))));

    let bad = dir.path().join("bad.toml");
    std::fs::write(&bad, "port = \"not a number\"\n").unwrap();
    assert!(matches!(load_config(&bad), Err(ConfigError::Parse(_))));
}
