use serde::Deserialize;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_PORT: u16 = 8200;
const DEFAULT_ANNOUNCE_INTERVAL_SECS: u64 = 30;

pub fn local_hostname() -> Option<String> {
    hostname::get()
        .ok()
        .and_then(|os| os.into_string().ok())
        .filter(|s| !s.is_empty())
}

fn default_name() -> String {
    match local_hostname() {
        Some(host) => format!("dlnacat@{host}"),
        None => "dlnacat".to_string(),
    }
}

#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub name: Option<String>,
    pub host: Option<Ipv4Addr>,
    pub localhost: Option<bool>,
    pub announce_interval_secs: Option<u64>,
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub name: String,
    pub paths: Vec<PathBuf>,
    /// Explicit advertised address; `None` means resolve from the interfaces.
    pub host: Option<Ipv4Addr>,
    pub localhost: bool,
    pub announce_interval: Duration,
}

impl Config {
    /// CLI beats file, file beats defaults.
    pub fn resolve(file: Option<FileConfig>, args: &crate::cli::Args) -> Self {
        let file = file.unwrap_or_default();
        let interval_secs = file
            .announce_interval_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_ANNOUNCE_INTERVAL_SECS);
        Config {
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            name: args.name.clone().or(file.name).unwrap_or_else(default_name),
            paths: args.paths.clone(),
            host: args.host.or(file.host),
            localhost: args.localhost || file.localhost.unwrap_or(false),
            announce_interval: Duration::from_secs(interval_secs),
        }
    }
}

pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    let cwd_config = PathBuf::from("dlnacat.toml");
    if cwd_config.exists() {
        return Some(cwd_config);
    }
    dirs::config_dir()
        .map(|dir| dir.join("dlnacat").join("config.toml"))
        .filter(|path| path.exists())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}
