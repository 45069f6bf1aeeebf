use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::storage::default_storage_path;

pub const DEFAULT_SERVER: &str = "http://localhost:5000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    pub server: Option<String>,
    pub storage: Option<PathBuf>,
    pub player: Option<String>,
    pub open_browser: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Debug)]
pub struct Config {
    pub server: String,
    pub storage: PathBuf,
    /// `None` plays rounds without audio.
    pub player: Option<String>,
    pub open_browser: bool,
    pub log_level: String,
}

impl Config {
    /// CLI beats the config file, the config file beats the defaults.
    pub fn resolve(file: Option<FileConfig>, args: &crate::cli::Args) -> Self {
        let file = file.unwrap_or_default();
        Config {
            server: args
                .server
                .clone()
                .or(file.server)
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            storage: args
                .storage
                .clone()
                .or(file.storage)
                .unwrap_or_else(default_storage_path),
            player: args
                .player
                .clone()
                .or(file.player)
                .filter(|cmd| !cmd.trim().is_empty()),
            open_browser: !args.no_browser && file.open_browser.unwrap_or(true),
            log_level: file
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    let cwd_config = PathBuf::from("songamizer.toml");
    if cwd_config.exists() {
        return Some(cwd_config);
    }
    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("songamizer").join("config.toml");
        if xdg_config.exists() {
            return Some(xdg_config);
        }
    }
    None
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
