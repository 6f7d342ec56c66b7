//! Configuration resolution for watcher-save
//!
//! The server url base is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. `WATCHER_URL_BASE` environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing default config file is not an error; an explicitly requested
//! one is.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use watcher_settings::{Error, FormRules, Result};

pub const URL_BASE_ENV: &str = "WATCHER_URL_BASE";
pub const DEFAULT_URL_BASE: &str = "http://127.0.0.1:9090";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub url_base: Option<String>,
    pub timeout_secs: Option<u64>,
    pub rules: FormRules,
}

impl TomlConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct SaveConfig {
    pub url_base: String,
    pub timeout: Duration,
    pub rules: FormRules,
}

/// `<config dir>/watcher/config.toml` for the current platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("watcher").join("config.toml"))
}

fn load_toml(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        return TomlConfig::load(path)
            .map_err(|e| Error::Config(format!("Failed to load {}: {}", path.display(), e)));
    }

    let Some(path) = default_config_path() else {
        return Ok(TomlConfig::default());
    };
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    match TomlConfig::load(&path) {
        Ok(config) => {
            info!("Loaded config file {}", path.display());
            Ok(config)
        }
        Err(e) => {
            warn!("Ignoring unreadable config file {}: {}", path.display(), e);
            Ok(TomlConfig::default())
        }
    }
}

/// Resolve the run configuration
pub fn resolve(cli_url_base: Option<&str>, config_path: Option<&Path>) -> Result<SaveConfig> {
    let toml_config = load_toml(config_path)?;

    let url_base = if let Some(url) = cli_url_base {
        url.to_string()
    } else if let Ok(url) = std::env::var(URL_BASE_ENV) {
        url
    } else if let Some(url) = toml_config.url_base.clone() {
        url
    } else {
        DEFAULT_URL_BASE.to_string()
    };

    if url_base.trim().is_empty() {
        return Err(Error::Config("url base must not be empty".to_string()));
    }

    let timeout = Duration::from_secs(toml_config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

    Ok(SaveConfig {
        url_base,
        timeout,
        rules: toml_config.rules,
    })
}
