//! Configuration loading and saving
//!
//! Reads and writes the JSON config file. Saves go through a temp file and a
//! rename so a crash never leaves a half-written config behind.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::Config;
use crate::error::ConfigError;

/// Resolve the config path, expanding a leading `~`.
pub fn config_path(path: Option<&str>) -> PathBuf {
    let raw = path.unwrap_or(DEFAULT_CONFIG_PATH);
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Load and validate the config file.
///
/// Any failure (missing file, bad JSON, out-of-range values) is an error; the
/// caller decides whether to keep its previous configuration.
#[instrument(name = "load_config", skip_all, fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;

    info!(
        configured = config.configured_shortcuts.len(),
        aliases = config.key_aliases.len(),
        "Loaded config"
    );
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the default config.
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    match load_config(path) {
        Err(e) if e.is_not_found() => {
            info!(path = %path.display(), "Config file not found, using defaults");
            Ok(Config::default())
        }
        other => other,
    }
}

/// Write the config as pretty-printed JSON.
pub fn save_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut content = serde_json::to_string_pretty(config)?;
    content.push('\n');

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content).map_err(io_err)?;
    fs::rename(&tmp_path, path).map_err(io_err)?;

    info!(path = %path.display(), "Saved config");
    Ok(())
}
