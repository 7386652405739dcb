//! Duke Data Service configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, DdsConfig};

/// Overrides the location of the client configuration file.
pub const CONFIG_PATH_ENV: &str = "DDSCLIENT_CONF";

/// Supplies a pre-issued API token.
pub const AUTH_TOKEN_ENV: &str = "DUKE_DATA_SERVICE_AUTH";

const DEFAULT_CONFIG_FILE: &str = ".ddsclient";

/// Location of the client configuration file: `$DDSCLIENT_CONF`, else `~/.ddsclient`.
pub fn config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_FILE)),
    }
}

/// Load the configuration from disk and apply environment overrides.
pub fn load_dds_config() -> Result<DdsConfig, AppError> {
    let mut config = match config_path() {
        Some(path) => load_from(&path)?,
        None => DdsConfig::default(),
    };

    if let Ok(token) = std::env::var(AUTH_TOKEN_ENV) {
        config.api_token = Some(token);
    }

    Ok(config)
}

/// Load from a specific file. A missing file yields the defaults.
pub fn load_from(path: &Path) -> Result<DdsConfig, AppError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no ddsclient config file, using defaults");
        return Ok(DdsConfig::default());
    }

    let content = fs::read_to_string(path)?;
    parse_config_content(&content)
        .map_err(|source| AppError::Yaml { path: path.display().to_string(), source })
}

/// Parse configuration from YAML content.
pub fn parse_config_content(content: &str) -> Result<DdsConfig, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(DdsConfig::default());
    }
    serde_yaml::from_str(content)
}
