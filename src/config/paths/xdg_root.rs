//! XDG Base Directory utilities for config and cache locations.

use crate::error::ApiError;
use std::path::PathBuf;

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config_home));
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// Get XDG cache home directory
///
/// Returns `$XDG_CACHE_HOME` if set, otherwise defaults to `$HOME/.cache`
pub fn cache_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_cache_home) = std::env::var("XDG_CACHE_HOME") {
        return Ok(PathBuf::from(xdg_cache_home));
    }

    let home = std::env::var("HOME").map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG cache home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".cache"))
}

/// User config file: `$XDG_CONFIG_HOME/repobrowse/config.toml`
pub fn config_file_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join("repobrowse").join("config.toml"))
}
