use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::ConfigError;
use crate::types::DesktopConfig;

/// Smallest viewport a maximized window can fill without violating the
/// window size minimums.
const MIN_VIEWPORT_WIDTH: u32 = 200;
const MIN_VIEWPORT_HEIGHT: u32 = 100;

/// Resolve the config file location.
///
/// `RETRODESK_CONFIG` wins when set and non-empty, otherwise
/// `~/.retrodesk/config.toml`, falling back to the current directory if the
/// home directory cannot be determined.
pub fn config_file_path() -> PathBuf {
    if let Ok(path_str) = std::env::var("RETRODESK_CONFIG")
        && !path_str.is_empty()
    {
        return PathBuf::from(path_str);
    }

    match dirs::home_dir() {
        Some(home) => home.join(".retrodesk").join("config.toml"),
        None => {
            tracing::error!(
                event = "config.home_dir_not_found",
                fallback = ".",
                "Could not determine home directory - using current directory as fallback"
            );
            PathBuf::from(".").join(".retrodesk").join("config.toml")
        }
    }
}

/// Load configuration from the resolved config path.
///
/// A missing default file yields `DesktopConfig::default()`. A missing file
/// named explicitly through `RETRODESK_CONFIG` is an error.
pub fn load_config() -> Result<DesktopConfig, ConfigError> {
    let path = config_file_path();
    let explicit = std::env::var("RETRODESK_CONFIG").is_ok_and(|p| !p.is_empty());

    if !path.exists() {
        if explicit {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        debug!(
            event = "config.load_defaulted",
            path = %path.display(),
            reason = "file missing"
        );
        return Ok(DesktopConfig::default());
    }

    load_config_from(&path)
}

/// Load and validate configuration from a specific file.
pub fn load_config_from(path: &Path) -> Result<DesktopConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    let config: DesktopConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    validate_config(&config)?;

    info!(
        event = "config.loaded",
        path = %path.display(),
        viewport_width = config.viewport.width,
        viewport_height = config.viewport.height
    );

    Ok(config)
}

pub fn validate_config(config: &DesktopConfig) -> Result<(), ConfigError> {
    let viewport = &config.viewport;
    if viewport.width < MIN_VIEWPORT_WIDTH || viewport.height < MIN_VIEWPORT_HEIGHT {
        return Err(ConfigError::ViewportTooSmall {
            width: viewport.width,
            height: viewport.height,
            min_width: MIN_VIEWPORT_WIDTH,
            min_height: MIN_VIEWPORT_HEIGHT,
        });
    }

    if let Some(dir) = &config.state.dir
        && dir.as_os_str().is_empty()
    {
        return Err(ConfigError::EmptyStateDir);
    }

    Ok(())
}
