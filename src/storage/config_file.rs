//! Config file storage.
//!
//! Cross-platform: uses the appropriate config directory for each OS.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::AppConfig;
use crate::error::{ColorWallError, Result};

// =============================================================================
// Config Path
// =============================================================================

const APP_NAME: &str = "color-wall";
const CONFIG_FILE: &str = "config.json";

/// Get the configuration directory path.
/// - Linux: ~/.config/color-wall/
/// - Windows: %APPDATA%\color-wall\
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .ok_or_else(|| ColorWallError::Config("Could not find config directory".into()))
}

/// Get the full path to the config file.
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}

// =============================================================================
// Storage Functions
// =============================================================================

/// Load configuration from `path`. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ColorWallError::Config(format!("Failed to read config: {}", e)))?;

    let config: AppConfig = serde_json::from_str(&content)
        .map_err(|e| ColorWallError::Config(format!("Failed to parse config: {}", e)))?;

    config
        .effects
        .validate()
        .map_err(|e| ColorWallError::Config(format!("Invalid effect options: {}", e)))?;

    Ok(config)
}

/// Save configuration to `path`, creating parent directories as needed.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| ColorWallError::Config(format!("Failed to create config dir: {}", e)))?;
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| ColorWallError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, content)
        .map_err(|e| ColorWallError::Config(format!("Failed to write config: {}", e)))?;

    info!("Saved config to {}", path.display());
    Ok(())
}

/// Load configuration from the default location.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&get_config_path()?)
}

/// Save configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(&get_config_path()?, config)
}
