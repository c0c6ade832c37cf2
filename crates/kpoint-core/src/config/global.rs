//! Location of the per-user configuration (~/.config/kpoint/config.toml)

use std::path::PathBuf;

use crate::error::{KpointError, Result};

const CONFIG_DIR: &str = "kpoint";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV_VAR: &str = "KPOINT_CONFIG_DIR";

/// Path of the per-user configuration file
pub fn config_path() -> Result<PathBuf> {
    // Allow environment variable override for testing
    let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
        PathBuf::from(env_dir)
    } else {
        dirs::config_dir()
            .ok_or_else(|| KpointError::Other("unable to determine config directory".to_string()))?
            .join(CONFIG_DIR)
    };

    Ok(config_dir.join(CONFIG_FILE))
}

/// Returns the source description for display purposes
pub fn source_display() -> String {
    if std::env::var(CONFIG_DIR_ENV_VAR).is_ok() {
        "custom config directory".to_string()
    } else {
        "~/.config/kpoint/config.toml".to_string()
    }
}
