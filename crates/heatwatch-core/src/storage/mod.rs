mod config;

pub use config::{
    Config, DiagnosticsConfig, ENV_COOLOFF_MINUTES, ENV_NO_HEAT_TAG, ENV_PREHEAT_MINUTES,
};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/heatwatch[-dev]/` based on HEATWATCH_ENV.
///
/// Set HEATWATCH_ENV=dev to use the development config directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HEATWATCH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("heatwatch-dev")
    } else {
        base_dir.join("heatwatch")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirectoryUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
