//! TOML-based application configuration.
//!
//! Stores:
//! - Heating margins and the no-heat tag
//! - Diagnostic output layout
//!
//! Configuration is stored at `~/.config/heatwatch/config.toml`.
//! Margins may be overridden from the environment
//! (`HEATWATCH_PREHEAT_MINUTES`, `HEATWATCH_COOLOFF_MINUTES`,
//! `HEATWATCH_NO_HEAT_TAG`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::config::HeatConfig;
use crate::diagnostics::TextWrapper;
use crate::error::ConfigError;

/// Diagnostic output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_initial_indent")]
    pub initial_indent: usize,
    #[serde(default = "default_subsequent_indent")]
    pub subsequent_indent: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/heatwatch/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub heating: HeatConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

fn default_true() -> bool {
    true
}
fn default_width() -> usize {
    80
}
fn default_initial_indent() -> usize {
    4
}
fn default_subsequent_indent() -> usize {
    8
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: default_width(),
            initial_indent: default_initial_indent(),
            subsequent_indent: default_subsequent_indent(),
        }
    }
}

impl DiagnosticsConfig {
    pub fn wrapper(&self) -> TextWrapper {
        TextWrapper::new(self.width, self.initial_indent, self.subsequent_indent)
    }
}

pub const ENV_PREHEAT_MINUTES: &str = "HEATWATCH_PREHEAT_MINUTES";
pub const ENV_COOLOFF_MINUTES: &str = "HEATWATCH_COOLOFF_MINUTES";
pub const ENV_NO_HEAT_TAG: &str = "HEATWATCH_NO_HEAT_TAG";

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |part| part.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as a non-negative integer")))?,
                // Optional strings: empty input clears them.
                serde_json::Value::String(_) | serde_json::Value::Null if value.is_empty() => {
                    serde_json::Value::Null
                }
                serde_json::Value::String(_) | serde_json::Value::Null => {
                    serde_json::Value::String(value.into())
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot set a whole section".into()));
                }
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from `path`, or return the default if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Apply `HEATWATCH_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides using `lookup` to read variables.
    ///
    /// An empty no-heat tag clears the tag.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let minutes = |name: &str, raw: String| {
            raw.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                key: name.to_string(),
                message: format!("expected non-negative minutes, got '{raw}'"),
            })
        };

        if let Some(raw) = lookup(ENV_PREHEAT_MINUTES) {
            self.heating.preheat_minutes = minutes(ENV_PREHEAT_MINUTES, raw)?;
        }
        if let Some(raw) = lookup(ENV_COOLOFF_MINUTES) {
            self.heating.cooloff_minutes = minutes(ENV_COOLOFF_MINUTES, raw)?;
        }
        if let Some(tag) = lookup(ENV_NO_HEAT_TAG) {
            self.heating.no_heat_tag = if tag.is_empty() { None } else { Some(tag) };
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
