//! TOML-based application configuration.
//!
//! Stores host-tunable settings:
//! - Recovery rate and scheduler gates
//! - Analysis window
//! - Assistant toggle
//!
//! Configuration is stored at `~/.config/recharge/config.toml`. These
//! are fixed preferences, distinct from the adaptive personal limits
//! derived from history.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::store::data_dir;

/// Recovery scheduler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoverySettings {
    /// Passive recovery in battery points per hour.
    #[serde(default = "default_rate_per_hour")]
    pub rate_per_hour: f64,
    /// Minimum minutes between applied recovery ticks.
    #[serde(default = "default_tick_interval_min")]
    pub tick_interval_min: u32,
    /// Minutes after an interaction before recovery resumes.
    #[serde(default = "default_cooldown_min")]
    pub cooldown_min: u32,
}

/// Pattern analysis and limits estimation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Trailing window in days for the limits estimator.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

/// Assistant configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantSettings {
    /// Whether a live text generator may be consulted; the deterministic
    /// fallback is always available regardless.
    #[serde(default)]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/recharge/config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RechargeConfig {
    #[serde(default)]
    pub recovery: RecoverySettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub assistant: AssistantSettings,
}

// Default functions
fn default_rate_per_hour() -> f64 {
    8.0
}
fn default_tick_interval_min() -> u32 {
    15
}
fn default_cooldown_min() -> u32 {
    30
}
fn default_window_days() -> u32 {
    30
}

impl Default for RecoverySettings {
    fn default() -> Self {
        Self {
            rate_per_hour: default_rate_per_hour(),
            tick_interval_min: default_tick_interval_min(),
            cooldown_min: default_cooldown_min(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self { enabled: false }
    }
}

impl RechargeConfig {
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
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::ParseFailed("config key is empty".into()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::ParseFailed(format!("unknown config key: {key}")))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::ParseFailed(format!("unknown config key: {key}")))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| {
                            ConfigError::ParseFailed(format!("cannot parse '{value}': {e}"))
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    ConfigError::ParseFailed(format!(
                                        "cannot parse '{value}' as number"
                                    ))
                                })?
                        } else {
                            return Err(ConfigError::ParseFailed(format!(
                                "cannot parse '{value}' as number"
                            )));
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::ParseFailed(format!("unknown config key: {key}")))?;
        }

        Err(ConfigError::ParseFailed(format!("unknown config key: {key}")))
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

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be
    /// parsed as the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/recharge"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    /// Load from an explicit path; missing file writes and returns the
    /// default.
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk at the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        self.save_to(&path)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &PathBuf) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = RechargeConfig::default();
        assert_eq!(cfg.recovery.rate_per_hour, 8.0);
        assert_eq!(cfg.recovery.tick_interval_min, 15);
        assert_eq!(cfg.recovery.cooldown_min, 30);
        assert_eq!(cfg.analysis.window_days, 30);
        assert!(!cfg.assistant.enabled);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: RechargeConfig = toml::from_str(
            r#"
            [recovery]
            rate_per_hour = 12.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.recovery.rate_per_hour, 12.5);
        assert_eq!(cfg.recovery.tick_interval_min, 15);
        assert_eq!(cfg.analysis.window_days, 30);
    }

    #[test]
    fn missing_file_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = RechargeConfig::load_from(&path).unwrap();
        assert_eq!(cfg, RechargeConfig::default());
        assert!(path.exists());

        // Round-trip through disk.
        let reloaded = RechargeConfig::load_from(&path).unwrap();
        assert_eq!(reloaded, cfg);
    }

    #[test]
    fn get_and_set_by_dotted_key() {
        let mut cfg = RechargeConfig::default();
        assert_eq!(cfg.get("recovery.rate_per_hour").as_deref(), Some("8.0"));
        assert_eq!(cfg.get("assistant.enabled").as_deref(), Some("false"));
        assert_eq!(cfg.get("nope.nothing"), None);

        cfg.set("recovery.cooldown_min", "45").unwrap();
        assert_eq!(cfg.recovery.cooldown_min, 45);
        cfg.set("assistant.enabled", "true").unwrap();
        assert!(cfg.assistant.enabled);

        assert!(cfg.set("recovery.cooldown_min", "soon").is_err());
        assert!(cfg.set("unknown.key", "1").is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "recovery = \"not a table\"").unwrap();
        assert!(matches!(
            RechargeConfig::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
