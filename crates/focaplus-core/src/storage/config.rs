//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Backend API endpoint and request timeout
//! - Pomodoro study/rest block lengths
//! - Default activity and discipline for new sessions
//!
//! Configuration is stored at `~/.config/focaplus/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::PomodoroIntervals;

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Pomodoro block lengths, in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroConfig {
    #[serde(default = "default_study_minutes")]
    pub study_minutes: u64,
    #[serde(default = "default_rest_minutes")]
    pub rest_minutes: u64,
}

/// Defaults applied when a timer is started without explicit arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Activity label, e.g. "Estudar Conteúdo".
    #[serde(default = "default_activity")]
    pub activity: String,
    /// Discipline instance to submit sessions against.
    #[serde(default)]
    pub discipline_instance_id: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focaplus/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pomodoro: PomodoroConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

// Default functions
fn default_base_url() -> String {
    "http://localhost:8080/api/v1".into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_study_minutes() -> u64 {
    25
}
fn default_rest_minutes() -> u64 {
    5
}
fn default_activity() -> String {
    "Estudar Conteúdo".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            study_minutes: default_study_minutes(),
            rest_minutes: default_rest_minutes(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            activity: default_activity(),
            discipline_instance_id: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            pomodoro: PomodoroConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

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
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| ConfigError::InvalidValue {
                                    key: key.to_string(),
                                    message: format!("cannot parse '{value}' as number"),
                                })?
                        } else {
                            return Err(ConfigError::InvalidValue {
                                key: key.to_string(),
                                message: format!("cannot parse '{value}' as number"),
                            });
                        }
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Location of the config file under the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: format!("cannot resolve data directory: {e}"),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the default file when none exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
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

    /// Set a config value by key and save. Fails on unknown keys and
    /// unparseable values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        self.save()?;
        Ok(())
    }

    pub fn pomodoro_intervals(&self) -> PomodoroIntervals {
        PomodoroIntervals::from_minutes(self.pomodoro.study_minutes, self.pomodoro.rest_minutes)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.base_url, "http://localhost:8080/api/v1");
        assert_eq!(parsed.pomodoro.study_minutes, 25);
        assert_eq!(parsed.defaults.discipline_instance_id, None);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.api.base_url, "http://localhost:8080/api/v1");
        assert_eq!(cfg.api.timeout_secs, 10);
        assert_eq!(cfg.pomodoro.study_minutes, 25);
        assert_eq!(cfg.pomodoro.rest_minutes, 5);
        assert_eq!(cfg.defaults.activity, "Estudar Conteúdo");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(
            cfg.get("api.base_url").as_deref(),
            Some("http://localhost:8080/api/v1")
        );
        assert_eq!(cfg.get("pomodoro.study_minutes").as_deref(), Some("25"));
        assert!(cfg.get("api.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "pomodoro.study_minutes", "50").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "pomodoro.study_minutes").unwrap(),
            &serde_json::Value::Number(50.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_string() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "api.base_url", "http://10.0.2.2:8080/api/v1")
            .unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "api.base_url").unwrap(),
            &serde_json::Value::String("http://10.0.2.2:8080/api/v1".to_string())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "api.nonexistent_key", "value");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "api.timeout_secs", "not_a_number");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn intervals_come_from_the_pomodoro_section() {
        let mut cfg = Config::default();
        cfg.pomodoro.study_minutes = 50;
        cfg.pomodoro.rest_minutes = 10;
        let intervals = cfg.pomodoro_intervals();
        assert_eq!(intervals.study_seconds, 3000);
        assert_eq!(intervals.rest_seconds, 600);
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.defaults.discipline_instance_id = Some("disc-42".into());
        std::fs::write(&path, toml::to_string_pretty(&cfg).unwrap()).unwrap();

        let parsed: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.defaults.discipline_instance_id.as_deref(), Some("disc-42"));
        assert_eq!(parsed.api.timeout_secs, cfg.api.timeout_secs);
    }
}
