use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".diagcatrc.json";

/// Settings for one [`Collector`](crate::collector::Collector).
///
/// These are fixed for the lifetime of a collector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorConfig {
    /// Prefix selecting which `KEY-####: text` messages are collected.
    #[serde(default = "default_key")]
    pub key: String,
    /// Catalogue file. Need not exist when `save_if_changed` is set.
    #[serde(default = "default_file")]
    pub file: PathBuf,
    /// Save the catalogue when it drifted, instead of failing the suite.
    #[serde(default = "default_true")]
    pub save_if_changed: bool,
    /// Drop entries never observed during a successful suite.
    #[serde(default = "default_true")]
    pub delete_if_unmatched: bool,
    /// Record where each message is emitted.
    #[serde(default = "default_true")]
    pub record_callers: bool,
    /// Whether the suite harness drives the collector at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_key() -> String {
    "DIAG".to_string()
}

fn default_file() -> PathBuf {
    PathBuf::from("diagnostic_messages.json")
}

fn default_true() -> bool {
    true
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            file: default_file(),
            save_if_changed: true,
            delete_if_unmatched: true,
            record_callers: true,
            enabled: true,
        }
    }
}

impl CollectorConfig {
    pub fn new(key: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn save_if_changed(mut self, save_if_changed: bool) -> Self {
        self.save_if_changed = save_if_changed;
        self
    }

    pub fn delete_if_unmatched(mut self, delete_if_unmatched: bool) -> Self {
        self.delete_if_unmatched = delete_if_unmatched;
        self
    }

    pub fn record_callers(mut self, record_callers: bool) -> Self {
        self.record_callers = record_callers;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Validate configuration values.
    ///
    /// Returns an error if the key is empty or contains whitespace, or if no file is set.
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            bail!("Invalid 'key': must not be empty");
        }
        if self.key.chars().any(char::is_whitespace) {
            bail!("Invalid 'key': \"{}\" must not contain whitespace", self.key);
        }
        if self.file.as_os_str().is_empty() {
            bail!("Invalid 'file': must not be empty");
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = CollectorConfig::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: CollectorConfig,
    /// Config file the settings came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

/// Load the nearest config file at or above `start_dir`.
///
/// A relative catalogue `file` is resolved against the directory holding the config file.
pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let mut config: CollectorConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            if config.file.is_relative() {
                if let Some(dir) = path.parent() {
                    config.file = dir.join(&config.file);
                }
            }
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: CollectorConfig::default(),
            path: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = CollectorConfig::default();
        assert_eq!(config.key, "DIAG");
        assert!(config.save_if_changed);
        assert!(config.delete_if_unmatched);
        assert!(config.record_callers);
        assert!(config.enabled);
    }

    #[test]
    fn test_builder_overrides() {
        let config = CollectorConfig::new("Arez", "messages.json")
            .save_if_changed(false)
            .delete_if_unmatched(false)
            .record_callers(false);
        assert_eq!(config.key, "Arez");
        assert_eq!(config.file, PathBuf::from("messages.json"));
        assert!(!config.save_if_changed);
        assert!(!config.delete_if_unmatched);
        assert!(!config.record_callers);
        assert!(config.enabled);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "key": "Arez", "saveIfChanged": false }"#;
        let config: CollectorConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.key, "Arez");
        assert!(!config.save_if_changed);
        assert!(config.delete_if_unmatched);
        assert_eq!(config.file, default_file());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("nested");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_resolves_relative_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "key": "Spritz", "file": "docs/messages.json" }"#,
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file());
        assert_eq!(result.config.key, "Spritz");
        assert_eq!(result.config.file, dir.path().join("docs/messages.json"));
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file());
        assert_eq!(result.config, CollectorConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_key() {
        let empty = CollectorConfig::new("", "messages.json");
        assert!(empty.validate().unwrap_err().to_string().contains("key"));

        let spaced = CollectorConfig::new("My Key", "messages.json");
        assert!(spaced.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_file() {
        let config = CollectorConfig::new("Arez", "");
        assert!(config.validate().unwrap_err().to_string().contains("file"));
    }

    #[test]
    fn test_load_config_with_invalid_key_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{ "key": "" }"#).unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = default_config_json().unwrap();
        assert!(json.contains("saveIfChanged"));
        assert!(json.contains("deleteIfUnmatched"));
        assert!(json.contains("recordCallers"));
    }
}
