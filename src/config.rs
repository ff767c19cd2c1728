//! Configuration management for the travel TUI.
//!
//! Handles loading and saving configuration from JSONC files.
//! Manages page sizes, the mock provider, logging and commission defaults.

use crate::travel::models::CommissionType;
use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "travel-tui";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Saved items shown per page
    pub favorites_page_size: NonZeroUsize,
    /// Trips shown per page
    pub trips_page_size: NonZeroUsize,
    /// Points of interest shown per page
    pub explore_page_size: NonZeroUsize,
    /// Simulated provider latency in milliseconds
    pub request_delay_ms: u64,
    /// Make delete and check-in requests fail
    pub simulate_failures: bool,
    /// Seed JSON file for the mock provider (relative to config dir or absolute)
    pub seed_path: Option<String>,
    /// Log file path (relative to config dir or absolute)
    pub log_path: String,
    /// Agency-wide commission settings
    pub default_commission: CommissionDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            favorites_page_size: NonZeroUsize::new(20).unwrap_or(NonZeroUsize::MIN),
            trips_page_size: NonZeroUsize::new(12).unwrap_or(NonZeroUsize::MIN),
            explore_page_size: NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN),
            request_delay_ms: 500,
            simulate_failures: false,
            seed_path: None,
            log_path: "travel-tui.log".to_string(),
            default_commission: CommissionDefaults::default(),
        }
    }
}

/// Default commission settings shown on the Trips screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommissionDefaults {
    pub commission_type: CommissionType,
    pub commission_value: f64,
    pub service_fee: f64,
}

impl Default for CommissionDefaults {
    fn default() -> Self {
        Self {
            commission_type: CommissionType::Percentage,
            commission_value: 10.0,
            service_fee: 50.0,
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Searches for config file in:
    /// 1. Provided path (if given)
    /// 2. `$XDG_CONFIG_HOME/travel-tui/config.jsonc`
    /// 3. `~/.config/travel-tui/config.jsonc`
    ///
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_line_comments(&content))
            .with_context(|| format!("Failed to deserialize config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Load configuration, writing the defaults first when no file exists.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    pub fn load_or_init(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };
        if config_path.exists() {
            return Self::load(Some(&config_path));
        }
        let config = Self::default();
        config.save(Some(&config_path))?;
        Ok(config)
    }

    /// Save configuration to file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Details
    /// Creates config directory if it doesn't exist.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, json)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - `$XDG_CONFIG_HOME/travel-tui/config.jsonc` or error
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(app_config_dir()?.join("config.jsonc"))
    }

    /// Get log file path.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        resolve_in_config_dir(&self.log_path)
    }

    /// Get seed file path, if one is configured.
    ///
    /// Relative paths that cannot be resolved against the config directory
    /// are used as given.
    pub fn seed_file_path(&self) -> Option<PathBuf> {
        let seed = self.seed_path.as_deref()?;
        Some(resolve_in_config_dir(seed).unwrap_or_else(|_| PathBuf::from(seed)))
    }
}

fn app_config_dir() -> Result<PathBuf> {
    let config_dir =
        config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
    Ok(config_dir.join(APP_DIR))
}

/// Absolute paths are returned as-is, others are joined to the app config dir.
fn resolve_in_config_dir(path: &str) -> Result<PathBuf> {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        Ok(candidate.to_path_buf())
    } else {
        Ok(app_config_dir()?.join(candidate))
    }
}

/// Strip `//` line comments that are not inside a string literal.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| match line.find("//") {
            // Even quote count before the marker: not inside a string.
            // Escaped quotes are not handled.
            Some(pos) if line[..pos].matches('"').count() % 2 == 0 => line[..pos].trim_end(),
            _ => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.favorites_page_size.get(), 20);
        assert_eq!(config.trips_page_size.get(), 12);
        assert_eq!(config.request_delay_ms, 500);
        assert!(config.seed_path.is_none());
        assert_eq!(config.default_commission.commission_value, 10.0);
        assert_eq!(config.default_commission.service_fee, 50.0);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let config = Config {
            request_delay_ms: 0,
            simulate_failures: true,
            ..Config::default()
        };

        config.save(Some(&config_path)).unwrap();
        assert!(config_path.exists());

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.request_delay_ms, 0);
        assert!(loaded.simulate_failures);
    }

    #[test]
    fn test_config_jsonc_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");

        let jsonc_content = r#"{
            // Smaller pages for tiny terminals
            "favorites_page_size": 5,
            "seed_path": "https://example.com/seed.json",
            "default_commission": { "commission_type": "fixed", "commission_value": 75 }
        }"#;

        fs::write(&config_path, jsonc_content).unwrap();

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded.favorites_page_size.get(), 5);
        assert_eq!(loaded.seed_path.as_deref(), Some("https://example.com/seed.json"));
        assert_eq!(loaded.default_commission.commission_type, CommissionType::Fixed);
        assert_eq!(loaded.default_commission.commission_value, 75.0);
        assert_eq!(loaded.default_commission.service_fee, 50.0);
        assert_eq!(loaded.trips_page_size.get(), 12);
    }

    #[test]
    fn test_config_rejects_zero_page_size() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.jsonc");
        fs::write(&config_path, r#"{ "trips_page_size": 0 }"#).unwrap();
        assert!(Config::load(Some(&config_path)).is_err());
    }

    #[test]
    fn test_load_or_init_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.jsonc");

        let config = Config::load_or_init(Some(&config_path)).unwrap();
        assert!(config_path.exists());
        assert_eq!(config.explore_page_size.get(), 10);
    }

    #[test]
    fn test_absolute_seed_path() {
        let config = Config {
            seed_path: Some("/tmp/seed.json".to_string()),
            ..Config::default()
        };
        assert_eq!(config.seed_file_path(), Some(PathBuf::from("/tmp/seed.json")));
    }
}
