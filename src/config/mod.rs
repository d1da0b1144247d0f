//! Configuration module for helium
//!
//! Manages application configuration: where the translation service lives,
//! where the selection store is kept and how verbose logging is.
//! Configuration is stored in the user's config directory and can be
//! overridden with `HELIUM_*` environment variables (`HELIUM_API_URL`,
//! `HELIUM_STORE_PATH`, `HELIUM_LOG_FILTER`, `HELIUM_QUIET`).

mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Service URL used when none is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HeliumConfig {
    /// Base URL of the translation service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Location of the selection store; the data directory when unset
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// `tracing` filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for HeliumConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            store_path: None,
            log_filter: default_log_filter(),
            quiet: false,
        }
    }
}

impl HeliumConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("helium").join("config.toml"))
    }

    /// Load configuration from file and environment
    ///
    /// A missing file is created with defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from `path` layered with `HELIUM_*` variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("HELIUM"))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Change the service URL and persist
    ///
    /// Only the file's own settings are written back; `HELIUM_*` overrides
    /// active in this process stay out of the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or saved.
    pub fn set_api_url(&mut self, url: String) -> Result<(), ConfigError> {
        self.set_api_url_at(&Self::config_path()?, url)
    }

    /// Change the service URL in the config file at `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or saved.
    pub fn set_api_url_at(&mut self, path: &Path, url: String) -> Result<(), ConfigError> {
        let mut on_disk = Self::load_file(path)?;
        on_disk.api_url.clone_from(&url);
        on_disk.save_to(path)?;
        self.api_url = url;
        Ok(())
    }

    /// Settings from the file at `path` alone, without environment overrides
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()?
            .try_deserialize()
    }

    /// Configured store location, or the default one
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no store path is configured and the system data
    /// directory cannot be determined.
    pub fn resolved_store_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => crate::selection::SelectionStore::default_path()
                .map_err(|e| ConfigError::Message(e.to_string())),
        }
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// Setup only prompts on an interactive terminal; otherwise defaults are
    /// written.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() || !std::io::stdin().is_terminal() {
            Self::load()
        } else {
            first_time_setup()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HeliumConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.store_path.is_none());
        assert_eq!(config.log_filter, "warn");
        assert!(!config.quiet);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = HeliumConfig {
            api_url: "https://translations.example.com".to_string(),
            store_path: Some(PathBuf::from("/tmp/helium-store")),
            log_filter: "helium=debug".to_string(),
            quiet: true,
        };
        config.save_to(&path).unwrap();

        let loaded = HeliumConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let loaded = HeliumConfig::load_from(&path).unwrap();
        assert_eq!(loaded.api_url, DEFAULT_API_URL);
        assert_eq!(loaded.log_filter, "warn");
        assert!(loaded.quiet);
    }

    #[test]
    fn test_set_api_url_keeps_overrides_out_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_filter = \"info\"\n").unwrap();

        // as loaded with HELIUM_QUIET and HELIUM_STORE_PATH set
        let mut config = HeliumConfig {
            store_path: Some(PathBuf::from("/tmp/override-store")),
            quiet: true,
            log_filter: "info".to_string(),
            ..HeliumConfig::default()
        };
        config.set_api_url_at(&path, "https://translations.example.com".to_string()).unwrap();
        assert_eq!(config.api_url, "https://translations.example.com");
        assert!(config.quiet);

        let on_disk = HeliumConfig::load_file(&path).unwrap();
        assert_eq!(on_disk.api_url, "https://translations.example.com");
        assert_eq!(on_disk.log_filter, "info");
        assert!(on_disk.store_path.is_none());
        assert!(!on_disk.quiet);
    }

    #[test]
    fn test_resolved_store_path_prefers_configured() {
        let config = HeliumConfig {
            store_path: Some(PathBuf::from("/var/lib/helium")),
            ..HeliumConfig::default()
        };
        assert_eq!(config.resolved_store_path().unwrap(), PathBuf::from("/var/lib/helium"));
    }
}
