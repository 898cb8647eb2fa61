//! Configuration file handling for ~/.gapdecoder/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::download::DownloadConfig;
use super::output::OutputConfig;
use super::settings::ConfigFile;
use crate::crypto::MarkerPolicy;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.gapdecoder/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.gapdecoder/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
        }
        Ok(path)
    }

    /// Download behaviour described by the `[download]` and `[decrypt]` sections.
    pub fn download_config(&self) -> DownloadConfig {
        let policy = if self.decrypt.require_marker {
            MarkerPolicy::Require
        } else {
            MarkerPolicy::PassThrough
        };

        DownloadConfig::new()
            .with_max_attempts(self.download.max_attempts)
            .with_backoff_base(std::time::Duration::from_millis(self.download.backoff_base_ms))
            .with_concurrency(self.download.concurrency)
            .with_timeout_secs(self.download.timeout)
            .with_marker_policy(policy)
    }

    /// Output behaviour described by the `[output]` and `[cache]` sections.
    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new()
            .with_quality(self.output.quality)
            .with_keep_tiles(self.cache.keep_tiles);
        if let Some(dir) = &self.output.directory {
            config = config.with_directory(dir.clone());
        }
        if let Some(dir) = &self.cache.directory {
            config = config.with_tile_directory(dir.clone());
        }
        config
    }
}

/// Get the path to the config directory (~/.gapdecoder).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gapdecoder")
}

/// Get the path to the config file (~/.gapdecoder/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.download.max_attempts, 5);
        assert_eq!(config.download.backoff_base_ms, DEFAULT_BACKOFF_BASE_MS);
        assert_eq!(config.download.concurrency, 0);
        assert_eq!(config.download.timeout, DEFAULT_DOWNLOAD_TIMEOUT_SECS);
        assert_eq!(config.output.quality, 90);
        assert!(config.output.directory.is_none());
        assert!(!config.cache.keep_tiles);
        assert!(!config.decrypt.require_marker);
        assert!(config.logging.file.ends_with(DEFAULT_LOG_FILE_NAME));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        ConfigFile::default().save_to(&config_path).unwrap();

        assert!(config_path.exists());
    }

    #[test]
    fn test_download_config_from_file() {
        let mut file = ConfigFile::default();
        file.download.max_attempts = 2;
        file.download.backoff_base_ms = 250;
        file.download.concurrency = 8;
        file.decrypt.require_marker = true;

        let config = file.download_config();

        assert_eq!(config.max_attempts(), 2);
        assert_eq!(config.backoff_base(), std::time::Duration::from_millis(250));
        assert_eq!(config.concurrency(), 8);
        assert_eq!(config.marker_policy(), MarkerPolicy::Require);
    }

    #[test]
    fn test_output_config_from_file() {
        let mut file = ConfigFile::default();
        file.output.quality = 75;
        file.output.directory = Some(PathBuf::from("/tmp/out"));
        file.cache.keep_tiles = true;

        let config = file.output_config();

        assert_eq!(config.quality(), 75);
        assert_eq!(config.directory(), Path::new("/tmp/out"));
        assert!(config.keep_tiles());
        assert!(config.tile_directory().is_none());
    }
}
