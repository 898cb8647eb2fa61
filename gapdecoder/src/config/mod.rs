//! Configuration for gapdecoder.
//!
//! The user's `~/.gapdecoder/config.ini` is loaded into a [`ConfigFile`],
//! one settings struct per INI section. Components take the typed builder
//! configs derived from it:
//!
//! - [`DownloadConfig`]: retry budget, concurrency, HTTP timeout, marker policy
//! - [`OutputConfig`]: JPEG quality, output and tile directories
//!
//! # Example
//!
//! ```
//! use gapdecoder::config::{ConfigFile, DownloadConfig};
//!
//! let file = ConfigFile::default();
//! assert_eq!(file.download_config(), DownloadConfig::default());
//! assert_eq!(file.output_config().quality(), 90);
//! ```

mod defaults;
mod download;
mod file;
mod output;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_log_file, DEFAULT_BACKOFF_BASE_MS, DEFAULT_CONCURRENCY, DEFAULT_DOWNLOAD_TIMEOUT_SECS,
    DEFAULT_LOG_FILE_NAME,
};
pub use download::DownloadConfig;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use output::OutputConfig;
pub use settings::{
    CacheSettings, ConfigFile, DecryptSettings, DownloadSettings, LoggingSettings, OutputSettings,
};
