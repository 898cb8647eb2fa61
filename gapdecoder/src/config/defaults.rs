//! Default values and constants for all configuration settings.

use super::file::config_directory;
use super::settings::*;
use crate::mosaic::DEFAULT_JPEG_QUALITY;
use crate::retry::DEFAULT_MAX_ATTEMPTS;

/// Default backoff unit in milliseconds.
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 1000;

/// Default concurrency cap (unbounded).
pub const DEFAULT_CONCURRENCY: usize = 0;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = crate::provider::DEFAULT_TIMEOUT_SECS;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "gapdecoder.log";

/// Default log file path (~/.gapdecoder/gapdecoder.log).
pub fn default_log_file() -> std::path::PathBuf {
    config_directory().join(DEFAULT_LOG_FILE_NAME)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            download: DownloadSettings {
                max_attempts: DEFAULT_MAX_ATTEMPTS,
                backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
                concurrency: DEFAULT_CONCURRENCY,
                timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            },
            output: OutputSettings {
                quality: DEFAULT_JPEG_QUALITY,
                directory: None,
            },
            cache: CacheSettings {
                directory: None,
                keep_tiles: false,
            },
            decrypt: DecryptSettings {
                require_marker: false,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
