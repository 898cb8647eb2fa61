//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Download settings
    pub download: DownloadSettings,
    /// Output image settings
    pub output: OutputSettings,
    /// Tile cache settings
    pub cache: CacheSettings,
    /// Decryption settings
    pub decrypt: DecryptSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Download configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSettings {
    /// Attempts per tile, including the first one
    pub max_attempts: u32,
    /// Backoff unit in milliseconds; delay after attempt `i` is `base * 2^i`
    pub backoff_base_ms: u64,
    /// Maximum tiles in flight, 0 for unbounded
    pub concurrency: usize,
    /// Timeout in seconds for HTTP requests
    pub timeout: u64,
}

/// Output image configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    /// JPEG quality, 0-95
    pub quality: u32,
    /// Directory for finished images. `None` means the working directory.
    pub directory: Option<PathBuf>,
}

/// Tile cache configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Tile directory. `None` means `<output directory>/<image name>`.
    pub directory: Option<PathBuf>,
    /// Keep downloaded tiles after a successful save
    pub keep_tiles: bool,
}

/// Decryption configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptSettings {
    /// Reject tiles without the encryption marker instead of passing them through
    pub require_marker: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
