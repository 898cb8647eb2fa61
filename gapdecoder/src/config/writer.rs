//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let output_directory = config
        .output
        .directory
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();
    let cache_directory = config
        .cache
        .directory
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[download]
; Attempts per tile, including the first one (default: 5)
max_attempts = {}
; Backoff unit in milliseconds. The delay after failed attempt i is base * 2^i,
; so the defaults wait 1s, 2s, 4s, 8s between five attempts (default: 1000)
backoff_base_ms = {}
; Maximum tiles downloaded at once, 0 for unbounded (default: 0)
concurrency = {}
; Timeout in seconds for HTTP requests (default: 30)
timeout = {}

[output]
; JPEG quality from 0 to 95, higher is better (default: 90)
quality = {}
; Directory for finished images. If empty, the current directory is used
directory = {}

[cache]
; Directory for downloaded tiles. If empty, tiles go to <output directory>/<image name>/
directory = {}
; Keep downloaded tiles after the image is saved (default: false)
; Tiles are always kept when a download fails, so a re-run can resume
keep_tiles = {}

[decrypt]
; Fail when a tile has no encryption marker instead of using it as-is (default: false)
require_marker = {}

[logging]
; Log file path (default: ~/.gapdecoder/gapdecoder.log)
file = {}
"#,
        config.download.max_attempts,
        config.download.backoff_base_ms,
        config.download.concurrency,
        config.download.timeout,
        config.output.quality,
        output_directory,
        cache_directory,
        config.cache.keep_tiles,
        config.decrypt.require_marker,
        path_to_string(&config.logging.file),
    )
}

fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
