//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::mosaic::MAX_JPEG_QUALITY;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("max_attempts") {
            let attempts: u32 =
                parse_number("download", "max_attempts", v, "must be a positive integer")?;
            if attempts == 0 {
                return Err(invalid(
                    "download",
                    "max_attempts",
                    v,
                    "must be at least 1",
                ));
            }
            config.download.max_attempts = attempts;
        }
        if let Some(v) = section.get("backoff_base_ms") {
            config.download.backoff_base_ms = parse_number(
                "download",
                "backoff_base_ms",
                v,
                "must be a non-negative integer (milliseconds)",
            )?;
        }
        if let Some(v) = section.get("concurrency") {
            config.download.concurrency = parse_number(
                "download",
                "concurrency",
                v,
                "must be a non-negative integer (0 = unbounded)",
            )?;
        }
        if let Some(v) = section.get("timeout") {
            config.download.timeout = parse_number(
                "download",
                "timeout",
                v,
                "must be a positive integer (seconds)",
            )?;
        }
    }

    // [output] section
    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = section.get("quality") {
            let reason = format!("must be an integer between 0 and {}", MAX_JPEG_QUALITY);
            let quality: u32 = parse_number("output", "quality", v, &reason)?;
            if quality > MAX_JPEG_QUALITY {
                return Err(invalid("output", "quality", v, &reason));
            }
            config.output.quality = quality;
        }
        if let Some(v) = section.get("directory") {
            config.output.directory = optional_path(v);
        }
    }

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("directory") {
            config.cache.directory = optional_path(v);
        }
        if let Some(v) = section.get("keep_tiles") {
            config.cache.keep_tiles = parse_bool(v);
        }
    }

    // [decrypt] section
    if let Some(section) = ini.section(Some("decrypt")) {
        if let Some(v) = section.get("require_marker") {
            config.decrypt.require_marker = parse_bool(v);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn parse_number<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    let value = value.trim();
    (!value.is_empty()).then(|| expand_tilde(value))
}

/// Parse a boolean value from a string.
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
