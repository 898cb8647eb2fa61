//! gapdecoder - Google Arts & Culture image downloader
//!
//! This library downloads the full-resolution version of an Arts & Culture
//! image. The image is served as a grid of signed, partially encrypted tiles;
//! gapdecoder signs the tile addresses, fetches the tiles concurrently with
//! retry and on-disk caching, decrypts them and stitches them into one JPEG.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use gapdecoder::config::ConfigFile;
//! use gapdecoder::service::DownloadService;
//!
//! let config = ConfigFile::load()?;
//! let service = DownloadService::with_reqwest(config.download_config(), config.output_config())?;
//!
//! let info = service.fetch_info(url).await?;
//! let report = service.download(&info, -1, None).await?;
//! println!("Saved {}", report.output_path.display());
//! ```
//!
//! # Modules
//!
//! - [`coord`]: tile coordinates and zoom level geometry
//! - [`provider`]: URL signing and the HTTP client abstraction
//! - [`cache`]: on-disk tile cache
//! - [`retry`]: bounded exponential backoff
//! - [`batch`]: concurrent, order-preserving batch execution
//! - [`crypto`]: tile payload decryption
//! - [`mosaic`]: tile assembly and JPEG output
//! - [`metadata`]: asset page and pyramid discovery

pub mod batch;
pub mod cache;
pub mod config;
pub mod coord;
pub mod crypto;
pub mod logging;
pub mod metadata;
pub mod mosaic;
pub mod provider;
pub mod retry;
pub mod service;

/// Version of the gapdecoder library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
        assert_eq!(VERSION.split('.').count(), 3);
    }
}
