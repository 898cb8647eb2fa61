//! Output configuration.

use std::path::{Path, PathBuf};

use crate::mosaic::{JpegOutput, MosaicError, DEFAULT_JPEG_QUALITY};

/// Where and how the finished image is written.
///
/// # Example
///
/// ```
/// use gapdecoder::config::OutputConfig;
/// use std::path::Path;
///
/// let config = OutputConfig::new().with_quality(80).with_directory("/tmp/art");
/// assert_eq!(
///     config.output_path("Starry Night - abc"),
///     Path::new("/tmp/art/Starry Night - abc.jpg")
/// );
/// assert!(OutputConfig::new().with_quality(99).jpeg_output().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    quality: u32,
    directory: PathBuf,
    tile_directory: Option<PathBuf>,
    keep_tiles: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JPEG quality. Checked by [`jpeg_output`](Self::jpeg_output).
    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    /// Set the directory for finished images.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Use a fixed tile directory instead of one per image.
    pub fn with_tile_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.tile_directory = Some(directory.into());
        self
    }

    pub fn with_keep_tiles(mut self, keep: bool) -> Self {
        self.keep_tiles = keep;
        self
    }

    pub fn quality(&self) -> u32 {
        self.quality
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn tile_directory(&self) -> Option<&Path> {
        self.tile_directory.as_deref()
    }

    pub fn keep_tiles(&self) -> bool {
        self.keep_tiles
    }

    /// JPEG writer for the configured quality.
    pub fn jpeg_output(&self) -> Result<JpegOutput, MosaicError> {
        JpegOutput::new(self.quality)
    }

    /// Default output file for an image: `<directory>/<image name>.jpg`.
    pub fn output_path(&self, image_name: &str) -> PathBuf {
        self.directory.join(format!("{}.jpg", image_name))
    }

    /// Tile directory for an image: the configured one, or
    /// `<directory>/<image name>`.
    pub fn tiles_path(&self, image_name: &str) -> PathBuf {
        self.tile_directory
            .clone()
            .unwrap_or_else(|| self.directory.join(image_name))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
            directory: PathBuf::from("."),
            tile_directory: None,
            keep_tiles: false,
        }
    }
}
