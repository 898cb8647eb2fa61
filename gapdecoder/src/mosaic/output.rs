//! JPEG output of the finished mosaic.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, RgbImage};
use tracing::info;

use super::MosaicError;

/// Highest accepted JPEG quality.
pub const MAX_JPEG_QUALITY: u32 = 95;

/// Quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u32 = 90;

/// Baseline JPEG writer with a fixed quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegOutput {
    quality: u8,
}

impl JpegOutput {
    /// Creates a writer, rejecting qualities above [`MAX_JPEG_QUALITY`].
    pub fn new(quality: u32) -> Result<Self, MosaicError> {
        if quality > MAX_JPEG_QUALITY {
            return Err(MosaicError::InvalidQuality(quality));
        }
        Ok(Self {
            quality: quality as u8,
        })
    }

    pub fn quality(&self) -> u32 {
        u32::from(self.quality)
    }

    /// Encodes `image` into `writer`.
    pub fn encode_to<W: Write>(&self, image: &RgbImage, writer: W) -> Result<(), MosaicError> {
        JpegEncoder::new_with_quality(writer, self.quality)
            .encode(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(MosaicError::Encode)
    }

    /// Encodes `image` into memory.
    pub fn encode(&self, image: &RgbImage) -> Result<Vec<u8>, MosaicError> {
        let mut buffer = Vec::new();
        self.encode_to(image, &mut buffer)?;
        Ok(buffer)
    }

    /// Writes `image` to `path`, returning the file size in bytes.
    ///
    /// The file is written under a temporary name and renamed into place,
    /// so `path` never holds a partial image.
    pub fn save(&self, image: &RgbImage, path: &Path) -> Result<u64, MosaicError> {
        let temp = temp_path(path);
        let io_err = |source| MosaicError::Io {
            path: path.to_path_buf(),
            source,
        };

        let result = File::create(&temp).map_err(io_err).and_then(|file| {
            let mut writer = BufWriter::new(file);
            self.encode_to(image, &mut writer)?;
            writer.flush().map_err(io_err)
        });
        if let Err(e) = result {
            let _ = fs::remove_file(&temp);
            return Err(e);
        }

        fs::rename(&temp, path).map_err(io_err)?;
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            quality = self.quality,
            bytes = size,
            "Saved mosaic"
        );
        Ok(size)
    }
}

impl Default for JpegOutput {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY as u8,
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
