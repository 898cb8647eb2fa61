//! Mosaic assembly of decrypted tiles into one image.
//!
//! [`MosaicCanvas`] owns the raster for one zoom level and tracks which grid
//! cells have been filled. [`MosaicAssembler`] drives a full level from a
//! set of tile payloads, and [`JpegOutput`] writes the finished canvas.

mod assembler;
mod canvas;
mod output;

pub use assembler::MosaicAssembler;
pub use canvas::MosaicCanvas;
pub use output::{JpegOutput, DEFAULT_JPEG_QUALITY, MAX_JPEG_QUALITY};

use std::path::PathBuf;
use thiserror::Error;

use crate::coord::TileCoord;

/// Errors raised while assembling or writing a mosaic.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// A grid cell was never filled.
    #[error("tile ({x}, {y}) of zoom level {level} is missing ({missing} missing in total)")]
    MissingTile {
        x: u32,
        y: u32,
        level: u32,
        missing: usize,
    },

    /// A grid cell was supplied twice.
    #[error("tile ({x}, {y}) of zoom level {level} was supplied more than once")]
    DuplicateTile { x: u32, y: u32, level: u32 },

    #[error("tile ({x}, {y}) is outside the {num_tiles_x}x{num_tiles_y} grid of zoom level {level}")]
    OutOfGrid {
        x: u32,
        y: u32,
        level: u32,
        num_tiles_x: u32,
        num_tiles_y: u32,
    },

    #[error("tile {tile} does not belong to zoom level {level}")]
    WrongLevel { tile: TileCoord, level: u32 },

    #[error("failed to decode tile {tile}: {source}")]
    Decode {
        tile: TileCoord,
        #[source]
        source: image::ImageError,
    },

    #[error("JPEG quality {0} is out of range (0-{max})", max = MAX_JPEG_QUALITY)]
    InvalidQuality(u32),

    #[error("failed to encode output image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
