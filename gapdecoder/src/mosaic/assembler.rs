//! Whole-level assembly.

use image::RgbImage;
use tracing::info;

use super::{MosaicCanvas, MosaicError};
use crate::coord::{TileCoord, ZoomLevel};

/// Builds the full raster of a zoom level from decrypted tile payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct MosaicAssembler;

impl MosaicAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Decodes and places every tile, then checks the grid is fully covered.
    ///
    /// Every `(x, y)` of the level must appear exactly once. The returned
    /// image has exactly the level's derived pixel size.
    pub fn assemble<I, B>(&self, level: &ZoomLevel, tiles: I) -> Result<RgbImage, MosaicError>
    where
        I: IntoIterator<Item = (TileCoord, B)>,
        B: AsRef<[u8]>,
    {
        let (width, height) = level.size();
        info!(
            level = level.level,
            width = width,
            height = height,
            tiles = level.total_tiles(),
            "Assembling mosaic"
        );

        let mut canvas = MosaicCanvas::new(*level);
        for (tile, bytes) in tiles {
            canvas.place(tile, bytes.as_ref())?;
        }
        canvas.finish()
    }
}
