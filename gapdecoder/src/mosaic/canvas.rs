//! Raster canvas for one zoom level.

use std::collections::HashSet;

use image::RgbImage;
use tracing::trace;

use super::MosaicError;
use crate::coord::{TileCoord, ZoomLevel};

/// Canvas sized to a zoom level, filled one tile at a time.
///
/// Each tile is copied with its top-left corner at the nominal tile origin.
/// Edge tiles that overhang the trimmed canvas are clipped.
#[derive(Debug)]
pub struct MosaicCanvas {
    level: ZoomLevel,
    image: RgbImage,
    placed: HashSet<(u32, u32)>,
}

impl MosaicCanvas {
    /// Allocates a black canvas of the level's pixel size.
    pub fn new(level: ZoomLevel) -> Self {
        let (width, height) = level.size();
        Self {
            level,
            image: RgbImage::new(width, height),
            placed: HashSet::with_capacity(level.total_tiles()),
        }
    }

    pub fn level(&self) -> &ZoomLevel {
        &self.level
    }

    /// Number of tiles placed so far.
    pub fn placed(&self) -> usize {
        self.placed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.placed.len() == self.level.total_tiles()
    }

    /// Decodes an encoded tile image and copies it into place.
    pub fn place(&mut self, tile: TileCoord, encoded: &[u8]) -> Result<(), MosaicError> {
        self.check_slot(tile)?;

        let decoded = image::load_from_memory(encoded)
            .map_err(|source| MosaicError::Decode { tile, source })?
            .to_rgb8();

        self.copy(tile, &decoded);
        Ok(())
    }

    /// Copies an already decoded tile into place.
    pub fn place_image(&mut self, tile: TileCoord, decoded: &RgbImage) -> Result<(), MosaicError> {
        self.check_slot(tile)?;
        self.copy(tile, decoded);
        Ok(())
    }

    /// Returns the raster once every grid cell has been filled.
    pub fn finish(self) -> Result<RgbImage, MosaicError> {
        let missing = self.level.total_tiles() - self.placed.len();
        if let Some(first) = self
            .level
            .tiles()
            .find(|tile| !self.placed.contains(&(tile.x, tile.y)))
        {
            return Err(MosaicError::MissingTile {
                x: first.x,
                y: first.y,
                level: self.level.level,
                missing,
            });
        }
        Ok(self.image)
    }

    fn check_slot(&self, tile: TileCoord) -> Result<(), MosaicError> {
        let level = self.level.level;
        if tile.z != level {
            return Err(MosaicError::WrongLevel { tile, level });
        }
        if !self.level.contains(tile.x, tile.y) {
            return Err(MosaicError::OutOfGrid {
                x: tile.x,
                y: tile.y,
                level,
                num_tiles_x: self.level.num_tiles_x,
                num_tiles_y: self.level.num_tiles_y,
            });
        }
        if self.placed.contains(&(tile.x, tile.y)) {
            return Err(MosaicError::DuplicateTile {
                x: tile.x,
                y: tile.y,
                level,
            });
        }
        Ok(())
    }

    fn copy(&mut self, tile: TileCoord, decoded: &RgbImage) {
        let (left, top) = self.level.pixel_origin(tile.x, tile.y);
        trace!(
            x = tile.x,
            y = tile.y,
            left = left,
            top = top,
            width = decoded.width(),
            height = decoded.height(),
            "Placing tile"
        );
        image::imageops::replace(&mut self.image, decoded, i64::from(left), i64::from(top));
        self.placed.insert((tile.x, tile.y));
    }
}
