//! Coordinate type definitions

use std::fmt;
use thiserror::Error;

/// Errors raised when a zoom level descriptor violates the grid invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    /// A level must contain at least one tile in each direction
    #[error("zoom level {level} has an empty grid ({num_tiles_x}x{num_tiles_y} tiles)")]
    EmptyGrid {
        level: u32,
        num_tiles_x: u32,
        num_tiles_y: u32,
    },

    /// Tile dimensions must be non-zero
    #[error("zoom level {level} has zero-sized tiles ({tile_width}x{tile_height})")]
    ZeroTileSize {
        level: u32,
        tile_width: u32,
        tile_height: u32,
    },

    /// Empty padding must be strictly smaller than one tile
    #[error("zoom level {level}: empty padding {empty} must be smaller than tile size {tile}")]
    PaddingTooLarge { level: u32, empty: u32, tile: u32 },

    /// Grid pixel extent must fit in `u32`
    #[error("zoom level {level}: {num_tiles} tiles of {tile} pixels exceed the maximum canvas size")]
    CanvasTooLarge { level: u32, num_tiles: u32, tile: u32 },
}

/// Coordinates of one tile within one zoom level.
///
/// Used both as the on-disk cache key and as the canvas placement key, so it
/// travels unchanged from the fetch request to the final pixel copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Column, 0 at the left edge
    pub x: u32,
    /// Row, 0 at the top edge
    pub y: u32,
    /// Zoom level index, 0 is the coarsest level
    pub z: u32,
}

impl TileCoord {
    /// Creates a tile coordinate.
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}-y{}-z{}", self.x, self.y, self.z)
    }
}

/// Grid description for one zoom level.
///
/// The last column and row of tiles may be partially empty: `empty_x` and
/// `empty_y` pixels are trimmed from the right and bottom edges when the
/// canvas size is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevel {
    /// Index of the level within the image pyramid
    pub level: u32,
    /// Number of tile columns
    pub num_tiles_x: u32,
    /// Number of tile rows
    pub num_tiles_y: u32,
    /// Nominal tile width in pixels
    pub tile_width: u32,
    /// Nominal tile height in pixels
    pub tile_height: u32,
    /// Empty pixels at the right edge of the last column
    pub empty_x: u32,
    /// Empty pixels at the bottom edge of the last row
    pub empty_y: u32,
}

impl ZoomLevel {
    /// Creates a zoom level descriptor, checking the grid invariants.
    pub fn new(
        level: u32,
        num_tiles_x: u32,
        num_tiles_y: u32,
        tile_width: u32,
        tile_height: u32,
        empty_x: u32,
        empty_y: u32,
    ) -> Result<Self, CoordError> {
        let descriptor = Self {
            level,
            num_tiles_x,
            num_tiles_y,
            tile_width,
            tile_height,
            empty_x,
            empty_y,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Checks the grid invariants.
    pub fn validate(&self) -> Result<(), CoordError> {
        if self.num_tiles_x == 0 || self.num_tiles_y == 0 {
            return Err(CoordError::EmptyGrid {
                level: self.level,
                num_tiles_x: self.num_tiles_x,
                num_tiles_y: self.num_tiles_y,
            });
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(CoordError::ZeroTileSize {
                level: self.level,
                tile_width: self.tile_width,
                tile_height: self.tile_height,
            });
        }
        for (num_tiles, tile) in [
            (self.num_tiles_x, self.tile_width),
            (self.num_tiles_y, self.tile_height),
        ] {
            if num_tiles.checked_mul(tile).is_none() {
                return Err(CoordError::CanvasTooLarge {
                    level: self.level,
                    num_tiles,
                    tile,
                });
            }
        }
        if self.empty_x >= self.tile_width {
            return Err(CoordError::PaddingTooLarge {
                level: self.level,
                empty: self.empty_x,
                tile: self.tile_width,
            });
        }
        if self.empty_y >= self.tile_height {
            return Err(CoordError::PaddingTooLarge {
                level: self.level,
                empty: self.empty_y,
                tile: self.tile_height,
            });
        }
        Ok(())
    }

    /// Canvas width in pixels after trimming the right padding.
    ///
    /// Only meaningful for a level that passed [`validate`](Self::validate).
    pub fn width(&self) -> u32 {
        self.num_tiles_x * self.tile_width - self.empty_x
    }

    /// Canvas height in pixels after trimming the bottom padding.
    pub fn height(&self) -> u32 {
        self.num_tiles_y * self.tile_height - self.empty_y
    }

    /// Canvas `(width, height)` in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Number of tiles in the grid.
    pub fn total_tiles(&self) -> usize {
        self.num_tiles_x as usize * self.num_tiles_y as usize
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.num_tiles_x && y < self.num_tiles_y
    }

    /// Top-left pixel of a tile on the canvas, using the nominal tile size.
    pub fn pixel_origin(&self, x: u32, y: u32) -> (u32, u32) {
        (x * self.tile_width, y * self.tile_height)
    }

    /// Returns an iterator over every tile of the level.
    ///
    /// Tiles are yielded column by column (all rows of column 0, then all
    /// rows of column 1, ...), which is the launch order of the batch.
    #[inline]
    pub fn tiles(&self) -> LevelTiles {
        LevelTiles {
            level: *self,
            current: 0,
        }
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level {:2}: {:6} x {:6} ({:6} tiles)",
            self.level,
            self.width(),
            self.height(),
            self.total_tiles()
        )
    }
}

/// Iterator over all tiles of a zoom level.
#[derive(Debug, Clone)]
pub struct LevelTiles {
    level: ZoomLevel,
    current: usize,
}

impl Iterator for LevelTiles {
    type Item = TileCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.level.total_tiles() {
            return None;
        }

        let rows = self.level.num_tiles_y as usize;
        let x = (self.current / rows) as u32;
        let y = (self.current % rows) as u32;

        self.current += 1;

        Some(TileCoord::new(x, y, self.level.level))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.level.total_tiles() - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LevelTiles {}
