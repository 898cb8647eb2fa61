//! Cache path construction.

use crate::coord::TileCoord;
use std::path::{Path, PathBuf};

/// File extension of cached tiles.
pub const TILE_EXTENSION: &str = "jpg";

/// File name of a cached tile: `{x}x{y}x{z}.jpg`.
///
/// # Example
///
/// ```
/// use gapdecoder::cache::tile_filename;
/// use gapdecoder::coord::TileCoord;
///
/// assert_eq!(tile_filename(&TileCoord::new(3, 14, 7)), "3x14x7.jpg");
/// ```
pub fn tile_filename(tile: &TileCoord) -> String {
    format!("{}x{}x{}.{}", tile.x, tile.y, tile.z, TILE_EXTENSION)
}

/// Full path of a cached tile inside `cache_dir`.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use gapdecoder::cache::tile_path;
/// use gapdecoder::coord::TileCoord;
///
/// let path = tile_path(&PathBuf::from("/tiles"), &TileCoord::new(0, 2, 5));
/// assert_eq!(path, PathBuf::from("/tiles/0x2x5.jpg"));
/// ```
pub fn tile_path(cache_dir: &Path, tile: &TileCoord) -> PathBuf {
    cache_dir.join(tile_filename(tile))
}

/// Temporary path a tile is written to before being renamed into place.
pub(crate) fn temp_path(final_path: &Path) -> PathBuf {
    final_path.with_extension("tmp")
}
