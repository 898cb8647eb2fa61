//! Tile grid coordinates
//!
//! Provides the addressing types shared by every stage of the pipeline: a
//! [`TileCoord`] names one tile of one zoom level, and a [`ZoomLevel`]
//! describes the grid of tiles that make up that level.

mod types;

pub use types::{CoordError, LevelTiles, TileCoord, ZoomLevel};
