//! On-disk tile memoization.
//!
//! Every tile is stored as one file named after its coordinates, so a re-run
//! finds the tiles of an interrupted download and skips the network for
//! them. Each coordinate maps to its own file; concurrent fetches never
//! share a path and need no locking.

mod path;
mod store;

pub use path::{tile_filename, tile_path, TILE_EXTENSION};
pub use store::{CacheError, TileCache};
