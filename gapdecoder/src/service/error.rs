//! Service-level errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::cache::CacheError;
use crate::coord::TileCoord;
use crate::crypto::DecryptError;
use crate::metadata::MetadataError;
use crate::mosaic::MosaicError;
use crate::provider::ProviderError;

/// Errors surfaced by [`DownloadService`](super::DownloadService).
///
/// Tile-level failures carry the tile coordinate (which includes the zoom
/// level) so a failed run can be diagnosed without repeating it.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Output settings rejected before any network activity.
    #[error("invalid output settings: {0}")]
    InvalidOutput(#[source] MosaicError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// HTTP client could not be created.
    #[error(transparent)]
    Client(#[from] ProviderError),

    #[error("failed to sign tile {tile}: {source}")]
    Sign {
        tile: TileCoord,
        #[source]
        source: ProviderError,
    },

    #[error("failed to download tile {tile}: {source}")]
    Fetch {
        tile: TileCoord,
        #[source]
        source: CacheError,
    },

    #[error("failed to decrypt tile {tile}: {source}")]
    Decrypt {
        tile: TileCoord,
        #[source]
        source: DecryptError,
    },

    #[error("failed to decrypt {}: {source}", path.display())]
    DecryptFile {
        path: PathBuf,
        #[source]
        source: DecryptError,
    },

    #[error("failed to assemble zoom level {level}: {source}")]
    Assemble {
        level: u32,
        #[source]
        source: MosaicError,
    },

    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: MosaicError,
    },

    #[error("tile cache error: {0}")]
    Cache(#[source] CacheError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("background task failed: {0}")]
    Task(String),
}

impl ServiceError {
    /// Tile the error refers to, if any.
    pub fn tile(&self) -> Option<TileCoord> {
        match self {
            Self::Sign { tile, .. } | Self::Fetch { tile, .. } | Self::Decrypt { tile, .. } => {
                Some(*tile)
            }
            _ => None,
        }
    }
}
