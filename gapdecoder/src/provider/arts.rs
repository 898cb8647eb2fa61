//! Tile source bound to one image.

use super::signer::UrlSigner;
use super::types::ProviderError;
use crate::coord::TileCoord;

/// Produces signed tile URLs for a single image.
///
/// The path token identifies the image on the tile server; the auth token is
/// the per-image secret mixed into every signature. Both come from metadata
/// discovery and are treated as opaque.
#[derive(Debug, Clone)]
pub struct ArtsTileSource {
    signer: UrlSigner,
    path_token: String,
    auth_token: String,
}

impl ArtsTileSource {
    /// Creates a tile source for the image identified by `path_token`.
    pub fn new(
        signer: UrlSigner,
        path_token: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            signer,
            path_token: path_token.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Returns the image path token.
    pub fn path_token(&self) -> &str {
        &self.path_token
    }

    /// Returns the signed download URL of `tile`.
    pub fn tile_url(&self, tile: TileCoord) -> Result<String, ProviderError> {
        self.signer.sign(
            self.path_token.as_bytes(),
            self.auth_token.as_bytes(),
            tile,
        )
    }
}
