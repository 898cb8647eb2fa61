//! Tile addressing and HTTP access
//!
//! This module turns tile coordinates into signed download addresses and
//! performs the outbound requests:
//!
//! - [`UrlSigner`] computes the HMAC-signed address of a tile
//! - [`ArtsTileSource`] binds an image's path and auth tokens to a signer
//! - [`AsyncHttpClient`] abstracts the HTTP GET so tests can inject mocks
//!
//! # Example
//!
//! ```
//! use gapdecoder::coord::TileCoord;
//! use gapdecoder::provider::{ArtsTileSource, UrlSigner};
//!
//! let source = ArtsTileSource::new(UrlSigner::arts(), "abcd", "tok");
//! let url = source.tile_url(TileCoord::new(0, 0, 1)).unwrap();
//! assert!(url.starts_with("https://lh3.googleusercontent.com/abcd=x0-y0-z1-t"));
//! ```

mod arts;
mod http;
mod signer;
mod types;

pub use arts::ArtsTileSource;
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use signer::{UrlSigner, DEFAULT_BASE_URL, DEFAULT_SIGNING_KEY};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
