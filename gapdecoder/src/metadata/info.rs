//! Image description assembled from the asset page and its pyramid.

use std::fmt;

use tracing::{debug, info, warn};

use super::page::{extract_tokens, image_name_from_url, PageTokens};
use super::pyramid::parse_pyramid;
use super::MetadataError;
use crate::coord::{TileCoord, ZoomLevel};
use crate::provider::{ArtsTileSource, AsyncHttpClient, ProviderError, UrlSigner};

/// Everything needed to download one image.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    name: String,
    tokens: PageTokens,
    source: ArtsTileSource,
    levels: Vec<ZoomLevel>,
}

impl ImageInfo {
    /// Downloads the asset page and pyramid description for `page_url`.
    pub async fn fetch<C: AsyncHttpClient>(
        client: &C,
        page_url: &str,
    ) -> Result<Self, MetadataError> {
        info!(url = page_url, "Downloading image meta-information");
        let page = client.get(page_url).await?;
        let tokens = extract_tokens(&page)?;

        let pyramid_url = tokens.pyramid_url();
        debug!(url = %pyramid_url, "Downloading pyramid description");
        let pyramid = client.get(&pyramid_url).await?;

        Self::from_tokens(page_url, tokens, &pyramid)
    }

    /// Builds the description from already downloaded documents.
    pub fn from_documents(
        page_url: &str,
        page_source: &[u8],
        pyramid_xml: &[u8],
    ) -> Result<Self, MetadataError> {
        let tokens = extract_tokens(page_source)?;
        Self::from_tokens(page_url, tokens, pyramid_xml)
    }

    fn from_tokens(
        page_url: &str,
        tokens: PageTokens,
        pyramid_xml: &[u8],
    ) -> Result<Self, MetadataError> {
        let name = image_name_from_url(page_url)?;
        let xml = std::str::from_utf8(pyramid_xml)
            .map_err(|e| MetadataError::Xml(e.to_string()))?;
        let levels = parse_pyramid(xml)?;
        let source = ArtsTileSource::new(
            UrlSigner::arts(),
            tokens.path_token.clone(),
            tokens.auth_token.clone(),
        );

        debug!(name = %name, levels = levels.len(), "Parsed image metadata");
        Ok(Self {
            name,
            tokens,
            source,
            levels,
        })
    }

    /// Human readable name, also used for output and tile directory names.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tokens(&self) -> &PageTokens {
        &self.tokens
    }

    pub fn tile_source(&self) -> &ArtsTileSource {
        &self.source
    }

    /// Zoom levels, coarsest first. Never empty.
    pub fn levels(&self) -> &[ZoomLevel] {
        &self.levels
    }

    pub fn level(&self, z: u32) -> Option<&ZoomLevel> {
        self.levels.get(z as usize)
    }

    /// Signed download URL of `tile`.
    pub fn tile_url(&self, tile: TileCoord) -> Result<String, ProviderError> {
        self.source.tile_url(tile)
    }

    /// Maps a user supplied zoom index to a level.
    ///
    /// Indices past the last level select the last level. Negative indices
    /// count from the end, so `-1` is the most detailed level.
    pub fn resolve_zoom(&self, z: i64) -> ZoomLevel {
        let count = self.levels.len() as i64;
        let mut index = z;
        if index >= count {
            warn!(
                requested = z,
                max = count - 1,
                "Invalid zoom level, using the maximum zoom level instead"
            );
            index = count - 1;
        }
        self.levels[index.rem_euclid(count) as usize]
    }
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - zoom levels:", self.name)?;
        for level in &self.levels {
            write!(f, "\n{}", level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    const PAGE_URL: &str = "https://artsandculture.google.com/asset/the-starry-night/bgEuwDxel93-Pg";
    const PAGE: &[u8] = b"[0]\n,\"//lh3.googleusercontent.com/wGcDNN8L-2COcm9toX5BTp6HPxpMPPPuxrMU-ZL-W-nDHW8I_L4R5vlBJ6ITtlmONQ\",\"KwCgJ1QIfgprHn0a93x7Q-HhJ04\"";
    const PYRAMID: &[u8] = br#"<TileInfo tile_width="512" tile_height="512">
        <pyramid_level num_tiles_x="1" num_tiles_y="1" empty_pels_x="137" empty_pels_y="262"/>
        <pyramid_level num_tiles_x="2" num_tiles_y="1" empty_pels_x="274" empty_pels_y="12"/>
        <pyramid_level num_tiles_x="3" num_tiles_y="2" empty_pels_x="36" empty_pels_y="24"/>
    </TileInfo>"#;

    fn info() -> ImageInfo {
        ImageInfo::from_documents(PAGE_URL, PAGE, PYRAMID).unwrap()
    }

    #[test]
    fn test_from_documents() {
        let info = info();
        assert_eq!(info.name(), "The Starry Night - bgEuwDxel93-Pg");
        assert_eq!(info.levels().len(), 3);
        assert_eq!(info.level(2).unwrap().size(), (1500, 1000));
        assert!(info.level(3).is_none());
    }

    #[test]
    fn test_tile_url_uses_page_tokens() {
        assert_eq!(
            info().tile_url(TileCoord::new(0, 0, 7)).unwrap(),
            "https://lh3.googleusercontent.com/wGcDNN8L-2COcm9toX5BTp6HPxpMPPPuxrMU-ZL-W-nDHW8I_L4R5vlBJ6ITtlmONQ=x0-y0-z7-tHeJ3xylnSyyHPGwMZimI4EV3JP8"
        );
    }

    #[test]
    fn test_resolve_zoom() {
        let info = info();
        assert_eq!(info.resolve_zoom(0).level, 0);
        assert_eq!(info.resolve_zoom(2).level, 2);
        assert_eq!(info.resolve_zoom(3).level, 2);
        assert_eq!(info.resolve_zoom(99).level, 2);
        assert_eq!(info.resolve_zoom(-1).level, 2);
        assert_eq!(info.resolve_zoom(-3).level, 0);
        assert_eq!(info.resolve_zoom(-4).level, 2);
    }

    #[test]
    fn test_display_lists_levels() {
        let text = info().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "The Starry Night - bgEuwDxel93-Pg - zoom levels:");
        assert_eq!(lines[1], "level  0:    375 x    250 (     1 tiles)");
        assert_eq!(lines[3], "level  2:   1500 x   1000 (     6 tiles)");
    }

    #[tokio::test]
    async fn test_fetch_downloads_page_then_pyramid() {
        let client = MockAsyncHttpClient::new(Err(ProviderError::HttpStatus {
            status: 404,
            url: "unrouted".to_string(),
        }))
        .route(PAGE_URL, PAGE.to_vec())
        .route(
            "https://lh3.googleusercontent.com/wGcDNN8L-2COcm9toX5BTp6HPxpMPPPuxrMU-ZL-W-nDHW8I_L4R5vlBJ6ITtlmONQ=g",
            PYRAMID.to_vec(),
        );

        let info = ImageInfo::fetch(&client, PAGE_URL).await.unwrap();

        assert_eq!(client.calls(), 2);
        assert_eq!(info.levels().len(), 3);
        assert_eq!(info.tokens().auth_token, "KwCgJ1QIfgprHn0a93x7Q-HhJ04");
    }

    #[tokio::test]
    async fn test_fetch_propagates_http_errors() {
        let client = MockAsyncHttpClient::new(Err(ProviderError::HttpStatus {
            status: 500,
            url: PAGE_URL.to_string(),
        }));

        let err = ImageInfo::fetch(&client, PAGE_URL).await.unwrap_err();
        assert!(matches!(
            err,
            MetadataError::Request(ProviderError::HttpStatus { status: 500, .. })
        ));
    }
}
