//! Tile cache store with atomic writes.

use super::path::{temp_path, tile_path};
use crate::coord::TileCoord;
use crate::provider::{AsyncHttpClient, ProviderError};
use crate::retry::Retryable;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors from the tile cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing a cached tile failed
    #[error("cache I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tile was not cached and the request for it failed
    #[error(transparent)]
    Request(#[from] ProviderError),
}

impl CacheError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Retryable for CacheError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Io { .. } => true,
            Self::Request(e) => e.is_retryable(),
        }
    }
}

/// Directory of cached tiles for one image.
///
/// A tile file only ever appears complete: data is written to a temporary
/// sibling and renamed into place.
#[derive(Debug, Clone)]
pub struct TileCache {
    directory: PathBuf,
}

impl TileCache {
    /// Opens the cache at `directory`, creating it if needed.
    pub async fn open(directory: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let directory = directory.into();
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|e| CacheError::io(&directory, e))?;

        debug!(dir = %directory.display(), "Tile cache opened");
        Ok(Self { directory })
    }

    /// Root directory of the cache.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file holding `tile`.
    pub fn path_for(&self, tile: &TileCoord) -> PathBuf {
        tile_path(&self.directory, tile)
    }

    /// Returns the cached bytes of `tile`, if present.
    pub async fn get(&self, tile: &TileCoord) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(tile);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io(&path, e)),
        }
    }

    /// Stores `data` as the bytes of `tile`.
    pub async fn put(&self, tile: &TileCoord, data: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(tile);
        let temp = temp_path(&path);

        tokio::fs::write(&temp, data)
            .await
            .map_err(|e| CacheError::io(&temp, e))?;
        tokio::fs::rename(&temp, &path)
            .await
            .map_err(|e| CacheError::io(&path, e))?;

        Ok(())
    }

    /// Returns the bytes of `tile`, downloading them from `url` on a miss.
    ///
    /// A hit never touches the network. On a miss the full response body is
    /// stored before it is returned.
    pub async fn fetch_or_load<C>(
        &self,
        client: &C,
        tile: TileCoord,
        url: &str,
    ) -> Result<Vec<u8>, CacheError>
    where
        C: AsyncHttpClient,
    {
        if let Some(cached) = self.get(&tile).await? {
            trace!(x = tile.x, y = tile.y, z = tile.z, "Tile cache hit");
            return Ok(cached);
        }

        trace!(x = tile.x, y = tile.y, z = tile.z, "Tile cache miss");
        let data = client.get(url).await?;
        self.put(&tile, &data).await?;

        debug!(
            x = tile.x,
            y = tile.y,
            z = tile.z,
            bytes = data.len(),
            "Tile downloaded"
        );
        Ok(data)
    }

    /// Deletes the cache directory and everything in it.
    pub async fn remove_all(self) -> Result<(), CacheError> {
        match tokio::fs::remove_dir_all(&self.directory).await {
            Ok(()) => {
                info!(dir = %self.directory.display(), "Tile cache removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(&self.directory, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;
    use tempfile::TempDir;

    async fn open_cache() -> (TempDir, TileCache) {
        let temp_dir = TempDir::new().unwrap();
        let cache = TileCache::open(temp_dir.path().join("tiles")).await.unwrap();
        (temp_dir, cache)
    }

    #[tokio::test]
    async fn test_open_creates_directory() {
        let (_temp_dir, cache) = open_cache().await;
        assert!(cache.directory().is_dir());
    }

    #[tokio::test]
    async fn test_miss_downloads_and_stores() {
        let (_temp_dir, cache) = open_cache().await;
        let client = MockAsyncHttpClient::new(Ok(vec![1, 2, 3]));
        let tile = TileCoord::new(1, 2, 3);

        let data = cache.fetch_or_load(&client, tile, "http://t").await.unwrap();

        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(client.calls(), 1);
        assert_eq!(std::fs::read(cache.path_for(&tile)).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_hit_skips_network() {
        let (_temp_dir, cache) = open_cache().await;
        let tile = TileCoord::new(0, 0, 0);
        cache.put(&tile, b"cached").await.unwrap();

        let client = MockAsyncHttpClient::new(Ok(b"fresh".to_vec()));
        let data = cache.fetch_or_load(&client, tile, "http://t").await.unwrap();

        assert_eq!(data, b"cached".to_vec());
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_request_failure_writes_nothing() {
        let (_temp_dir, cache) = open_cache().await;
        let client = MockAsyncHttpClient::new(Err(ProviderError::HttpStatus {
            status: 500,
            url: "http://t".to_string(),
        }));
        let tile = TileCoord::new(4, 4, 1);

        let result = cache.fetch_or_load(&client, tile, "http://t").await;

        assert!(matches!(
            result,
            Err(CacheError::Request(ProviderError::HttpStatus { status: 500, .. }))
        ));
        assert!(!cache.path_for(&tile).exists());
        assert!(cache.get(&tile).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_leaves_no_temp_files() {
        let (_temp_dir, cache) = open_cache().await;
        cache.put(&TileCoord::new(1, 1, 1), &[7; 64]).await.unwrap();

        let temp_files: Vec<_> = std::fs::read_dir(cache.directory())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();

        assert!(temp_files.is_empty(), "Temp files should not remain");
    }

    #[tokio::test]
    async fn test_remove_all_deletes_directory() {
        let (_temp_dir, cache) = open_cache().await;
        cache.put(&TileCoord::new(0, 1, 2), b"x").await.unwrap();
        let dir = cache.directory().to_path_buf();

        cache.remove_all().await.unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_retry_classification() {
        let io_err = CacheError::io(Path::new("/x"), io::Error::other("disk"));
        assert!(io_err.is_retryable());

        let sig_err = CacheError::Request(ProviderError::Signature("bad".to_string()));
        assert!(!sig_err.is_retryable());
    }
}
