//! Download pipeline facade.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use super::error::ServiceError;
use crate::batch::{BatchCoordinator, NoOpProgress, SharedObserver};
use crate::cache::TileCache;
use crate::config::{DownloadConfig, OutputConfig};
use crate::coord::{TileCoord, ZoomLevel};
use crate::crypto::TileDecryptor;
use crate::metadata::ImageInfo;
use crate::mosaic::{JpegOutput, MosaicAssembler};
use crate::provider::{AsyncHttpClient, AsyncReqwestClient};
use crate::retry::with_backoff;

/// Outcome of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    /// Image name
    pub name: String,
    /// Zoom level that was downloaded
    pub level: ZoomLevel,
    /// Written image
    pub output_path: PathBuf,
    /// Size of the written image in bytes
    pub bytes: u64,
    /// Number of tiles assembled
    pub tiles: usize,
    /// Whether the tile directory was left in place
    pub tiles_kept: bool,
}

/// Ties metadata discovery, tile download, decryption and assembly together.
///
/// Generic over the HTTP client so tests can run the whole pipeline
/// against an in-memory server.
pub struct DownloadService<C> {
    client: C,
    download: DownloadConfig,
    output: OutputConfig,
    observer: SharedObserver,
}

impl DownloadService<AsyncReqwestClient> {
    /// Service backed by a `reqwest` client using the configured timeout.
    pub fn with_reqwest(download: DownloadConfig, output: OutputConfig) -> Result<Self, ServiceError> {
        let client = AsyncReqwestClient::with_timeout(download.timeout_secs())?;
        Ok(Self::new(client, download, output))
    }
}

impl<C: AsyncHttpClient> DownloadService<C> {
    pub fn new(client: C, download: DownloadConfig, output: OutputConfig) -> Self {
        Self {
            client,
            download,
            output,
            observer: Arc::new(NoOpProgress),
        }
    }

    /// Reports tile download progress to `observer`.
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn download_config(&self) -> &DownloadConfig {
        &self.download
    }

    pub fn output_config(&self) -> &OutputConfig {
        &self.output
    }

    /// Discovers the tokens and zoom levels of an asset page.
    pub async fn fetch_info(&self, page_url: &str) -> Result<ImageInfo, ServiceError> {
        Ok(ImageInfo::fetch(&self.client, page_url).await?)
    }

    /// Downloads zoom level `zoom` of `info` and writes it as a JPEG.
    ///
    /// `zoom` may be negative to count from the most detailed level. The
    /// image goes to `outfile`, or `<output directory>/<image name>.jpg`.
    ///
    /// Tiles are cached in the tile directory while downloading. The
    /// directory is removed after a successful save unless tiles are kept,
    /// and always left in place on failure so a re-run can resume.
    pub async fn download(
        &self,
        info: &ImageInfo,
        zoom: i64,
        outfile: Option<&Path>,
    ) -> Result<DownloadReport, ServiceError> {
        let jpeg = self.output.jpeg_output().map_err(ServiceError::InvalidOutput)?;
        let level = info.resolve_zoom(zoom);
        let output_path = outfile
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.output.output_path(info.name()));

        let cache = TileCache::open(self.output.tiles_path(info.name()))
            .await
            .map_err(ServiceError::Cache)?;

        let tiles = self.fetch_level(info, &level, &cache).await?;
        let tile_count = tiles.len();

        info!("Downloaded all tiles. Saving...");
        prepare_parent(&output_path).await?;
        let bytes = self.assemble_and_save(level, tiles, jpeg, output_path.clone()).await?;

        let tiles_kept = self.output.keep_tiles();
        if !tiles_kept {
            if let Err(e) = cache.remove_all().await {
                warn!(error = %e, "Failed to remove tile directory");
            }
        }

        Ok(DownloadReport {
            name: info.name().to_string(),
            level,
            output_path,
            bytes,
            tiles: tile_count,
            tiles_kept,
        })
    }

    /// Downloads every tile of `level` through `cache`.
    ///
    /// Tiles are returned in column-major order, paired with their
    /// coordinates. The first tile that still fails after its retries
    /// aborts the whole level.
    pub async fn fetch_level(
        &self,
        info: &ImageInfo,
        level: &ZoomLevel,
        cache: &TileCache,
    ) -> Result<Vec<(TileCoord, Vec<u8>)>, ServiceError> {
        let policy = self.download.retry_policy();
        let client = &self.client;

        let mut tasks = Vec::with_capacity(level.total_tiles());
        for tile in level.tiles() {
            let url = info
                .tile_url(tile)
                .map_err(|source| ServiceError::Sign { tile, source })?;
            tasks.push(async move {
                let url = url.as_str();
                let bytes = with_backoff(&policy, move || cache.fetch_or_load(client, tile, url))
                    .await
                    .map_err(|source| ServiceError::Fetch { tile, source })?;
                Ok::<_, ServiceError>((tile, bytes))
            });
        }

        info!(
            level = level.level,
            tiles = tasks.len(),
            concurrency = self.download.concurrency(),
            "Downloading tiles"
        );

        BatchCoordinator::new()
            .with_concurrency(self.download.concurrency())
            .with_observer(Arc::clone(&self.observer))
            .run_all(tasks)
            .await
    }

    async fn assemble_and_save(
        &self,
        level: ZoomLevel,
        tiles: Vec<(TileCoord, Vec<u8>)>,
        jpeg: JpegOutput,
        path: PathBuf,
    ) -> Result<u64, ServiceError> {
        let decryptor = TileDecryptor::arts().with_policy(self.download.marker_policy());

        tokio::task::spawn_blocking(move || {
            let clear = tiles
                .into_iter()
                .map(|(tile, bytes)| {
                    decryptor
                        .decrypt(&bytes)
                        .map(|plain| (tile, plain))
                        .map_err(|source| ServiceError::Decrypt { tile, source })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let image = MosaicAssembler::new()
                .assemble(&level, clear)
                .map_err(|source| ServiceError::Assemble {
                    level: level.level,
                    source,
                })?;

            jpeg.save(&image, &path)
                .map_err(|source| ServiceError::Save { path, source })
        })
        .await
        .map_err(|e| ServiceError::Task(e.to_string()))?
    }
}

async fn prepare_parent(path: &Path) -> Result<(), ServiceError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ServiceError::Io {
                path: parent.to_path_buf(),
                source,
            }),
        _ => Ok(()),
    }
}
