//! Download command - fetch, decrypt and stitch an image.

use std::path::PathBuf;
use std::sync::Arc;

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use gapdecoder::config::{DownloadConfig, OutputConfig};
use gapdecoder::crypto::MarkerPolicy;
use gapdecoder::metadata::ImageInfo;
use gapdecoder::service::{DownloadService, ServiceError};

use crate::error::CliError;
use crate::progress::ConsoleProgress;
use crate::runner::CliRunner;

/// Arguments for the download command.
pub struct DownloadArgs {
    pub url: Option<String>,
    pub zoom: Option<i64>,
    pub outfile: Option<PathBuf>,
    pub quality: Option<u32>,
    pub concurrency: Option<usize>,
    pub keep_tiles: bool,
    pub require_marker: bool,
    pub debug: bool,
}

/// Run the download command.
pub fn run(args: DownloadArgs) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(args.debug)?;
    runner.log_startup("download");
    let config = runner.config();

    let download = apply_download_overrides(config.download_config(), &args);
    let output = apply_output_overrides(config.output_config(), &args);

    // Reject a bad quality before touching the network
    output.jpeg_output().map_err(ServiceError::InvalidOutput)?;

    let theme = ColorfulTheme::default();
    let url = match args.url {
        Some(url) => url,
        None => prompt_url(&theme)?,
    };

    let service = DownloadService::with_reqwest(download, output)?
        .with_observer(Arc::new(ConsoleProgress::new()));

    let info = runner.block_on(service.fetch_info(&url))?;

    let zoom = match args.zoom {
        Some(zoom) => zoom,
        None => prompt_zoom(&theme, &info)?,
    };

    let start = std::time::Instant::now();
    let report = runner.block_on(service.download(&info, zoom, args.outfile.as_deref()))?;
    let elapsed = start.elapsed();

    let (width, height) = report.level.size();
    let size_mb = report.bytes as f64 / 1_048_576.0;
    println!(
        "{} Saved {} ({} x {}, {:.2} MB) in {:.2}s",
        style("✓").green(),
        report.output_path.display(),
        width,
        height,
        size_mb,
        elapsed.as_secs_f64()
    );
    if report.tiles_kept {
        println!(
            "  Tiles kept in {}",
            service.output_config().tiles_path(&report.name).display()
        );
    }

    Ok(())
}

fn apply_download_overrides(mut config: DownloadConfig, args: &DownloadArgs) -> DownloadConfig {
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if args.require_marker {
        config = config.with_marker_policy(MarkerPolicy::Require);
    }
    config
}

fn apply_output_overrides(mut config: OutputConfig, args: &DownloadArgs) -> OutputConfig {
    if let Some(quality) = args.quality {
        config = config.with_quality(quality);
    }
    if args.keep_tiles {
        config = config.with_keep_tiles(true);
    }
    config
}

fn prompt_url(theme: &ColorfulTheme) -> Result<String, CliError> {
    let url: String = Input::with_theme(theme)
        .with_prompt("Image URL")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.starts_with("http://") || input.starts_with("https://") {
                Ok(())
            } else {
                Err("Enter a full http(s) URL")
            }
        })
        .interact_text()?;
    Ok(url.trim().to_string())
}

/// Lists the image's levels and asks for one, highest resolution first.
fn prompt_zoom(theme: &ColorfulTheme, info: &ImageInfo) -> Result<i64, CliError> {
    println!("{}", style(info.name()).bold());

    let levels: Vec<String> = info.levels().iter().map(ToString::to_string).collect();
    let default = levels.len().saturating_sub(1);

    let selected = Select::with_theme(theme)
        .with_prompt("Zoom level")
        .items(&levels)
        .default(default)
        .interact()?;

    Ok(selected as i64)
}
