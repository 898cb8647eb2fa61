//! gapdecoder CLI - Command-line interface
//!
//! Downloads high-resolution images from Google Arts & Culture by fetching,
//! decrypting and stitching their tiles.

mod commands;
mod error;
mod progress;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{decrypt, download, info};

#[derive(Parser)]
#[command(name = "gapdecoder")]
#[command(version = gapdecoder::VERSION)]
#[command(about = "Download high-resolution images from Google Arts & Culture", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download an image at the chosen zoom level
    Download {
        /// Asset page URL (prompted for when omitted)
        url: Option<String>,

        /// Zoom level; negative values count from the highest level
        #[arg(long, short, allow_negative_numbers = true)]
        zoom: Option<i64>,

        /// Output file (default: "<image name>.jpg" in the output directory)
        #[arg(long, short)]
        outfile: Option<PathBuf>,

        /// JPEG quality, 0-95
        #[arg(long)]
        quality: Option<u32>,

        /// Maximum tiles downloaded at once, 0 for unbounded
        #[arg(long)]
        concurrency: Option<usize>,

        /// Keep the downloaded tiles after saving the image
        #[arg(long)]
        keep_tiles: bool,

        /// Reject tiles that lack the encryption marker
        #[arg(long)]
        require_marker: bool,

        /// Enable debug logging on stderr
        #[arg(long)]
        debug: bool,
    },

    /// Show the zoom levels available for an image
    Info {
        /// Asset page URL
        url: String,
    },

    /// Decrypt a single downloaded tile file
    Decrypt {
        /// Encrypted tile
        input: PathBuf,

        /// Decrypted image to write
        output: PathBuf,

        /// Reject input that lacks the encryption marker
        #[arg(long)]
        require_marker: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Download {
            url,
            zoom,
            outfile,
            quality,
            concurrency,
            keep_tiles,
            require_marker,
            debug,
        } => download::run(download::DownloadArgs {
            url,
            zoom,
            outfile,
            quality,
            concurrency,
            keep_tiles,
            require_marker,
            debug,
        }),
        Commands::Info { url } => info::run(info::InfoArgs { url }),
        Commands::Decrypt {
            input,
            output,
            require_marker,
        } => decrypt::run(decrypt::DecryptArgs {
            input,
            output,
            require_marker,
        }),
    };

    if let Err(e) = result {
        e.exit();
    }
}
