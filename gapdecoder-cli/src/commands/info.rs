//! Info command - list the zoom levels of an image.

use gapdecoder::service::DownloadService;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the info command.
pub struct InfoArgs {
    pub url: String,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("info");
    let config = runner.config();

    let service = DownloadService::with_reqwest(config.download_config(), config.output_config())?;
    let info = runner.block_on(service.fetch_info(&args.url))?;

    println!("{}", info);
    Ok(())
}
