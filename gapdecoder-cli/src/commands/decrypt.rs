//! Decrypt command - decrypt one downloaded tile file.

use std::path::PathBuf;

use gapdecoder::crypto::MarkerPolicy;
use gapdecoder::service::decrypt_file;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the decrypt command.
pub struct DecryptArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub require_marker: bool,
}

/// Run the decrypt command.
pub fn run(args: DecryptArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("decrypt");

    let policy = if args.require_marker {
        MarkerPolicy::Require
    } else {
        runner.config().download_config().marker_policy()
    };

    let bytes = runner.block_on(decrypt_file(&args.input, &args.output, policy))?;
    println!("Decrypted {} ({} bytes)", args.output.display(), bytes);
    Ok(())
}
