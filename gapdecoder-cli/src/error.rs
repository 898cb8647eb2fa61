//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use gapdecoder::config::ConfigFileError;
use gapdecoder::metadata::MetadataError;
use gapdecoder::service::ServiceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Interactive prompt failed
    Prompt(dialoguer::Error),
    /// Download, decryption or save failed
    Service(ServiceError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Service(ServiceError::Metadata(MetadataError::TokenNotFound)) => {
                eprintln!();
                eprintln!("The page did not contain image tokens. Make sure the URL points");
                eprintln!("to a single asset page, for example:");
                eprintln!("  https://artsandculture.google.com/asset/<name>/<id>");
            }
            CliError::Service(ServiceError::Fetch { .. }) => {
                eprintln!();
                eprintln!("Tiles downloaded so far were kept. Run the same command again");
                eprintln!("to resume from them.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Prompt(e) => write!(f, "Prompt failed: {}", e),
            CliError::Service(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Runtime(e) => Some(e),
            CliError::Prompt(e) => Some(e),
            CliError::Service(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::Service(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::Prompt(e)
    }
}
