//! Provider error types

use crate::retry::Retryable;
use thiserror::Error;

/// Errors that can occur while addressing or requesting tiles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The request could not be sent or the body could not be read
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The signed address could not be computed from the given tokens
    #[error("cannot sign tile address: {0}")]
    Signature(String),
}

impl ProviderError {
    /// Builds a transport error for `url`.
    pub fn transport(url: &str, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: message.into(),
        }
    }
}

impl Retryable for ProviderError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::HttpStatus { .. } => true,
            Self::Signature(_) => false,
        }
    }
}
