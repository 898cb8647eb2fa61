//! Metadata discovery for Arts & Culture assets.
//!
//! An asset page embeds the image's tile-server path and signing token.
//! The pyramid description (`https:<base>=g`) lists the zoom levels.
//! [`ImageInfo`] combines both into what the downloader needs.

mod info;
mod page;
mod pyramid;

pub use info::ImageInfo;
pub use page::{extract_tokens, image_name_from_url, PageTokens};
pub use pyramid::parse_pyramid;

use thiserror::Error;

use crate::coord::CoordError;
use crate::provider::ProviderError;

/// Errors raised while discovering image metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("unable to find the image token in the asset page")]
    TokenNotFound,

    /// The built-in token pattern failed to compile
    #[error("invalid token pattern: {0}")]
    Pattern(String),

    #[error("invalid asset URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid pyramid description: {0}")]
    Xml(String),

    #[error("<{element}> is missing the {attribute} attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("<{element}> has an invalid {attribute} value {value:?}")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("pyramid description lists no zoom levels")]
    EmptyPyramid,

    #[error(transparent)]
    InvalidLevel(#[from] CoordError),

    #[error(transparent)]
    Request(#[from] ProviderError),
}
