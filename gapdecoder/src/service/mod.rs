//! High-level download service.
//!
//! [`DownloadService`] runs the complete pipeline for one image:
//!
//! 1. validate output settings (before any network access)
//! 2. resolve the zoom level and open the tile directory
//! 3. sign and fetch every tile concurrently, with retry and caching
//! 4. decrypt and assemble the tiles off the async runtime
//! 5. write the JPEG and clean up the tile directory
//!
//! [`decrypt_file`] decrypts a single downloaded tile.

mod error;
mod facade;
mod file;

pub use error::ServiceError;
pub use facade::{DownloadReport, DownloadService};
pub use file::decrypt_file;
