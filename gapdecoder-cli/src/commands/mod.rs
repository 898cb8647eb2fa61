//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`download`] - Download and stitch an image
//! - [`info`] - List an image's zoom levels
//! - [`decrypt`] - Decrypt a single tile file

pub mod decrypt;
pub mod download;
pub mod info;
