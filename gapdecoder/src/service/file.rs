//! Standalone tile file decryption.

use std::path::Path;

use tracing::info;

use super::error::ServiceError;
use crate::crypto::{MarkerPolicy, TileDecryptor};

/// Decrypts one downloaded tile file into a plain image file.
///
/// Returns the number of bytes written.
pub async fn decrypt_file(
    input: &Path,
    output: &Path,
    policy: MarkerPolicy,
) -> Result<usize, ServiceError> {
    let encrypted = tokio::fs::read(input)
        .await
        .map_err(|source| ServiceError::Io {
            path: input.to_path_buf(),
            source,
        })?;

    let decryptor = TileDecryptor::arts().with_policy(policy);
    let clear = decryptor
        .decrypt(&encrypted)
        .map_err(|source| ServiceError::DecryptFile {
            path: input.to_path_buf(),
            source,
        })?;

    tokio::fs::write(output, &clear)
        .await
        .map_err(|source| ServiceError::Io {
            path: output.to_path_buf(),
            source,
        })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = clear.len(),
        "Decrypted tile file"
    );
    Ok(clear.len())
}
