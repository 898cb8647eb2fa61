//! Tile payload decryption.

use tracing::{debug, trace, warn};

use super::cipher::TileCipher;
use super::envelope::{self, Envelope, DEFAULT_MARKER};
use super::DecryptError;

/// What to do with a tile that lacks the encryption marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkerPolicy {
    /// Return the buffer unchanged.
    #[default]
    PassThrough,
    /// Treat the tile as malformed.
    Require,
}

/// Recovers cleartext tile images from downloaded payloads.
#[derive(Debug, Clone, Default)]
pub struct TileDecryptor {
    cipher: TileCipher,
    marker: [u8; 4],
    policy: MarkerPolicy,
}

impl TileDecryptor {
    pub fn new(cipher: TileCipher) -> Self {
        Self {
            cipher,
            marker: DEFAULT_MARKER,
            policy: MarkerPolicy::default(),
        }
    }

    /// Decryptor for Arts & Culture tiles.
    pub fn arts() -> Self {
        Self::new(TileCipher::arts())
    }

    pub fn with_marker(mut self, marker: [u8; 4]) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_policy(mut self, policy: MarkerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MarkerPolicy {
        self.policy
    }

    /// Decrypts one tile payload.
    ///
    /// The encrypted region is replaced by its plaintext and the envelope
    /// fields (marker, count and trailing index) are dropped. Buffers
    /// without the marker are returned unchanged under
    /// [`MarkerPolicy::PassThrough`].
    ///
    /// # Errors
    ///
    /// Returns a [`DecryptError`] when a marked envelope points outside
    /// itself, when the ciphertext is not block aligned, or when the marker
    /// is missing under [`MarkerPolicy::Require`].
    pub fn decrypt(&self, buffer: &[u8]) -> Result<Vec<u8>, DecryptError> {
        let Some(envelope) = Envelope::parse(buffer, &self.marker)? else {
            return match self.policy {
                MarkerPolicy::PassThrough => {
                    debug!(bytes = buffer.len(), "Tile has no encryption marker, passing through");
                    Ok(buffer.to_vec())
                }
                MarkerPolicy::Require => {
                    warn!(bytes = buffer.len(), "Tile has no encryption marker");
                    Err(DecryptError::MissingMarker)
                }
            };
        };

        trace!(
            prefix = envelope.prefix.len(),
            ciphertext = envelope.ciphertext.len(),
            suffix = envelope.suffix.len(),
            "Decrypting tile envelope"
        );

        let plain = self.cipher.decrypt(&buffer[envelope.ciphertext.clone()])?;

        let mut out = Vec::with_capacity(envelope.output_len());
        out.extend_from_slice(&buffer[envelope.prefix]);
        out.extend_from_slice(&plain);
        out.extend_from_slice(&buffer[envelope.suffix]);
        Ok(out)
    }

    /// Builds an encrypted payload that [`decrypt`](Self::decrypt) maps back
    /// to `prefix || plaintext || suffix`.
    pub fn seal(
        &self,
        prefix: &[u8],
        plaintext: &[u8],
        suffix: &[u8],
    ) -> Result<Vec<u8>, DecryptError> {
        let ciphertext = self.cipher.encrypt(plaintext)?;
        Ok(envelope::seal(&self.marker, prefix, &ciphertext, suffix))
    }
}
