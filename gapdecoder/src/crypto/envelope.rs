//! Tile envelope layout.
//!
//! An encrypted tile is laid out as:
//!
//! ```text
//! marker (4) | body | index (4, i32 LE)
//! body = prefix (index bytes) | count (4, i32 LE) | ciphertext (count) | suffix
//! ```
//!
//! The ciphertext position and length travel inside the buffer, so parsing
//! works on ranges rather than a fixed struct layout.

use std::ops::Range;

use super::DecryptError;

/// Length of the leading marker and trailing index fields.
pub const FIELD_LEN: usize = 4;

/// Marker found at the start of every encrypted tile.
pub const DEFAULT_MARKER: [u8; 4] = [0x0A; 4];

/// Byte ranges of an encrypted envelope, relative to the full buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Bytes before the count field
    pub prefix: Range<usize>,
    /// Encrypted region
    pub ciphertext: Range<usize>,
    /// Bytes after the ciphertext, up to the trailing index
    pub suffix: Range<usize>,
}

impl Envelope {
    /// Locates the encrypted region of `buffer`.
    ///
    /// Returns `Ok(None)` when the buffer is too short or does not start
    /// with `marker`. A marked buffer with an index or count pointing
    /// outside the body is an error.
    pub fn parse(buffer: &[u8], marker: &[u8; 4]) -> Result<Option<Self>, DecryptError> {
        if buffer.len() < 2 * FIELD_LEN || buffer[..FIELD_LEN] != marker[..] {
            return Ok(None);
        }

        let body = FIELD_LEN..buffer.len() - FIELD_LEN;
        let index = read_i32_le(buffer, body.end);

        let count_at = usize::try_from(index)
            .ok()
            .map(|offset| body.start + offset)
            .filter(|&at| at + FIELD_LEN <= body.end)
            .ok_or(DecryptError::InvalidOffset {
                offset: index,
                body_len: body.len(),
            })?;

        let count = read_i32_le(buffer, count_at);
        let data_start = count_at + FIELD_LEN;
        let available = body.end - data_start;

        let data_end = usize::try_from(count)
            .ok()
            .filter(|&len| len <= available)
            .map(|len| data_start + len)
            .ok_or(DecryptError::InvalidLength { count, available })?;

        Ok(Some(Self {
            prefix: body.start..count_at,
            ciphertext: data_start..data_end,
            suffix: data_end..body.end,
        }))
    }

    /// Length of the decrypted output.
    pub fn output_len(&self) -> usize {
        self.prefix.len() + self.ciphertext.len() + self.suffix.len()
    }
}

/// Builds an envelope around already encrypted bytes.
pub fn seal(marker: &[u8; 4], prefix: &[u8], ciphertext: &[u8], suffix: &[u8]) -> Vec<u8> {
    let mut out =
        Vec::with_capacity(3 * FIELD_LEN + prefix.len() + ciphertext.len() + suffix.len());
    out.extend_from_slice(marker);
    out.extend_from_slice(prefix);
    out.extend_from_slice(&(ciphertext.len() as i32).to_le_bytes());
    out.extend_from_slice(ciphertext);
    out.extend_from_slice(suffix);
    out.extend_from_slice(&(prefix.len() as i32).to_le_bytes());
    out
}

fn read_i32_le(buffer: &[u8], at: usize) -> i32 {
    let mut field = [0u8; FIELD_LEN];
    field.copy_from_slice(&buffer[at..at + FIELD_LEN]);
    i32::from_le_bytes(field)
}
