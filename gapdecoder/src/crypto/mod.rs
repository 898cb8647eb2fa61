//! Tile payload decryption.
//!
//! Downloaded tiles may carry an AES-128-CBC encrypted region whose
//! position is described inside the payload itself. [`TileDecryptor`]
//! locates that region, decrypts it and splices the plaintext back in.
//!
//! # Example
//!
//! ```
//! use gapdecoder::crypto::TileDecryptor;
//!
//! let decryptor = TileDecryptor::arts();
//! let sealed = decryptor.seal(b"head", &[0u8; 16], b"tail").unwrap();
//!
//! let mut expected = b"head".to_vec();
//! expected.extend_from_slice(&[0u8; 16]);
//! expected.extend_from_slice(b"tail");
//! assert_eq!(decryptor.decrypt(&sealed).unwrap(), expected);
//!
//! // Unmarked data passes through untouched.
//! assert_eq!(decryptor.decrypt(b"\xff\xd8\xff").unwrap(), b"\xff\xd8\xff");
//! ```

mod cipher;
mod decryptor;
mod envelope;

pub use cipher::{TileCipher, ARTS_AES_IV, ARTS_AES_KEY, BLOCK_SIZE};
pub use decryptor::{MarkerPolicy, TileDecryptor};
pub use envelope::{seal, Envelope, DEFAULT_MARKER};

use thiserror::Error;

/// Errors produced while decrypting a tile payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptError {
    #[error("tile has no encryption marker")]
    MissingMarker,

    #[error("ciphertext offset {offset} is outside the {body_len}-byte envelope body")]
    InvalidOffset { offset: i32, body_len: usize },

    #[error("ciphertext length {count} exceeds the {available} bytes available")]
    InvalidLength { count: i32, available: usize },

    #[error("ciphertext length {len} is not a multiple of the 16-byte block size")]
    UnalignedCiphertext { len: usize },
}
