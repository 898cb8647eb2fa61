//! AES-128-CBC primitive used for tile payloads.

use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use super::DecryptError;

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Key shared with the Arts & Culture tile service.
pub const ARTS_AES_KEY: [u8; 16] = [
    0x5b, 0x63, 0xdb, 0x11, 0x3b, 0x7a, 0xf3, 0xe0, 0xb1, 0x43, 0x55, 0x56, 0xc8, 0xf9, 0x53, 0x0c,
];

/// Initialisation vector shared with the Arts & Culture tile service.
pub const ARTS_AES_IV: [u8; 16] = [
    0x71, 0xe7, 0x04, 0x05, 0x35, 0x3a, 0x77, 0x8b, 0xfa, 0x6f, 0xbc, 0x30, 0x32, 0x1b, 0x95, 0x92,
];

/// Fixed-key AES-128-CBC cipher without padding.
#[derive(Clone, PartialEq, Eq)]
pub struct TileCipher {
    key: [u8; 16],
    iv: [u8; 16],
}

impl TileCipher {
    pub fn new(key: [u8; 16], iv: [u8; 16]) -> Self {
        Self { key, iv }
    }

    /// Cipher configured with the tile service's key and IV.
    pub fn arts() -> Self {
        Self::new(ARTS_AES_KEY, ARTS_AES_IV)
    }

    /// Decrypts `ciphertext`, whose length must be a multiple of 16.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, DecryptError> {
        check_aligned(ciphertext.len())?;

        let mut buf = ciphertext.to_vec();
        Aes128CbcDec::new(&self.key.into(), &self.iv.into())
            .decrypt_padded_mut::<NoPadding>(&mut buf)
            .map_err(|_| DecryptError::UnalignedCiphertext { len: ciphertext.len() })?;
        Ok(buf)
    }

    /// Encrypts `plaintext`, whose length must be a multiple of 16.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, DecryptError> {
        check_aligned(plaintext.len())?;

        let mut buf = plaintext.to_vec();
        let len = buf.len();
        Aes128CbcEnc::new(&self.key.into(), &self.iv.into())
            .encrypt_padded_mut::<NoPadding>(&mut buf, len)
            .map_err(|_| DecryptError::UnalignedCiphertext { len })?;
        Ok(buf)
    }
}

impl Default for TileCipher {
    fn default() -> Self {
        Self::arts()
    }
}

impl std::fmt::Debug for TileCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileCipher").finish_non_exhaustive()
    }
}

fn check_aligned(len: usize) -> Result<(), DecryptError> {
    if len % BLOCK_SIZE == 0 {
        Ok(())
    } else {
        Err(DecryptError::UnalignedCiphertext { len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn test_decrypt_known_vector() {
        let plain = TileCipher::arts()
            .decrypt(b"0123456789abcdef0123456789abcdef")
            .unwrap();
        assert_eq!(
            plain,
            hex("a35fd5bfdb47815bcbe4b39e596a9358e289e389da48c0e709b26ecc081563ac")
        );
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert!(TileCipher::arts().decrypt(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_unaligned_is_rejected() {
        let err = TileCipher::arts().decrypt(&[0u8; 17]).unwrap_err();
        assert!(matches!(err, DecryptError::UnalignedCiphertext { len: 17 }));
        assert!(TileCipher::arts().encrypt(&[0u8; 5]).is_err());
    }

    #[test]
    fn test_encrypt_inverts_decrypt() {
        let cipher = TileCipher::arts();
        let plain: Vec<u8> = (0u8..48).collect();
        let sealed = cipher.encrypt(&plain).unwrap();
        assert_ne!(sealed, plain);
        assert_eq!(cipher.decrypt(&sealed).unwrap(), plain);
    }
}
