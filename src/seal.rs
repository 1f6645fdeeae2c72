use aes_gcm::aead::consts::U12;
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Key, Nonce};
use thiserror::Error;

// The crate ships 128/256 aliases, the 192 tier is the same composition
type Aes192Gcm = AesGcm<Aes192, U12>;

/// Nonce prefix length of a sealed blob, fixed by GCM.
pub const NONCE_SIZE: usize = 12;

/// Authentication tag length appended to the ciphertext.
pub const TAG_SIZE: usize = 16;

#[derive(Error, Debug)]
pub enum SealError {
    #[error("invalid key length {len}, must be 16, 24, or 32 bytes")]
    InvalidKeyLength { len: usize },
    #[error("sealed blob of {len} bytes is too short to hold a nonce")]
    BlobTooShort { len: usize },
    #[error("cipher failure while sealing")]
    Cipher,
    #[error("authentication failed")]
    AuthenticationFailed,
}

enum Cipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

/// Authenticated-encryption codec over single byte blobs.
///
/// [`seal`](Sealer::seal) emits `nonce || ciphertext || tag` as one blob,
/// [`open`](Sealer::open) takes that blob apart and verifies it. The codec
/// knows nothing about framing or compression.
pub struct Sealer {
    cipher: Cipher,
}

impl Sealer {
    /// Key length selects the AES strength and is the only thing checked
    /// here. Happens once per writer/reader, not per record.
    pub fn new(key: &[u8]) -> Result<Self, SealError> {
        let cipher = match key.len() {
            16 => Cipher::Aes128(Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(key))),
            24 => Cipher::Aes192(Aes192Gcm::new(Key::<Aes192Gcm>::from_slice(key))),
            32 => Cipher::Aes256(Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key))),
            len => return Err(SealError::InvalidKeyLength { len }),
        };

        Ok(Sealer { cipher })
    }

    /// Seal one plaintext. The nonce comes fresh from the OS CSPRNG on
    /// every call, reuse under the same key would break the
    /// authentication guarantee.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, SealError> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = match &self.cipher {
            Cipher::Aes128(cipher) => cipher.encrypt(nonce, plaintext),
            Cipher::Aes192(cipher) => cipher.encrypt(nonce, plaintext),
            Cipher::Aes256(cipher) => cipher.encrypt(nonce, plaintext),
        }
        .map_err(|_| SealError::Cipher)?;

        let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    /// Open a sealed blob. Anything past the nonce prefix is ciphertext
    /// plus tag, a wrong key and a flipped bit are indistinguishable
    /// here and neither yields any plaintext.
    pub fn open(&self, blob: &[u8]) -> Result<Vec<u8>, SealError> {
        if blob.len() < NONCE_SIZE {
            return Err(SealError::BlobTooShort { len: blob.len() });
        }

        let (nonce, ciphertext) = blob.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce);

        match &self.cipher {
            Cipher::Aes128(cipher) => cipher.decrypt(nonce, ciphertext),
            Cipher::Aes192(cipher) => cipher.decrypt(nonce, ciphertext),
            Cipher::Aes256(cipher) => cipher.decrypt(nonce, ciphertext),
        }
        .map_err(|_| SealError::AuthenticationFailed)
    }
}
