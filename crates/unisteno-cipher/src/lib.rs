//! # Password Sealing
//! Symmetric, password based encryption of framed payloads.
//!
//! A sealed blob is laid out as `salt(16) ∥ nonce(12) ∥ tag(16) ∥ ciphertext`.
//! The key is stretched from the password with argon2id, the data is encrypted with ChaCha20Poly1305.

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::aead::AeadInPlace;
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce, Tag};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

pub mod error;

pub use crate::error::CipherError;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Bytes a sealed blob carries on top of its plaintext
pub const SEAL_OVERHEAD: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

pub type Result<T> = std::result::Result<T, CipherError>;

/// Cost parameters of the argon2id key stretching.
///
/// Sealing and opening must use the same parameters, they are not stored in the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// memory cost in KiB
    pub memory_kib: u32,
    /// number of passes
    pub iterations: u32,
    /// degree of parallelism
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        // a bit above the argon2 defaults for time cost
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: 3,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Cheap parameters, meant for tests and benchmarks only
    pub fn light() -> Self {
        Self {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// encrypt data with password, it uses argon2id for key derivation and ChaCha20Poly1305 for encryption
pub fn encrypt_data(password: &str, data: &[u8], kdf: &KdfParams) -> Result<Vec<u8>> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let key = derive_key(password.as_bytes(), &salt, kdf)?;
    let encryptor = ChaCha20Poly1305::new(Key::from_slice(key.as_slice()));

    let mut sealed = Vec::with_capacity(SEAL_OVERHEAD + data.len());
    sealed.extend_from_slice(&salt);
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&[0u8; TAG_LEN]);
    sealed.extend_from_slice(data);

    let tag = encryptor
        .encrypt_in_place_detached(
            Nonce::from_slice(&nonce),
            b"",
            &mut sealed[SEAL_OVERHEAD..],
        )
        .map_err(CipherError::EncryptionError)?;
    sealed[SALT_LEN + NONCE_LEN..SEAL_OVERHEAD].copy_from_slice(tag.as_slice());

    nonce.zeroize();
    salt.zeroize();

    Ok(sealed)
}

/// decrypt data with password, the inverse of [`encrypt_data`]
pub fn decrypt_data(password: &str, data: &[u8], kdf: &KdfParams) -> Result<Vec<u8>> {
    if data.len() < SEAL_OVERHEAD {
        return Err(CipherError::Truncated(data.len(), SEAL_OVERHEAD));
    }
    let (salt, rest) = data.split_at(SALT_LEN);
    let (nonce, rest) = rest.split_at(NONCE_LEN);
    let (tag, ciphertext) = rest.split_at(TAG_LEN);

    let key = derive_key(password.as_bytes(), salt, kdf)?;
    let decryptor = ChaCha20Poly1305::new(Key::from_slice(key.as_slice()));

    let mut plain = ciphertext.to_vec();
    if let Err(e) = decryptor.decrypt_in_place_detached(
        Nonce::from_slice(nonce),
        b"",
        &mut plain,
        Tag::from_slice(tag),
    ) {
        plain.zeroize();
        return Err(CipherError::DecryptionError(e));
    }

    Ok(plain)
}

fn argon<'key>(kdf: &KdfParams) -> Result<Argon2<'key>> {
    let params = Params::new(
        kdf.memory_kib,
        kdf.iterations,
        kdf.parallelism,
        Some(KEY_LEN),
    )
    .map_err(CipherError::KeyDerivationParamError)?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn derive_key(password: &[u8], salt: &[u8], kdf: &KdfParams) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let mut output_key_material = Zeroizing::new([0u8; KEY_LEN]);
    argon(kdf)?
        .hash_password_into(password, salt, &mut output_key_material[..])
        .map_err(CipherError::KeyDerivationError)?;

    Ok(output_key_material)
}
