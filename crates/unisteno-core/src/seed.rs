//! Password to placement seed derivation.

use sha2::{Digest, Sha256};

/// 64 bit seed that drives the placement permutation
pub type Seed = u64;

/// Seed used when no password is given, placement is then public knowledge
pub const NO_PASSWORD_SEED: Seed = 0;

/// Derives the placement seed of a password.
///
/// An empty password maps to [`NO_PASSWORD_SEED`], any other password to the first
/// 8 bytes (big endian) of the SHA-256 digest over its UTF-8 bytes.
pub fn seed_from_password(password: &str) -> Seed {
    if password.is_empty() {
        return NO_PASSWORD_SEED;
    }

    let digest = Sha256::digest(password.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);

    Seed::from_be_bytes(head)
}
