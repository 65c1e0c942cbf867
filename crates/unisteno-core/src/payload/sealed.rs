//! Length prefixed encryption envelope around a frame.
//!
//! `sealedLen (4, big endian) | salt (16) | nonce (12) | tag (16) | ciphertext`

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use unisteno_cipher::{decrypt_data, encrypt_data, KdfParams, SEAL_OVERHEAD};
use zeroize::Zeroizing;

use super::frame::{read_field, truncated, FrameLayout};
use crate::error::FormatIssue;
use crate::result::Result;

/// Width of the length prefix in front of the envelope
pub const SEALED_LEN_FIELD: usize = 4;

/// Bytes sealing adds on top of a frame
pub const SEALED_OVERHEAD: usize = SEALED_LEN_FIELD + SEAL_OVERHEAD;

pub fn seal(frame: &[u8], password: &str, kdf: &KdfParams) -> Result<Vec<u8>> {
    let envelope = encrypt_data(password, frame, kdf)?;
    let sealed_len = u32::try_from(envelope.len())
        .map_err(|_| FormatIssue::SealedLengthOutOfBounds(envelope.len()))?;

    let mut sealed = Vec::with_capacity(SEALED_LEN_FIELD + envelope.len());
    sealed.write_u32::<BigEndian>(sealed_len)?;
    sealed.extend_from_slice(&envelope);

    Ok(sealed)
}

/// Reads one envelope and returns the frame bytes inside, wiped on drop
pub fn open(
    src: &mut dyn Read,
    layout: &FrameLayout,
    password: &str,
    kdf: &KdfParams,
) -> Result<Zeroizing<Vec<u8>>> {
    let sealed_len = src.read_u32::<BigEndian>().map_err(truncated)? as usize;
    if !(SEAL_OVERHEAD..=layout.max_frame_len() + SEAL_OVERHEAD).contains(&sealed_len) {
        return Err(FormatIssue::SealedLengthOutOfBounds(sealed_len).into());
    }

    let envelope = read_field(src, sealed_len)?;
    let frame = decrypt_data(password, &envelope, kdf)?;

    Ok(Zeroizing::new(frame))
}
