//! Bit expansion of blobs, most significant bit of every byte first.

use std::io::{Cursor, Result};

use bitstream_io::{BigEndian, BitRead, BitReader};

/// Expands bytes into one `bool` per bit, MSB first per byte
pub fn expand(bytes: &[u8]) -> Result<Vec<bool>> {
    let mut reader = BitReader::endian(Cursor::new(bytes), BigEndian);

    (0..bytes.len() << 3).map(|_| reader.read_bit()).collect()
}
