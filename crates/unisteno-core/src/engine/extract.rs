use std::io::{self, Cursor, Read};

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use log::debug;

use super::Engine;
use crate::media::{CarrierAdapter, ValidIndices};
use crate::options::CarrierProfile;
use crate::payload::{open, Frame};
use crate::permutation::{Placement, PlacementMode};
use crate::result::Result;
use crate::seed::{seed_from_password, Seed};

/// The name and payload recovered from a carrier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub name: String,
    pub payload: Vec<u8>,
}

impl From<Frame> for Extracted {
    fn from(frame: Frame) -> Self {
        Self {
            name: frame.name,
            payload: frame.payload,
        }
    }
}

/// Reads carrier bits in placement order and packs them MSB first into bytes.
///
/// Bits are pulled on demand, so a parser only ever reads as far as the declared
/// lengths take it. The stream ends when the readable units are exhausted.
pub struct CarrierBitReader<'c, C: CarrierAdapter + ?Sized> {
    carrier: &'c C,
    valid: ValidIndices,
    placement: Placement,
    next: usize,
    limit: usize,
}

impl<'c, C: CarrierAdapter + ?Sized> CarrierBitReader<'c, C> {
    pub fn new(carrier: &'c C, mode: PlacementMode, seed: Seed) -> Self {
        let valid = carrier.valid_indices();
        let placement = Placement::derive(mode, seed, valid.len());
        let limit = carrier.readable_units().min(valid.len());

        Self {
            carrier,
            valid,
            placement,
            next: 0,
            limit,
        }
    }

    /// bits left to read
    pub fn remaining_bits(&self) -> usize {
        self.limit - self.next
    }
}

impl<C: CarrierAdapter + ?Sized> Read for CarrierBitReader<'_, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.remaining_bits() / 8);
        let mut writer = BitWriter::endian(&mut buf[..n], BigEndian);
        for _ in 0..n * 8 {
            let unit = self.valid.get(self.placement.position(self.next));
            writer.write_bit(self.carrier.read_bit(unit))?;
            self.next += 1;
        }

        Ok(n)
    }
}

impl Engine {
    /// Recovers name and payload, reading only as many bits as the frame declares.
    pub fn extract<C>(&self, carrier: &C, password: &str) -> Result<Extracted>
    where
        C: CarrierAdapter + ?Sized,
    {
        let kind = carrier.kind();
        let profile = CarrierProfile::of(kind);

        let mut reader =
            CarrierBitReader::new(carrier, profile.placement, seed_from_password(password));
        debug!(
            "placement derived over the {kind} carrier, {} bits readable",
            reader.remaining_bits()
        );

        let frame = if profile.seals_with(password) {
            let plain = open(&mut reader, &profile.layout, password, &self.options.kdf)?;
            debug!("opened sealed frame of {} bytes", plain.len());
            profile.layout.parse(&mut Cursor::new(plain.as_slice()))?
        } else {
            profile.layout.parse(&mut reader)?
        };
        debug!(
            "validated {} payload bytes named {:?}",
            frame.payload.len(),
            frame.name
        );

        Ok(frame.into())
    }
}
