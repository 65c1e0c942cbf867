use std::io::{ErrorKind, Read};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{FormatIssue, UnistenoError};
use crate::result::Result;

/// Marker in front of every image frame
pub const MAGIC: [u8; 8] = *b"UNISTENO";

/// Largest name a frame may declare, anything above is garbage read with the wrong placement
pub const MAX_NAME_LEN: usize = 10 * 1024;

/// Largest payload a frame may declare
pub const MAX_PAYLOAD_LEN: usize = 200 * 1024 * 1024;

const PAYLOAD_LEN_FIELD: usize = 4;
const CHECKSUM_FIELD: usize = 4;

/// Width of the big endian name length field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLengthWidth {
    U16,
    U32,
}

impl NameLengthWidth {
    pub const fn bytes(&self) -> usize {
        match self {
            NameLengthWidth::U16 => 2,
            NameLengthWidth::U32 => 4,
        }
    }
}

/// Field layout of a frame:
///
/// `magic (0 or 8) | nameLen (2 or 4) | name | payloadLen (4) | payload | crc32 (4)`
///
/// all integers big endian, the checksum covers the payload only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub magic: Option<[u8; 8]>,
    pub name_len_width: NameLengthWidth,
}

/// The decoded content of a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub payload: Vec<u8>,
}

impl FrameLayout {
    /// No magic marker and a 16 bit name length
    pub const BARE: FrameLayout = FrameLayout {
        magic: None,
        name_len_width: NameLengthWidth::U16,
    };

    fn magic_len(&self) -> usize {
        self.magic.map_or(0, |m| m.len())
    }

    /// Bytes a frame adds on top of the payload for a name of `name_len` bytes
    pub fn overhead(&self, name_len: usize) -> usize {
        self.magic_len()
            + self.name_len_width.bytes()
            + name_len
            + PAYLOAD_LEN_FIELD
            + CHECKSUM_FIELD
    }

    /// Size of the biggest frame that passes the sanity bounds
    pub fn max_frame_len(&self) -> usize {
        self.overhead(MAX_NAME_LEN) + MAX_PAYLOAD_LEN
    }

    pub fn build(&self, name: &str, payload: &[u8]) -> Result<Vec<u8>> {
        if name.len() > MAX_NAME_LEN {
            return Err(FormatIssue::NameLengthOutOfBounds(name.len()).into());
        }
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(FormatIssue::PayloadLengthOutOfBounds(payload.len()).into());
        }

        let mut blob = Vec::with_capacity(self.overhead(name.len()) + payload.len());
        if let Some(magic) = self.magic {
            blob.extend_from_slice(&magic);
        }
        match self.name_len_width {
            NameLengthWidth::U16 => blob.write_u16::<BigEndian>(name.len() as u16)?,
            NameLengthWidth::U32 => blob.write_u32::<BigEndian>(name.len() as u32)?,
        }
        blob.extend_from_slice(name.as_bytes());
        blob.write_u32::<BigEndian>(payload.len() as u32)?;
        blob.extend_from_slice(payload);
        blob.write_u32::<BigEndian>(crc32fast::hash(payload))?;

        Ok(blob)
    }

    /// Reads one frame field by field, a length is checked against its bound before
    /// any byte it announces is read.
    pub fn parse(&self, src: &mut dyn Read) -> Result<Frame> {
        if let Some(magic) = self.magic {
            let found = read_field(src, magic.len())?;
            if found != magic {
                return Err(FormatIssue::MagicMismatch.into());
            }
        }

        let name_len = match self.name_len_width {
            NameLengthWidth::U16 => src.read_u16::<BigEndian>().map_err(truncated)? as usize,
            NameLengthWidth::U32 => src.read_u32::<BigEndian>().map_err(truncated)? as usize,
        };
        if name_len > MAX_NAME_LEN {
            return Err(FormatIssue::NameLengthOutOfBounds(name_len).into());
        }
        let name = String::from_utf8(read_field(src, name_len)?)
            .map_err(|_| FormatIssue::InvalidName)?;

        let payload_len = src.read_u32::<BigEndian>().map_err(truncated)? as usize;
        if payload_len > MAX_PAYLOAD_LEN {
            return Err(FormatIssue::PayloadLengthOutOfBounds(payload_len).into());
        }
        let payload = read_field(src, payload_len)?;

        let expected = src.read_u32::<BigEndian>().map_err(truncated)?;
        let actual = crc32fast::hash(&payload);
        if expected != actual {
            return Err(UnistenoError::Integrity { expected, actual });
        }

        Ok(Frame { name, payload })
    }
}

/// Reads exactly `len` bytes, growing the buffer only with what actually arrives
pub(crate) fn read_field(src: &mut dyn Read, len: usize) -> Result<Vec<u8>> {
    let mut field = Vec::new();
    (&mut *src).take(len as u64).read_to_end(&mut field)?;
    if field.len() < len {
        return Err(FormatIssue::Truncated.into());
    }

    Ok(field)
}

/// an early end of the carrier is a format issue, anything else stays an io error
pub(crate) fn truncated(e: std::io::Error) -> UnistenoError {
    match e.kind() {
        ErrorKind::UnexpectedEof => FormatIssue::Truncated.into(),
        _ => UnistenoError::IoError(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use coverage_helper::test;

    use super::*;

    const IMAGE_LAYOUT: FrameLayout = FrameLayout {
        magic: Some(MAGIC),
        name_len_width: NameLengthWidth::U32,
    };

    fn parse(layout: &FrameLayout, blob: &[u8]) -> Result<Frame> {
        layout.parse(&mut Cursor::new(blob))
    }

    #[test]
    fn should_lay_out_fields_big_endian() {
        let blob = IMAGE_LAYOUT.build("note.txt", b"Hello, world!").unwrap();

        assert_eq!(blob.len(), 8 + 4 + 8 + 4 + 13 + 4);
        assert_eq!(&blob[..8], b"UNISTENO");
        assert_eq!(&blob[8..12], &[0, 0, 0, 8]);
        assert_eq!(&blob[12..20], b"note.txt");
        assert_eq!(&blob[20..24], &[0, 0, 0, 13]);
        assert_eq!(
            &blob[blob.len() - 4..],
            &crc32fast::hash(b"Hello, world!").to_be_bytes()
        );
    }

    #[test]
    fn bare_layout_has_a_short_name_length() {
        let blob = FrameLayout::BARE.build("a", b"xy").unwrap();

        assert_eq!(blob.len(), FrameLayout::BARE.overhead(1) + 2);
        assert_eq!(&blob[..3], &[0, 1, b'a']);
    }

    #[test]
    fn should_accept_empty_name_and_payload() {
        let blob = IMAGE_LAYOUT.build("", b"").unwrap();
        let frame = parse(&IMAGE_LAYOUT, &blob).unwrap();

        assert!(frame.name.is_empty());
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn should_reject_a_missing_magic() {
        let blob = FrameLayout::BARE.build("note.txt", b"data").unwrap();

        assert!(matches!(
            parse(&IMAGE_LAYOUT, &blob),
            Err(UnistenoError::Format(FormatIssue::MagicMismatch))
        ));
    }

    #[test]
    fn should_reject_oversized_name_length_before_reading_it() {
        let mut blob = MAGIC.to_vec();
        blob.extend_from_slice(&u32::MAX.to_be_bytes());

        assert!(matches!(
            parse(&IMAGE_LAYOUT, &blob),
            Err(UnistenoError::Format(FormatIssue::NameLengthOutOfBounds(_)))
        ));
    }

    #[test]
    fn should_reject_oversized_payload_length() {
        let mut blob = vec![0, 0];
        blob.extend_from_slice(&((MAX_PAYLOAD_LEN + 1) as u32).to_be_bytes());

        assert!(matches!(
            parse(&FrameLayout::BARE, &blob),
            Err(UnistenoError::Format(FormatIssue::PayloadLengthOutOfBounds(_)))
        ));
    }

    #[test]
    fn should_refuse_to_build_unextractable_frames() {
        let name = "n".repeat(MAX_NAME_LEN + 1);

        assert!(matches!(
            FrameLayout::BARE.build(&name, b""),
            Err(UnistenoError::Format(FormatIssue::NameLengthOutOfBounds(_)))
        ));
    }

    #[test]
    fn should_report_truncation() {
        let blob = FrameLayout::BARE.build("note.txt", b"Hello").unwrap();

        assert!(matches!(
            parse(&FrameLayout::BARE, &blob[..blob.len() - 6]),
            Err(UnistenoError::Format(FormatIssue::Truncated))
        ));
        assert!(matches!(
            parse(&FrameLayout::BARE, &blob[..1]),
            Err(UnistenoError::Format(FormatIssue::Truncated))
        ));
    }

    #[test]
    fn should_reject_names_that_are_not_utf8() {
        let blob = [0, 2, 0xc3, 0x28, 0, 0, 0, 0, 0, 0, 0, 0];

        assert!(matches!(
            parse(&FrameLayout::BARE, &blob),
            Err(UnistenoError::Format(FormatIssue::InvalidName))
        ));
    }

    #[test]
    fn should_detect_a_flipped_payload_bit() {
        let mut blob = FrameLayout::BARE.build("note.txt", b"Hello, world!").unwrap();
        let payload_start = FrameLayout::BARE.overhead(8) - CHECKSUM_FIELD;
        blob[payload_start + 3] ^= 0b0000_0100;

        assert!(matches!(
            parse(&FrameLayout::BARE, &blob),
            Err(UnistenoError::Integrity { .. })
        ));
    }

    #[test]
    fn max_frame_len_covers_the_sanity_bounds() {
        assert_eq!(
            IMAGE_LAYOUT.max_frame_len(),
            8 + 4 + MAX_NAME_LEN + 4 + MAX_PAYLOAD_LEN + 4
        );
    }
}
