use std::fs;
use std::path::Path;

use log::debug;

use crate::error::UnistenoError;
use crate::media::{Carrier, CarrierAdapter, CarrierKind, Persist, ValidIndices};
use crate::options::EngineOptions;
use crate::result::Result;

/// zero width space
pub const ZERO_BIT: char = '\u{200B}';
/// zero width non-joiner
pub const ONE_BIT: char = '\u{200C}';
/// zero width joiner, ends the hidden stream
pub const TERMINATOR: char = '\u{200D}';

/// Text carrier, a virtual stream of zero width characters appended after the visible text.
///
/// Only a trailing run of [`ZERO_BIT`] / [`ONE_BIT`] closed by a [`TERMINATOR`] counts as hidden
/// stream, line breaks after it are tolerated. Zero width characters anywhere else stay cover text.
/// A cover that itself ends in bit characters gets one extra [`TERMINATOR`] in front of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCarrier {
    cover: String,
    bits: Vec<bool>,
    line_end: String,
    capacity: usize,
}

impl TextCarrier {
    pub fn new(text: &str, capacity: usize) -> Self {
        let body = text.trim_end_matches(['\n', '\r']);
        let line_end = &text[body.len()..];

        if let Some(stream) = body.strip_suffix(TERMINATOR) {
            let head = stream.trim_end_matches([ZERO_BIT, ONE_BIT]);
            let bits: Vec<bool> = stream[head.len()..].chars().map(|c| c == ONE_BIT).collect();
            if bits.is_empty() {
                return Self::plain(text, capacity);
            }
            debug!("found a hidden stream of {} bits", bits.len());

            let cover = match head.strip_suffix(TERMINATOR) {
                Some(cover) if needs_separator(cover) => cover,
                _ => head,
            };

            return Self {
                cover: cover.to_owned(),
                bits,
                line_end: line_end.to_owned(),
                capacity,
            };
        }

        Self::plain(text, capacity)
    }

    fn plain(text: &str, capacity: usize) -> Self {
        Self {
            cover: text.to_owned(),
            bits: Vec::new(),
            line_end: String::new(),
            capacity,
        }
    }

    /// invalid UTF-8 is replaced, not rejected
    pub fn open(path: &Path, capacity: usize) -> Result<Self> {
        let raw = fs::read(path)?;

        Ok(Self::new(&String::from_utf8_lossy(&raw), capacity))
    }

    pub fn cover(&self) -> &str {
        &self.cover
    }

    /// the visible text followed by the hidden stream
    pub fn render(&self) -> String {
        let mut text = String::with_capacity(self.cover.len() + self.bits.len() * 3 + 8);
        text.push_str(&self.cover);
        if !self.bits.is_empty() {
            if needs_separator(&self.cover) {
                text.push(TERMINATOR);
            }
            text.extend(self.bits.iter().map(|b| if *b { ONE_BIT } else { ZERO_BIT }));
            text.push(TERMINATOR);
        }
        text.push_str(&self.line_end);

        text
    }
}

/// true if bit characters at the end of `cover` would run into the stream
fn needs_separator(cover: &str) -> bool {
    cover
        .trim_end_matches(TERMINATOR)
        .ends_with([ZERO_BIT, ONE_BIT])
}

/// registry loader for text files
pub fn load(path: &Path, options: &EngineOptions) -> Result<Carrier> {
    Ok(TextCarrier::open(path, options.text_capacity_bits)?.into())
}

impl CarrierAdapter for TextCarrier {
    fn kind(&self) -> CarrierKind {
        CarrierKind::Text
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn valid_indices(&self) -> ValidIndices {
        ValidIndices::All(self.capacity)
    }

    fn readable_units(&self) -> usize {
        self.bits.len()
    }

    fn read_bit(&self, pos: usize) -> bool {
        self.bits.get(pos).copied().unwrap_or(false)
    }

    /// unit 0 starts a fresh stream
    fn write_bit(&mut self, pos: usize, bit: bool) {
        if pos == 0 {
            self.bits.clear();
        }
        if pos >= self.bits.len() {
            self.bits.resize(pos + 1, false);
        }
        self.bits[pos] = bit;
    }
}

impl Persist for TextCarrier {
    fn save_as(&mut self, file: &Path) -> Result<()> {
        fs::write(file, self.render()).map_err(|e| UnistenoError::WriteError { source: e })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn plain_text_has_nothing_to_read() {
        let carrier = TextCarrier::new("Hello\u{200D}World\n", 64);

        assert_eq!(carrier.readable_units(), 0);
        assert_eq!(carrier.capacity(), 64);
        assert_eq!(carrier.render(), "Hello\u{200D}World\n");
    }

    #[test]
    fn a_lone_terminator_is_cover_text() {
        let carrier = TextCarrier::new("family \u{200D}\n", 64);

        assert_eq!(carrier.readable_units(), 0);
        assert_eq!(carrier.render(), "family \u{200D}\n");
    }

    #[test]
    fn should_append_the_stream_after_the_text() {
        let mut carrier = TextCarrier::new("Hello", 64);
        for (pos, bit) in [true, false, true].into_iter().enumerate() {
            carrier.write_bit(pos, bit);
        }

        assert_eq!(carrier.render(), "Hello\u{200C}\u{200B}\u{200C}\u{200D}");
    }

    #[test]
    fn should_find_a_stream_before_trailing_line_breaks() {
        let carrier = TextCarrier::new("Hi \u{200D}\u{200C}\u{200B}\u{200D}\r\n", 64);

        assert_eq!(carrier.cover(), "Hi \u{200D}");
        assert_eq!(carrier.readable_units(), 2);
        assert!(carrier.read_bit(0));
        assert!(!carrier.read_bit(1));
        assert!(!carrier.read_bit(2));
    }

    #[test]
    fn writing_unit_zero_replaces_an_old_stream() {
        let mut carrier = TextCarrier::new("x\u{200C}\u{200C}\u{200C}\u{200D}\n", 64);
        carrier.write_bit(0, false);

        assert_eq!(carrier.render(), "x\u{200B}\u{200D}\n");
    }

    #[test]
    fn bit_characters_at_the_end_of_the_cover_stay_cover() {
        for cover in ["web\u{200B}", "web\u{200C}\u{200B}", "web\u{200B}\u{200D}\u{200D}"] {
            let mut carrier = TextCarrier::new(cover, 64);
            carrier.write_bit(0, true);
            carrier.write_bit(1, false);

            let reloaded = TextCarrier::new(&carrier.render(), 64);

            assert_eq!(reloaded.cover(), cover);
            assert_eq!(reloaded.readable_units(), 2);
            assert!(reloaded.read_bit(0));
            assert!(!reloaded.read_bit(1));
        }
    }

    #[test]
    fn covers_without_bit_characters_get_no_separator() {
        let mut carrier = TextCarrier::new("joined \u{200D}", 64);
        carrier.write_bit(0, true);

        assert_eq!(carrier.render(), "joined \u{200D}\u{200C}\u{200D}");
        assert_eq!(
            TextCarrier::new(&carrier.render(), 64).cover(),
            "joined \u{200D}"
        );
    }

    #[test]
    fn should_reload_what_was_saved() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.txt");
        let mut carrier = TextCarrier::new("Dear diary,\n", 64);
        carrier.write_bit(0, true);
        carrier.write_bit(1, true);

        carrier.save_as(&target).unwrap();
        let reloaded = TextCarrier::open(&target, 64).unwrap();

        assert_eq!(reloaded.cover(), "Dear diary,\n");
        assert_eq!(reloaded.readable_units(), 2);
        assert!(reloaded.read_bit(1));
    }
}
