use std::fmt;
use std::path::Path;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;

use crate::error::UnistenoError;
use crate::result::Result;

use super::audio::AudioCarrier;
use super::image::ImageCarrier;
use super::text::TextCarrier;
use super::video::VideoFrameCarrier;
use super::Persist;

/// the carrier families a payload can be hidden in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarrierKind {
    Image,
    Audio,
    Video,
    Text,
}

impl CarrierKind {
    pub const ALL: [CarrierKind; 4] = [
        CarrierKind::Image,
        CarrierKind::Audio,
        CarrierKind::Video,
        CarrierKind::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierKind::Image => "image",
            CarrierKind::Audio => "audio",
            CarrierKind::Video => "video",
            CarrierKind::Text => "text",
        }
    }
}

impl fmt::Display for CarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarrierKind {
    type Err = UnistenoError;

    fn from_str(s: &str) -> Result<Self> {
        CarrierKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or(UnistenoError::UnsupportedMedia)
    }
}

/// The units a carrier allows writing to, in unit order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidIndices {
    /// every unit in `0..n`
    All(usize),
    /// only the listed units
    Masked(Vec<usize>),
}

impl ValidIndices {
    pub fn len(&self) -> usize {
        match self {
            ValidIndices::All(n) => *n,
            ValidIndices::Masked(units) => units.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// the unit behind the i-th valid index
    #[inline]
    pub fn get(&self, i: usize) -> usize {
        match self {
            ValidIndices::All(_) => i,
            ValidIndices::Masked(units) => units[i],
        }
    }
}

/// Uniform bit level access to a carrier's embeddable units.
///
/// A unit is addressed by its position in `0..capacity()`, its lowest bit carries payload.
/// Callers only pass positions taken from [`CarrierAdapter::valid_indices`].
#[enum_dispatch]
pub trait CarrierAdapter {
    fn kind(&self) -> CarrierKind;

    /// total number of units
    fn capacity(&self) -> usize;

    fn valid_indices(&self) -> ValidIndices;

    /// number of units that hold data worth reading
    fn readable_units(&self) -> usize {
        self.capacity()
    }

    fn read_bit(&self, pos: usize) -> bool;

    fn write_bit(&mut self, pos: usize, bit: bool);
}

/// a media container for steganography
#[enum_dispatch(CarrierAdapter)]
#[derive(Debug)]
pub enum Carrier {
    Image(ImageCarrier),
    Audio(AudioCarrier),
    Video(VideoFrameCarrier),
    Text(TextCarrier),
}

impl Persist for Carrier {
    fn save_as(&mut self, target: &Path) -> Result<()> {
        match self {
            Carrier::Image(c) => c.save_as(target),
            Carrier::Audio(c) => c.save_as(target),
            Carrier::Video(c) => c.save_as(target),
            Carrier::Text(c) => c.save_as(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_kinds_case_insensitive() {
        assert_eq!("Image".parse::<CarrierKind>().unwrap(), CarrierKind::Image);
        assert_eq!("text".parse::<CarrierKind>().unwrap(), CarrierKind::Text);
        assert!(matches!(
            "pdf".parse::<CarrierKind>(),
            Err(UnistenoError::UnsupportedMedia)
        ));
    }

    #[test]
    fn kinds_display_lowercase() {
        for kind in CarrierKind::ALL {
            assert_eq!(kind.to_string().parse::<CarrierKind>().unwrap(), kind);
        }
        assert_eq!(CarrierKind::Video.to_string(), "video");
    }

    #[test]
    fn masked_indices_map_through_the_mask() {
        let all = ValidIndices::All(4);
        assert_eq!(all.len(), 4);
        assert_eq!(all.get(3), 3);

        let masked = ValidIndices::Masked(vec![3, 4, 5, 9]);
        assert_eq!(masked.len(), 4);
        assert_eq!(masked.get(3), 9);
        assert!(ValidIndices::Masked(vec![]).is_empty());
    }
}
