//! Engine configuration and the per carrier kind profiles.

use crate::media::CarrierKind;
use crate::payload::{FrameLayout, NameLengthWidth, MAGIC};
use crate::permutation::PlacementMode;

pub use unisteno_cipher::KdfParams;

/// Default upper bound of the hidden stream a text carrier accepts, 64 KiB of hidden data
pub const DEFAULT_TEXT_CAPACITY_BITS: usize = 64 * 1024 * 8;

/// Options shared by all embed and extract calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Key stretching costs of the encryption layer, embedding and extraction must agree on them
    pub kdf: KdfParams,

    /// Number of zero-width units a text carrier offers for writing
    pub text_capacity_bits: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            text_capacity_bits: DEFAULT_TEXT_CAPACITY_BITS,
        }
    }
}

impl EngineOptions {
    pub fn with_kdf(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }

    pub fn with_text_capacity_bits(mut self, bits: usize) -> Self {
        self.text_capacity_bits = bits;
        self
    }
}

/// The historical format choices of one carrier kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierProfile {
    pub layout: FrameLayout,
    pub placement: PlacementMode,
    /// seal the framed blob when a password is given, otherwise the permutation is the only secret
    pub encrypts: bool,
}

impl CarrierProfile {
    pub const IMAGE: CarrierProfile = CarrierProfile {
        layout: FrameLayout {
            magic: Some(MAGIC),
            name_len_width: NameLengthWidth::U32,
        },
        placement: PlacementMode::Scrambled,
        encrypts: false,
    };

    pub const AUDIO: CarrierProfile = CarrierProfile {
        layout: FrameLayout::BARE,
        placement: PlacementMode::Scrambled,
        encrypts: true,
    };

    pub const VIDEO: CarrierProfile = CarrierProfile {
        layout: FrameLayout::BARE,
        placement: PlacementMode::Scrambled,
        encrypts: false,
    };

    pub const TEXT: CarrierProfile = CarrierProfile {
        layout: FrameLayout::BARE,
        placement: PlacementMode::Sequential,
        encrypts: true,
    };

    pub fn of(kind: CarrierKind) -> Self {
        match kind {
            CarrierKind::Image => Self::IMAGE,
            CarrierKind::Audio => Self::AUDIO,
            CarrierKind::Video => Self::VIDEO,
            CarrierKind::Text => Self::TEXT,
        }
    }

    /// true if a blob embedded with this password gets sealed
    pub fn seals_with(&self, password: &str) -> bool {
        self.encrypts && !password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_image_carries_the_magic_marker() {
        assert!(CarrierProfile::of(CarrierKind::Image).layout.magic.is_some());
        for kind in [CarrierKind::Audio, CarrierKind::Video, CarrierKind::Text] {
            let profile = CarrierProfile::of(kind);
            assert!(profile.layout.magic.is_none());
            assert_eq!(profile.layout.name_len_width, NameLengthWidth::U16);
        }
    }

    #[test]
    fn empty_password_never_seals() {
        assert!(!CarrierProfile::AUDIO.seals_with(""));
        assert!(CarrierProfile::AUDIO.seals_with("pw"));
        assert!(!CarrierProfile::IMAGE.seals_with("pw"));
    }

    #[test]
    fn text_is_placed_sequentially() {
        assert_eq!(CarrierProfile::TEXT.placement, PlacementMode::Sequential);
    }
}
