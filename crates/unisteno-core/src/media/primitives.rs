/// wrap the low level data types that carries information
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum MediaPrimitive {
    ImageColorChannel(u8),
    AudioSample(i16),
}

impl MediaPrimitive {
    /// the payload bit of this primitive
    pub fn unveil_bit(&self) -> bool {
        match self {
            MediaPrimitive::ImageColorChannel(c) => c & 1 == 1,
            MediaPrimitive::AudioSample(s) => s & 1 == 1,
        }
    }
}

impl From<u8> for MediaPrimitive {
    fn from(value: u8) -> Self {
        MediaPrimitive::ImageColorChannel(value)
    }
}

impl From<i16> for MediaPrimitive {
    fn from(value: i16) -> Self {
        MediaPrimitive::AudioSample(value)
    }
}

/// mutable primitive a payload bit is written into
#[derive(Debug, Eq, PartialEq)]
pub enum MediaPrimitiveMut<'a> {
    ImageColorChannel(&'a mut u8),
    AudioSample(&'a mut i16),
}

pub trait HideBit {
    fn hide_bit(self, bit: bool);
}

impl HideBit for MediaPrimitiveMut<'_> {
    /// replaces bit 0 only, for samples the sign bit stays untouched
    fn hide_bit(self, bit: bool) {
        match self {
            MediaPrimitiveMut::ImageColorChannel(c) => {
                *c = (*c & !1) | u8::from(bit);
            }
            MediaPrimitiveMut::AudioSample(s) => {
                *s = (*s & !1) | i16::from(bit);
            }
        }
    }
}
