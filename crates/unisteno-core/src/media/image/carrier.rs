use std::io::Write;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use log::error;

use crate::error::{FormatIssue, UnistenoError};
use crate::media::{
    create_target, Carrier, CarrierAdapter, CarrierKind, HideBit, MediaPrimitive,
    MediaPrimitiveMut, Persist, ValidIndices,
};
use crate::options::EngineOptions;
use crate::result::Result;

const COLOR_CHANNELS: usize = 3;
const RGBA_CHANNELS: usize = 4;
const ALPHA: usize = 3;

/// Image carrier over the red, green and blue channels of every pixel.
///
/// Units are enumerated row major, pixel by pixel, `unit = pixel * 3 + channel`.
/// The alpha channel is never written, and all colors of a fully transparent pixel are
/// excluded from the valid units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCarrier {
    image: RgbaImage,
    has_alpha: bool,
}

impl ImageCarrier {
    pub fn new(image: RgbaImage, has_alpha: bool) -> Self {
        Self { image, has_alpha }
    }

    pub fn from_rgba(image: RgbaImage) -> Self {
        Self::new(image, true)
    }

    pub fn from_rgb(image: RgbImage) -> Self {
        Self::new(DynamicImage::ImageRgb8(image).into_rgba8(), false)
    }

    /// decodes a png or jpeg file
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| {
            error!("Error decoding image {path:?}: {e}");
            FormatIssue::UndecodableCarrier(CarrierKind::Image)
        })?;
        let has_alpha = img.color().has_alpha();

        Ok(Self::new(img.into_rgba8(), has_alpha))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    #[inline]
    fn raw_index(unit: usize) -> usize {
        (unit / COLOR_CHANNELS) * RGBA_CHANNELS + unit % COLOR_CHANNELS
    }

    fn is_transparent(pixel: &[u8]) -> bool {
        pixel[ALPHA] == 0
    }
}

/// registry loader for image files
pub fn load(path: &Path, _options: &EngineOptions) -> Result<Carrier> {
    Ok(ImageCarrier::open(path)?.into())
}

impl CarrierAdapter for ImageCarrier {
    fn kind(&self) -> CarrierKind {
        CarrierKind::Image
    }

    fn capacity(&self) -> usize {
        self.image.as_raw().len() / RGBA_CHANNELS * COLOR_CHANNELS
    }

    fn valid_indices(&self) -> ValidIndices {
        let pixels = self.image.as_raw().chunks_exact(RGBA_CHANNELS);
        if !self.has_alpha || !pixels.clone().any(Self::is_transparent) {
            return ValidIndices::All(self.capacity());
        }

        ValidIndices::Masked(
            pixels
                .enumerate()
                .filter(|(_, pixel)| !Self::is_transparent(pixel))
                .flat_map(|(i, _)| (0..COLOR_CHANNELS).map(move |c| i * COLOR_CHANNELS + c))
                .collect(),
        )
    }

    fn read_bit(&self, pos: usize) -> bool {
        MediaPrimitive::ImageColorChannel(self.image.as_raw()[Self::raw_index(pos)]).unveil_bit()
    }

    fn write_bit(&mut self, pos: usize, bit: bool) {
        let channels: &mut [u8] = &mut self.image;
        MediaPrimitiveMut::ImageColorChannel(&mut channels[Self::raw_index(pos)]).hide_bit(bit);
    }
}

impl Persist for ImageCarrier {
    /// always png, with alpha only if the input had alpha
    fn save_as(&mut self, file: &Path) -> Result<()> {
        let mut writer = create_target(file)?;
        let written = if self.has_alpha {
            self.image.write_to(&mut writer, ImageFormat::Png)
        } else {
            DynamicImage::ImageRgba8(self.image.clone())
                .into_rgb8()
                .write_to(&mut writer, ImageFormat::Png)
        };
        written.map_err(|e| {
            error!("Error saving image: {e}");
            UnistenoError::ImageEncodingError
        })?;

        writer
            .flush()
            .map_err(|e| UnistenoError::WriteError { source: e })
    }
}
