use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use log::{debug, error};

use super::frames::{decode_frame, frame_file_name, FrameDirectory};
use crate::error::{FormatIssue, UnistenoError};
use crate::media::{
    create_target, Carrier, CarrierAdapter, CarrierKind, HideBit, MediaPrimitive,
    MediaPrimitiveMut, Persist, ValidIndices,
};
use crate::options::EngineOptions;
use crate::result::Result;

const BLUE: usize = 2;

/// the decoded first frame, kept in its original color type
#[derive(Clone, PartialEq, Eq)]
enum FirstFrame {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl FirstFrame {
    fn channel_count(&self) -> usize {
        match self {
            FirstFrame::Rgb(_) => 3,
            FirstFrame::Rgba(_) => 4,
        }
    }

    fn samples(&self) -> &[u8] {
        match self {
            FirstFrame::Rgb(frame) => frame.as_raw(),
            FirstFrame::Rgba(frame) => frame.as_raw(),
        }
    }

    fn samples_mut(&mut self) -> &mut [u8] {
        match self {
            FirstFrame::Rgb(frame) => &mut **frame,
            FirstFrame::Rgba(frame) => &mut **frame,
        }
    }

    fn save(&self, file: &Path) -> Result<()> {
        let mut writer = create_target(file)?;
        let written = match self {
            FirstFrame::Rgb(frame) => frame.write_to(&mut writer, ImageFormat::Png),
            FirstFrame::Rgba(frame) => frame.write_to(&mut writer, ImageFormat::Png),
        };
        written.map_err(|e| {
            error!("Error saving frame {file:?}: {e}");
            UnistenoError::ImageEncodingError
        })?;

        writer
            .flush()
            .map_err(|e| UnistenoError::WriteError { source: e })
    }
}

/// Video carrier, the units are the blue channel bytes of the first frame.
///
/// Later frames are never decoded, persisting copies their files byte for byte.
pub struct VideoFrameCarrier {
    first: FirstFrame,
    later: Option<Vec<PathBuf>>,
}

impl VideoFrameCarrier {
    /// only 8 bit RGB and RGBA first frames are accepted, anything else could not be written back unchanged
    pub fn new(first: DynamicImage, later: Vec<PathBuf>) -> Result<Self> {
        let first = match first {
            DynamicImage::ImageRgb8(frame) => FirstFrame::Rgb(frame),
            DynamicImage::ImageRgba8(frame) => FirstFrame::Rgba(frame),
            other => {
                error!("Unsupported first frame color type {:?}", other.color());
                return Err(FormatIssue::UndecodableCarrier(CarrierKind::Video).into());
            }
        };

        Ok(Self {
            first,
            later: Some(later),
        })
    }

    /// a video of a single frame
    pub fn from_rgb(first: RgbImage) -> Self {
        Self {
            first: FirstFrame::Rgb(first),
            later: Some(Vec::new()),
        }
    }

    pub fn open(dir: &Path) -> Result<Self> {
        let mut frames = FrameDirectory::open(dir)?.into_paths().into_iter();
        let first = frames
            .next()
            .ok_or(FormatIssue::UndecodableCarrier(CarrierKind::Video))?;

        Self::new(decode_frame(&first)?, frames.collect())
    }

    /// the raw samples of the first frame, RGB or RGBA interleaved
    pub fn first_frame(&self) -> &[u8] {
        self.first.samples()
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self.first, FirstFrame::Rgba(_))
    }

    #[inline]
    fn raw_index(&self, unit: usize) -> usize {
        unit * self.first.channel_count() + BLUE
    }
}

/// registry loader for frame directories
pub fn load(path: &Path, _options: &EngineOptions) -> Result<Carrier> {
    Ok(VideoFrameCarrier::open(path)?.into())
}

impl fmt::Debug for VideoFrameCarrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoFrameCarrier")
            .field("has_alpha", &self.has_alpha())
            .field("samples", &self.first.samples().len())
            .field("later_frames", &self.later.as_ref().map(Vec::len))
            .finish()
    }
}

impl CarrierAdapter for VideoFrameCarrier {
    fn kind(&self) -> CarrierKind {
        CarrierKind::Video
    }

    fn capacity(&self) -> usize {
        self.first.samples().len() / self.first.channel_count()
    }

    fn valid_indices(&self) -> ValidIndices {
        ValidIndices::All(self.capacity())
    }

    fn read_bit(&self, pos: usize) -> bool {
        MediaPrimitive::ImageColorChannel(self.first.samples()[self.raw_index(pos)]).unveil_bit()
    }

    fn write_bit(&mut self, pos: usize, bit: bool) {
        let index = self.raw_index(pos);
        MediaPrimitiveMut::ImageColorChannel(&mut self.first.samples_mut()[index]).hide_bit(bit);
    }
}

fn copy_frame(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target).map_err(|e| {
        error!("Error copying frame {source:?} to {target:?}: {e}");
        UnistenoError::WriteError { source: e }
    })?;

    Ok(())
}

impl Persist for VideoFrameCarrier {
    /// writes a frame directory, a carrier is persisted only once
    fn save_as(&mut self, dir: &Path) -> Result<()> {
        let later = self.later.take().ok_or(UnistenoError::CarrierAlreadyPersisted)?;
        fs::create_dir_all(dir).map_err(|e| UnistenoError::WriteError { source: e })?;

        let frames = later.len() + 1;
        self.first.save(&dir.join(frame_file_name(0, frames)))?;
        for (n, source) in later.iter().enumerate() {
            copy_frame(source, &dir.join(frame_file_name(n + 1, frames)))?;
        }
        debug!("wrote {frames} frames to {dir:?}");

        Ok(())
    }
}
