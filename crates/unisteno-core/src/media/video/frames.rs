//! Frame directories, the lossless hand-off with an external transcoder.
//!
//! A video is a directory of png frames, played back in file name order.

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::{debug, error};

use crate::error::{FormatIssue, UnistenoError};
use crate::media::CarrierKind;
use crate::result::Result;

const FRAME_EXTENSION: &str = "png";
const MIN_FRAME_DIGITS: usize = 6;

/// name of the n-th out of `frames` frames in a written frame directory,
/// padded so that file name order stays playback order
pub fn frame_file_name(n: usize, frames: usize) -> String {
    let digits = frames.saturating_sub(1).max(1).ilog10() as usize + 1;
    let width = digits.max(MIN_FRAME_DIGITS);

    format!("frame_{n:0width$}.{FRAME_EXTENSION}")
}

/// The ordered frame files of a directory
#[derive(Debug, Clone)]
pub struct FrameDirectory {
    frames: Vec<PathBuf>,
}

impl FrameDirectory {
    pub fn open(dir: &Path) -> Result<Self> {
        let mut frames = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        frames.retain(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(FRAME_EXTENSION))
        });
        frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        if frames.is_empty() {
            error!("No frames found in {dir:?}");
            return Err(FormatIssue::UndecodableCarrier(CarrierKind::Video).into());
        }
        debug!("found {} frames in {dir:?}", frames.len());

        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.frames
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.frames
    }
}

pub(crate) fn decode_frame(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| {
        error!("Error decoding frame {path:?}: {e}");
        UnistenoError::from(FormatIssue::UndecodableCarrier(CarrierKind::Video))
    })
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn frames_are_ordered_by_file_name() {
        let dir = TempDir::new().unwrap();
        for (name, value) in [("b.png", 2u8), ("a.png", 1), ("c.PNG", 3)] {
            RgbImage::from_pixel(2, 2, Rgb([value; 3]))
                .save(dir.path().join(name))
                .unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let frames = FrameDirectory::open(dir.path()).unwrap();
        assert_eq!(frames.len(), 3);

        let firsts: Vec<u8> = frames
            .paths()
            .iter()
            .map(|p| decode_frame(p).unwrap().to_rgb8().get_pixel(0, 0).0[0])
            .collect();
        assert_eq!(firsts, vec![1, 2, 3]);
    }

    #[test]
    fn a_directory_without_frames_is_no_video() {
        let dir = TempDir::new().unwrap();

        assert!(matches!(
            FrameDirectory::open(dir.path()),
            Err(UnistenoError::Format(FormatIssue::UndecodableCarrier(
                CarrierKind::Video
            )))
        ));
    }

    #[test]
    fn frame_names_are_zero_padded() {
        assert_eq!(frame_file_name(0, 1), "frame_000000.png");
        assert_eq!(frame_file_name(1234, 5000), "frame_001234.png");
        assert_eq!(frame_file_name(999_999, 1_000_000), "frame_999999.png");
    }

    #[test]
    fn long_videos_get_wider_frame_names() {
        let frames = 1_000_001;
        assert_eq!(frame_file_name(5, frames), "frame_0000005.png");
        assert_eq!(frame_file_name(1_000_000, frames), "frame_1000000.png");
        assert!(frame_file_name(999_999, frames) < frame_file_name(1_000_000, frames));
    }
}
