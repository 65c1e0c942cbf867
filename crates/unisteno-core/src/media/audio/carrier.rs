use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::error;

use crate::error::{FormatIssue, UnistenoError};
use crate::media::{
    create_target, Carrier, CarrierAdapter, CarrierKind, HideBit, MediaPrimitive,
    MediaPrimitiveMut, Persist, ValidIndices,
};
use crate::options::EngineOptions;
use crate::result::Result;

/// 16 bit PCM audio, every interleaved sample is one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCarrier {
    spec: WavSpec,
    samples: Vec<i16>,
}

impl AudioCarrier {
    /// only 16 bit integer samples can carry data
    pub fn new(spec: WavSpec, samples: Vec<i16>) -> Result<Self> {
        Self::check_spec(&spec)?;

        Ok(Self { spec, samples })
    }

    fn check_spec(spec: &WavSpec) -> Result<()> {
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            error!(
                "Unsupported wav sample format {:?} with {} bits",
                spec.sample_format, spec.bits_per_sample
            );
            return Err(FormatIssue::UndecodableCarrier(CarrierKind::Audio).into());
        }

        Ok(())
    }

    pub fn open(path: &Path) -> Result<Self> {
        let undecodable = |e: hound::Error| {
            error!("Error decoding wav {path:?}: {e}");
            UnistenoError::from(FormatIssue::UndecodableCarrier(CarrierKind::Audio))
        };
        let mut reader = WavReader::open(path).map_err(undecodable)?;
        let spec = reader.spec();
        Self::check_spec(&spec)?;
        let samples = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(undecodable)?;

        Ok(Self { spec, samples })
    }

    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }
}

/// registry loader for wav files
pub fn load(path: &Path, _options: &EngineOptions) -> Result<Carrier> {
    Ok(AudioCarrier::open(path)?.into())
}

impl CarrierAdapter for AudioCarrier {
    fn kind(&self) -> CarrierKind {
        CarrierKind::Audio
    }

    fn capacity(&self) -> usize {
        self.samples.len()
    }

    fn valid_indices(&self) -> ValidIndices {
        ValidIndices::All(self.samples.len())
    }

    fn read_bit(&self, pos: usize) -> bool {
        MediaPrimitive::AudioSample(self.samples[pos]).unveil_bit()
    }

    fn write_bit(&mut self, pos: usize, bit: bool) {
        MediaPrimitiveMut::AudioSample(&mut self.samples[pos]).hide_bit(bit);
    }
}

impl Persist for AudioCarrier {
    fn save_as(&mut self, file: &Path) -> Result<()> {
        let encoding_error = |e: hound::Error| {
            error!("Error saving audio: {e}");
            UnistenoError::AudioEncodingError
        };
        let mut writer = WavWriter::new(create_target(file)?, self.spec).map_err(encoding_error)?;
        for sample in &self.samples {
            writer.write_sample(*sample).map_err(encoding_error)?;
        }

        writer.finalize().map_err(encoding_error)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn stereo_spec() -> WavSpec {
        WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn interleaved_samples_are_units() {
        let mut carrier = AudioCarrier::new(stereo_spec(), vec![0, -4, 100, i16::MIN]).unwrap();
        assert_eq!(carrier.capacity(), 4);
        assert_eq!(carrier.valid_indices(), ValidIndices::All(4));

        carrier.write_bit(1, true);
        carrier.write_bit(3, true);

        assert_eq!(carrier.samples(), &[0, -3, 100, i16::MIN + 1]);
        assert!(carrier.read_bit(1));
        assert!(!carrier.read_bit(2));
    }

    #[test]
    fn should_reject_float_samples() {
        let spec = WavSpec {
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
            ..stereo_spec()
        };

        assert!(matches!(
            AudioCarrier::new(spec, vec![]),
            Err(UnistenoError::Format(FormatIssue::UndecodableCarrier(
                CarrierKind::Audio
            )))
        ));
    }

    #[test]
    fn should_keep_spec_and_samples_when_saved() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.wav");
        let samples = (0..64).map(|s| s * 31 - 900).collect();
        let mut carrier = AudioCarrier::new(stereo_spec(), samples).unwrap();
        carrier.write_bit(5, true);

        carrier.save_as(&target).unwrap();

        assert_eq!(AudioCarrier::open(&target).unwrap(), carrier);
    }

    #[test]
    fn should_reject_files_that_are_no_wav() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("fake.wav");
        std::fs::write(&target, b"RIFF but not really").unwrap();

        assert!(matches!(
            AudioCarrier::open(&target),
            Err(UnistenoError::Format(FormatIssue::UndecodableCarrier(
                CarrierKind::Audio
            )))
        ));
    }
}
