mod carrier;

pub use carrier::{load, AudioCarrier};
pub use hound::{SampleFormat, WavSpec};
