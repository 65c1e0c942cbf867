mod carrier;
mod frames;

pub use carrier::{load, VideoFrameCarrier};
pub use frames::{frame_file_name, FrameDirectory};
