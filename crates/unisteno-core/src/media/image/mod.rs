mod carrier;

pub use carrier::{load, ImageCarrier};
