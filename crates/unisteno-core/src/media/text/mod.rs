mod carrier;

pub use carrier::{load, TextCarrier, ONE_BIT, TERMINATOR, ZERO_BIT};
