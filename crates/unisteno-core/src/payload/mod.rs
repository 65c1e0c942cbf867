mod frame;
mod sealed;

pub use frame::*;
pub use sealed::*;
