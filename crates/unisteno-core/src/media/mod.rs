pub mod audio;
pub mod image;
mod primitives;
pub mod text;
mod types;
pub mod video;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::error;

pub use primitives::*;
pub use types::*;

use crate::error::UnistenoError;
use crate::result::Result;

pub trait Persist {
    fn save_as(&mut self, _: &Path) -> crate::Result<()>;
}

/// creates the target file for writing, buffered
pub(crate) fn create_target(file: &Path) -> Result<BufWriter<File>> {
    let f = File::create(file).map_err(|e| {
        error!("Error creating file {file:?}: {e}");
        UnistenoError::WriteError { source: e }
    })?;

    Ok(BufWriter::new(f))
}
