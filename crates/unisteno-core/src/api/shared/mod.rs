mod password;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

pub use password::*;

use crate::error::UnistenoError;
use crate::media::Persist;
use crate::result::Result;

/// Saves next to the target first and renames afterwards, so a failed save never leaves
/// a half written target behind.
pub(crate) fn persist_atomically(media: &mut dyn Persist, target: &Path) -> Result<()> {
    let partial = partial_path(target);
    if let Err(e) = media.save_as(&partial) {
        remove_partial(&partial);
        return Err(e);
    }

    fs::rename(&partial, target).map_err(|source| {
        remove_partial(&partial);
        UnistenoError::WriteError { source }
    })
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".partial");

    target.with_file_name(name)
}

fn remove_partial(partial: &Path) {
    let removed = if partial.is_dir() {
        fs::remove_dir_all(partial)
    } else {
        fs::remove_file(partial)
    };
    if let Err(e) = removed {
        debug!("could not remove {partial:?}: {e}");
    }
}
