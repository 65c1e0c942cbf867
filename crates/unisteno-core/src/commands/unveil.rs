use std::path::{Path, PathBuf};

use crate::media::CarrierKind;
use crate::options::EngineOptions;
use crate::registry::CarrierRegistry;
use crate::result::Result;

pub fn unveil(
    registry: &CarrierRegistry,
    secret_media: &Path,
    output_folder: &Path,
    password: Option<String>,
    kind: Option<CarrierKind>,
    options: EngineOptions,
) -> Result<PathBuf> {
    crate::api::unveil::prepare(registry)
        .with_options(options)
        .from_secret_file(secret_media)
        .with_kind(kind)
        .into_output_folder(output_folder)
        .using_password(password)
        .execute()
}
