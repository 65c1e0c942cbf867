use std::path::{Path, PathBuf};

use crate::engine::EmbedReport;
use crate::media::CarrierKind;
use crate::options::EngineOptions;
use crate::registry::CarrierRegistry;
use crate::result::Result;

/// hides either a file or a message, the file wins if both are given
#[allow(clippy::too_many_arguments)]
pub fn hide(
    registry: &CarrierRegistry,
    media: &Path,
    write_to_file: &Path,
    data_file: Option<PathBuf>,
    message: Option<String>,
    name: Option<String>,
    password: Option<String>,
    kind: Option<CarrierKind>,
    options: EngineOptions,
) -> Result<EmbedReport> {
    let api = crate::api::hide::prepare(registry)
        .with_options(options)
        .with_carrier(media)
        .with_kind(kind)
        .with_output(write_to_file)
        .use_password(password)
        .use_name(name);
    let api = match (data_file, message) {
        (Some(file), _) => api.with_payload_file(file),
        (None, Some(message)) => api.with_message(&message),
        (None, None) => api,
    };

    api.execute()
}
