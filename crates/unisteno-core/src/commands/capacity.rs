use std::path::Path;

use crate::engine::{CapacityReport, Engine};
use crate::media::CarrierKind;
use crate::options::EngineOptions;
use crate::registry::CarrierRegistry;
use crate::result::Result;

/// how much payload a carrier file takes for the given name and password
pub fn capacity(
    registry: &CarrierRegistry,
    media: &Path,
    name: &str,
    password: Option<&str>,
    kind: Option<CarrierKind>,
    options: EngineOptions,
) -> Result<CapacityReport> {
    let carrier = match kind {
        Some(kind) => registry.load_as(kind, media, &options)?,
        None => registry.load(media, &options)?,
    };

    Ok(Engine::new(options).capacity_report(&carrier, name, password.unwrap_or_default()))
}
