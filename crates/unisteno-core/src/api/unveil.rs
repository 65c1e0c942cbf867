use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::Password;
use crate::engine::Engine;
use crate::error::UnistenoError;
use crate::media::CarrierKind;
use crate::options::EngineOptions;
use crate::registry::CarrierRegistry;
use crate::result::Result;

/// file name used when the hidden name is empty or no usable file name
pub const FALLBACK_NAME: &str = "extracted.bin";

pub fn prepare(registry: &CarrierRegistry) -> UnveilApi<'_> {
    UnveilApi::new(registry)
}

#[derive(Debug)]
pub struct UnveilApi<'r> {
    registry: &'r CarrierRegistry,
    secret_media: Option<PathBuf>,
    kind: Option<CarrierKind>,
    output_folder: Option<PathBuf>,
    password: Password,
    options: EngineOptions,
}

impl<'r> UnveilApi<'r> {
    pub fn new(registry: &'r CarrierRegistry) -> Self {
        Self {
            registry,
            secret_media: None,
            kind: None,
            output_folder: None,
            password: Password::default(),
            options: EngineOptions::default(),
        }
    }

    /// Use the given engine options, they have to match the ones used for hiding
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the carrier that contains the data to be unveiled
    pub fn from_secret_file(mut self, secret_media: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_media.as_ref().to_path_buf());
        self
    }

    /// Load the carrier as this kind instead of guessing it from the path
    pub fn with_kind(mut self, kind: Option<CarrierKind>) -> Self {
        self.kind = kind;
        self
    }

    /// This is the folder where the data will be saved to
    pub fn into_output_folder(mut self, output_folder: impl AsRef<Path>) -> Self {
        self.output_folder = Some(output_folder.as_ref().to_path_buf());
        self
    }

    /// Set the password used for hiding
    /// If `None` is passed, the default placement is assumed and nothing gets decrypted
    pub fn using_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    /// Execute the unveil process and blocks until it is finished,
    /// returns the file the payload was written to
    pub fn execute(self) -> Result<PathBuf> {
        let Some(secret_media) = self.secret_media else {
            return Err(UnistenoError::CarrierNotSet);
        };
        let Some(output_folder) = self.output_folder else {
            return Err(UnistenoError::TargetNotSet);
        };

        let carrier = match self.kind {
            Some(kind) => self.registry.load_as(kind, &secret_media, &self.options)?,
            None => self.registry.load(&secret_media, &self.options)?,
        };
        let extracted = Engine::new(self.options).extract(&carrier, self.password.as_str())?;

        fs::create_dir_all(&output_folder).map_err(|source| UnistenoError::WriteError { source })?;
        let target_file = output_folder.join(target_file_name(&extracted.name));
        fs::write(&target_file, &extracted.payload)
            .map_err(|source| UnistenoError::WriteError { source })?;
        debug!(
            "unveiled {} bytes into {target_file:?}",
            extracted.payload.len()
        );

        Ok(target_file)
    }
}

/// only the last component of the hidden name is used, the payload never escapes the output folder
fn target_file_name(name: &str) -> PathBuf {
    Path::new(name)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_NAME))
}
