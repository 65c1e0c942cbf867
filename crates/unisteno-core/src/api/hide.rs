use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{persist_atomically, Password};
use crate::engine::{EmbedReport, Engine};
use crate::error::UnistenoError;
use crate::media::CarrierKind;
use crate::options::EngineOptions;
use crate::registry::CarrierRegistry;
use crate::result::Result;

/// name under which a plain message is hidden
pub const MESSAGE_NAME: &str = "secret-message.txt";

pub fn prepare(registry: &CarrierRegistry) -> HideApi<'_> {
    HideApi::new(registry)
}

#[derive(Debug)]
enum Secret {
    File(PathBuf),
    Message(String),
}

#[derive(Debug)]
pub struct HideApi<'r> {
    registry: &'r CarrierRegistry,
    secret: Option<Secret>,
    name: Option<String>,
    carrier: Option<PathBuf>,
    kind: Option<CarrierKind>,
    output: Option<PathBuf>,
    password: Password,
    options: EngineOptions,
}

impl<'r> HideApi<'r> {
    pub fn new(registry: &'r CarrierRegistry) -> Self {
        Self {
            registry,
            secret: None,
            name: None,
            carrier: None,
            kind: None,
            output: None,
            password: Password::default(),
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// hides the content of this file, under the file's name unless [`HideApi::with_name`] says otherwise
    pub fn with_payload_file<A: AsRef<Path>>(mut self, data_file: A) -> Self {
        self.secret = Some(Secret::File(data_file.as_ref().to_path_buf()));
        self
    }

    /// hides a text message, named `secret-message.txt` by default
    pub fn with_message(mut self, message: &str) -> Self {
        self.secret = Some(Secret::Message(message.to_string()));
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn use_name<S: AsRef<str>>(mut self, name: Option<S>) -> Self {
        self.name = name.map(|s| s.as_ref().to_string());
        self
    }

    pub fn with_carrier<A: AsRef<Path>>(mut self, carrier: A) -> Self {
        self.carrier = Some(carrier.as_ref().to_path_buf());
        self
    }

    /// Load the carrier as this kind instead of guessing it from the path
    pub fn with_kind(mut self, kind: Option<CarrierKind>) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.into();
        self
    }

    /// Set the password
    /// If `None` is passed, the default placement is used and nothing gets encrypted
    pub fn use_password<S: AsRef<str>>(mut self, password: Option<S>) -> Self {
        self.password = password.map(|s| s.as_ref().to_string()).into();
        self
    }

    /// Loads the carrier, hides the secret and writes the result to the output
    pub fn execute(self) -> Result<EmbedReport> {
        let Some(carrier_path) = self.carrier else {
            return Err(UnistenoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(UnistenoError::TargetNotSet);
        };
        let (default_name, payload) = match self.secret {
            Some(Secret::File(file)) => {
                let payload = fs::read(&file)?;
                let name = file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (name, payload)
            }
            Some(Secret::Message(message)) => (MESSAGE_NAME.to_string(), message.into_bytes()),
            None => return Err(UnistenoError::MissingPayload),
        };
        let name = self.name.unwrap_or(default_name);

        let mut carrier = match self.kind {
            Some(kind) => self.registry.load_as(kind, &carrier_path, &self.options)?,
            None => self.registry.load(&carrier_path, &self.options)?,
        };
        let report =
            Engine::new(self.options).embed(&mut carrier, &payload, self.password.as_str(), &name)?;

        persist_atomically(&mut carrier, &output)?;
        debug!("hid {} bytes as {name:?} in {output:?}", payload.len());

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("carrier.png");
        RgbImage::from_pixel(32, 32, Rgb([200, 100, 50]))
            .save(&carrier)
            .expect("Failed to write carrier");
        let registry = CarrierRegistry::with_defaults();

        let report = crate::api::hide::prepare(&registry)
            .with_message("Hello, World!")
            .with_carrier(&carrier)
            .with_password("SuperSecret42")
            .with_output(temp_dir.path().join("image-with-secret.png"))
            .execute()
            .expect("Failed to hide message in image");

        assert_eq!(
            report.bits_written,
            (8 + 4 + MESSAGE_NAME.len() + 4 + 13 + 4) * 8
        );
        assert!(temp_dir.path().join("image-with-secret.png").exists());
    }

    #[test]
    fn should_insist_on_carrier_output_and_payload() {
        let registry = CarrierRegistry::with_defaults();

        assert!(matches!(
            prepare(&registry).with_message("x").with_output("o.png").execute(),
            Err(UnistenoError::CarrierNotSet)
        ));
        assert!(matches!(
            prepare(&registry).with_message("x").with_carrier("c.png").execute(),
            Err(UnistenoError::TargetNotSet)
        ));
        assert!(matches!(
            prepare(&registry)
                .with_carrier("c.png")
                .with_output("o.png")
                .execute(),
            Err(UnistenoError::MissingPayload)
        ));
    }

    #[test]
    fn should_not_write_anything_when_the_payload_does_not_fit() {
        let temp_dir = tempdir().unwrap();
        let carrier = temp_dir.path().join("tiny.png");
        RgbImage::new(2, 2).save(&carrier).unwrap();
        let output = temp_dir.path().join("out.png");

        let result = prepare(&CarrierRegistry::with_defaults())
            .with_message("far too long for four pixels")
            .with_carrier(&carrier)
            .with_output(&output)
            .execute();

        assert!(matches!(result, Err(UnistenoError::Capacity { .. })));
        assert!(!output.exists());
    }
}
