//! Explicit lookup from carrier kinds to their loaders.
//!
//! A registry is built once, usually at program start, and handed by reference to
//! whoever needs to open carriers. There is no global state.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use log::debug;

use crate::error::UnistenoError;
use crate::media::{audio, image, text, video, Carrier, CarrierKind};
use crate::options::EngineOptions;
use crate::result::Result;

/// opens a carrier of one kind from a path
pub type Loader = fn(&Path, &EngineOptions) -> Result<Carrier>;

#[derive(Clone, Default)]
pub struct CarrierRegistry {
    loaders: HashMap<CarrierKind, Loader>,
    extensions: HashMap<String, CarrierKind>,
    directory_kind: Option<CarrierKind>,
}

impl fmt::Debug for CarrierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarrierRegistry")
            .field("kinds", &self.loaders.keys().collect::<Vec<_>>())
            .field("extensions", &self.extensions)
            .field("directory_kind", &self.directory_kind)
            .finish()
    }
}

impl CarrierRegistry {
    /// a registry that knows no carrier at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// images (`png`, `jpg`, `jpeg`), audio (`wav`), text (`txt`, `text`, `md`)
    /// and videos given as frame directories
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry
            .register(CarrierKind::Image, &["png", "jpg", "jpeg"], image::load)
            .register(CarrierKind::Audio, &["wav"], audio::load)
            .register(CarrierKind::Text, &["txt", "text", "md"], text::load)
            .register(CarrierKind::Video, &[], video::load)
            .serve_directories_as(CarrierKind::Video);

        registry
    }

    /// registers (or replaces) the loader of a kind, extensions are matched case insensitive
    pub fn register(
        &mut self,
        kind: CarrierKind,
        extensions: &[&str],
        loader: Loader,
    ) -> &mut Self {
        self.loaders.insert(kind, loader);
        for ext in extensions {
            self.extensions.insert(ext.to_ascii_lowercase(), kind);
        }

        self
    }

    /// directories are opened with the loader of `kind`
    pub fn serve_directories_as(&mut self, kind: CarrierKind) -> &mut Self {
        self.directory_kind = Some(kind);
        self
    }

    pub fn kind_for_path(&self, path: &Path) -> Result<CarrierKind> {
        if path.is_dir() {
            return self.directory_kind.ok_or(UnistenoError::UnsupportedMedia);
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.extensions.get(&ext.to_ascii_lowercase()))
            .copied()
            .ok_or(UnistenoError::UnsupportedMedia)
    }

    /// opens a carrier, the kind is guessed from the path
    pub fn load(&self, path: &Path, options: &EngineOptions) -> Result<Carrier> {
        self.load_as(self.kind_for_path(path)?, path, options)
    }

    pub fn load_as(
        &self,
        kind: CarrierKind,
        path: &Path,
        options: &EngineOptions,
    ) -> Result<Carrier> {
        let loader = self.loaders.get(&kind).ok_or(UnistenoError::UnsupportedMedia)?;
        debug!("loading {path:?} as {kind} carrier");

        loader(path, options)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::media::CarrierAdapter;

    #[test]
    fn should_map_extensions_to_kinds() {
        let registry = CarrierRegistry::with_defaults();

        for (file, kind) in [
            ("a.png", CarrierKind::Image),
            ("a.JPG", CarrierKind::Image),
            ("b.wav", CarrierKind::Audio),
            ("c.md", CarrierKind::Text),
        ] {
            assert_eq!(registry.kind_for_path(&PathBuf::from(file)).unwrap(), kind);
        }
    }

    #[test]
    fn should_reject_unknown_media() {
        let registry = CarrierRegistry::with_defaults();

        assert!(matches!(
            registry.kind_for_path(Path::new("report.pdf")),
            Err(UnistenoError::UnsupportedMedia)
        ));
        assert!(matches!(
            registry.kind_for_path(Path::new("no_extension")),
            Err(UnistenoError::UnsupportedMedia)
        ));
    }

    #[test]
    fn directories_are_videos() {
        let dir = TempDir::new().unwrap();

        assert_eq!(
            CarrierRegistry::with_defaults()
                .kind_for_path(dir.path())
                .unwrap(),
            CarrierKind::Video
        );
        assert!(CarrierRegistry::empty().kind_for_path(dir.path()).is_err());
    }

    #[test]
    fn should_load_with_an_explicit_kind() {
        let dir = TempDir::new().unwrap();
        let cover = dir.path().join("cover.log");
        std::fs::write(&cover, "just some text").unwrap();
        let registry = CarrierRegistry::with_defaults();

        assert!(registry.load(&cover, &EngineOptions::default()).is_err());
        let carrier = registry
            .load_as(CarrierKind::Text, &cover, &EngineOptions::default())
            .unwrap();
        assert_eq!(carrier.kind(), CarrierKind::Text);
    }

    #[test]
    fn kinds_without_loader_are_unsupported() {
        let mut registry = CarrierRegistry::empty();
        registry.register(CarrierKind::Text, &["txt"], text::load);

        assert!(matches!(
            registry.load_as(
                CarrierKind::Audio,
                Path::new("x.wav"),
                &EngineOptions::default()
            ),
            Err(UnistenoError::UnsupportedMedia)
        ));
    }
}
