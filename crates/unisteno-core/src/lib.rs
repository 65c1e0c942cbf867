//! # Unisteno Core API
//!
//! Hides a named payload in the least significant bits of images, audio, video frames
//! and text, and recovers it later.
//!
//! The building blocks, from the bottom up:
//! - [`seed`] turns a password into the placement seed
//! - [`permutation`] spreads the bits over the carrier units
//! - [`payload`] frames name and payload and optionally seals them with the password
//! - [`media`] adapts every carrier to the same bit level [`CarrierAdapter`] contract
//! - [`engine`] runs embedding and extraction over any adapter
//! - [`registry`], [`api`] and [`commands`] work on files
//!
//! # Usage Examples
//!
//! ## Hide and unveil in memory
//!
//! ```rust
//! use image::{Rgb, RgbImage};
//! use unisteno_core::media::image::ImageCarrier;
//! use unisteno_core::Engine;
//!
//! let mut carrier = ImageCarrier::from_rgb(RgbImage::from_pixel(16, 16, Rgb([10, 20, 30])));
//! let engine = Engine::default();
//!
//! engine
//!     .embed(&mut carrier, b"Hello, world!", "SuperSecret42", "note.txt")
//!     .expect("Failed to hide the note");
//!
//! let extracted = engine
//!     .extract(&carrier, "SuperSecret42")
//!     .expect("Failed to unveil the note");
//! assert_eq!(extracted.name, "note.txt");
//! assert_eq!(extracted.payload, b"Hello, world!");
//! ```
//!
//! ## Hide data inside an image file
//!
//! ```rust
//! use image::{Rgb, RgbImage};
//! use tempfile::tempdir;
//! use unisteno_core::CarrierRegistry;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let carrier = temp_dir.path().join("carrier.png");
//! RgbImage::from_pixel(128, 128, Rgb([1, 2, 3])).save(&carrier).unwrap();
//! let registry = CarrierRegistry::with_defaults();
//!
//! unisteno_core::api::hide::prepare(&registry)
//!     .with_payload_file("Cargo.toml")   // will hide this file inside the image
//!     .with_carrier(&carrier)
//!     .with_output(temp_dir.path().join("image-with-a-file-inside.png"))
//!     .execute()
//!     .expect("Failed to hide file in image");
//!
//! let unveiled = unisteno_core::api::unveil::prepare(&registry)
//!     .from_secret_file(temp_dir.path().join("image-with-a-file-inside.png"))
//!     .into_output_folder(temp_dir.path().join("unveiled"))
//!     .execute()
//!     .expect("Failed to unveil file from image");
//! assert!(unveiled.ends_with("Cargo.toml"));
//! ```

#![warn(
    // clippy::unwrap_used,
    // clippy::expect_used,
    // clippy::cast_lossless,
    // clippy::missing_panics_doc,
    clippy::redundant_else,
)]

pub mod api;
pub mod bits;
pub mod commands;
pub mod engine;
pub mod error;
pub mod media;
pub mod options;
pub mod payload;
pub mod permutation;
pub mod registry;
pub mod result;
pub mod seed;

pub use crate::engine::{CapacityReport, EmbedReport, Engine, Extracted};
pub use crate::error::{FormatIssue, UnistenoError};
pub use crate::media::{Carrier, CarrierAdapter, CarrierKind, Persist};
pub use crate::options::{CarrierProfile, EngineOptions, KdfParams};
pub use crate::registry::CarrierRegistry;
pub use crate::result::Result;
