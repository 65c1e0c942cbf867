//! Embedding and extraction over any [`CarrierAdapter`].
//!
//! Both directions run the same stages:
//! framing, optional sealing, placement derivation, then writing or reading the bits.
//! The engine keeps no state between calls, it only carries its [`EngineOptions`].

mod embed;
mod extract;

pub use embed::EmbedReport;
pub use extract::{CarrierBitReader, Extracted};

use crate::media::{CarrierAdapter, CarrierKind};
use crate::options::{CarrierProfile, EngineOptions};
use crate::payload::{MAX_PAYLOAD_LEN, SEALED_OVERHEAD};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Engine {
    options: EngineOptions,
}

/// What a carrier can take for a given name and password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReport {
    pub kind: CarrierKind,
    /// units payload bits can be placed in
    pub valid_units: usize,
    /// bytes added by framing and sealing
    pub overhead_bytes: usize,
    /// largest payload that still fits
    pub max_payload_bytes: usize,
    pub encrypted: bool,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn capacity_report<C>(&self, carrier: &C, name: &str, password: &str) -> CapacityReport
    where
        C: CarrierAdapter + ?Sized,
    {
        let kind = carrier.kind();
        let profile = CarrierProfile::of(kind);
        let encrypted = profile.seals_with(password);
        let overhead_bytes = profile.layout.overhead(name.len())
            + if encrypted { SEALED_OVERHEAD } else { 0 };
        let valid_units = carrier.valid_indices().len();

        CapacityReport {
            kind,
            valid_units,
            overhead_bytes,
            max_payload_bytes: (valid_units / 8)
                .saturating_sub(overhead_bytes)
                .min(MAX_PAYLOAD_LEN),
            encrypted,
        }
    }
}
