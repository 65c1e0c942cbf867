use log::debug;
use zeroize::Zeroizing;

use super::Engine;
use crate::bits;
use crate::error::UnistenoError;
use crate::media::CarrierAdapter;
use crate::options::CarrierProfile;
use crate::payload::seal;
use crate::permutation::Placement;
use crate::result::Result;
use crate::seed::seed_from_password;

/// Outcome of a successful embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedReport {
    pub bits_written: usize,
    /// valid units the carrier offered
    pub capacity: usize,
    pub encrypted: bool,
}

impl Engine {
    /// Hides `payload` under `name` in the carrier.
    ///
    /// The carrier is only touched once the whole bitstream is known to fit,
    /// on [`UnistenoError::Capacity`] it is left as it was.
    pub fn embed<C>(
        &self,
        carrier: &mut C,
        payload: &[u8],
        password: &str,
        name: &str,
    ) -> Result<EmbedReport>
    where
        C: CarrierAdapter + ?Sized,
    {
        let kind = carrier.kind();
        let profile = CarrierProfile::of(kind);

        let frame = Zeroizing::new(profile.layout.build(name, payload)?);
        debug!("framed {} payload bytes into {} bytes", payload.len(), frame.len());

        let encrypted = profile.seals_with(password);
        let blob = if encrypted {
            let sealed = seal(&frame, password, &self.options.kdf)?;
            debug!("sealed frame into {} bytes", sealed.len());
            Zeroizing::new(sealed)
        } else {
            frame
        };

        let bits = bits::expand(&blob)?;
        let valid = carrier.valid_indices();
        if bits.len() > valid.len() {
            return Err(UnistenoError::Capacity {
                required: bits.len(),
                available: valid.len(),
            });
        }

        let placement = Placement::derive(
            profile.placement,
            seed_from_password(password),
            valid.len(),
        );
        debug!(
            "placement derived over {} valid units of the {kind} carrier",
            placement.len()
        );

        for (i, bit) in bits.iter().enumerate() {
            carrier.write_bit(valid.get(placement.position(i)), *bit);
        }
        debug!("written {} bits", bits.len());

        Ok(EmbedReport {
            bits_written: bits.len(),
            capacity: valid.len(),
            encrypted,
        })
    }
}
