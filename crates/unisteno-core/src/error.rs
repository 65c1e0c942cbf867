use thiserror::Error;

use crate::media::CarrierKind;

pub use unisteno_cipher::CipherError;

/// Reasons why data found on a carrier (or handed in for framing) does not form a valid frame
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatIssue {
    #[error("magic marker is missing")]
    MagicMismatch,

    #[error("name length {0} exceeds the sanity bound")]
    NameLengthOutOfBounds(usize),

    #[error("payload length {0} exceeds the sanity bound")]
    PayloadLengthOutOfBounds(usize),

    #[error("sealed length {0} exceeds the sanity bound")]
    SealedLengthOutOfBounds(usize),

    #[error("name is not valid UTF-8")]
    InvalidName,

    #[error("a declared field runs past the end of the carrier")]
    Truncated,

    #[error("input cannot be decoded as {0} carrier")]
    UndecodableCarrier(CarrierKind),
}

#[derive(Error, Debug)]
pub enum UnistenoError {
    /// Represents a payload that does not fit into the valid units of a carrier, nothing was written
    #[error("Capacity Error: {required} bits are required, but the carrier offers only {available}")]
    Capacity { required: usize, available: usize },

    /// Represents data that does not form a frame, the usual outcome of a wrong password or a plain carrier
    #[error("Format Error: {0}")]
    Format(FormatIssue),

    /// Represents a checksum mismatch after a frame was parsed successfully
    #[error("Integrity Error: checksum {expected:#010x} was stored, but {actual:#010x} was computed")]
    Integrity { expected: u32, actual: u32 },

    /// Represents a failure of sealing or opening an encrypted blob
    #[error("Crypto Error")]
    Crypto(#[source] CipherError),

    /// Represents an unsupported carrier media. For example, a PDF file is not supported
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure when encoding an audio file.
    #[error("Audio encoding error")]
    AudioEncodingError,

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Represents a video carrier whose remaining frames were already streamed out
    #[error("Carrier was already persisted")]
    CarrierAlreadyPersisted,

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing payload, neither a message nor a file was given")]
    MissingPayload,
}

impl UnistenoError {
    /// True for all errors an end user should simply read as "no payload found or wrong password"
    pub fn is_no_payload_found(&self) -> bool {
        matches!(
            self,
            UnistenoError::Format(_) | UnistenoError::Integrity { .. } | UnistenoError::Crypto(_)
        )
    }
}

impl From<FormatIssue> for UnistenoError {
    fn from(issue: FormatIssue) -> Self {
        UnistenoError::Format(issue)
    }
}

impl From<CipherError> for UnistenoError {
    fn from(e: CipherError) -> Self {
        UnistenoError::Crypto(e)
    }
}
