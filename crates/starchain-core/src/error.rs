//! Error types for Starchain Core.

use thiserror::Error;

use crate::types::Fingerprint;

/// Core errors that can occur during record operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("the genesis record carries no application data")]
    GenesisData,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid star: {0}")]
    InvalidStar(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Integrity issues found while checking a single record.
///
/// These are reported as data inside a [`crate::ChainReport`]; they only
/// become fatal when they block an append.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("record at position {0} has no fingerprint")]
    MissingFingerprint(u64),

    #[error("fingerprint mismatch at position {position}: stored {stored}, computed {computed}")]
    FingerprintMismatch {
        position: u64,
        stored: Fingerprint,
        computed: Fingerprint,
    },

    #[error("broken link at position {position}: expected {expected:?}, got {got:?}")]
    BrokenLink {
        position: u64,
        expected: Option<Fingerprint>,
        got: Option<Fingerprint>,
    },

    #[error("record stored at index {index} claims position {claimed}")]
    UnexpectedPosition { index: u64, claimed: u64 },
}
