//! Error types for the ledger.

use starchain_core::CoreError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
///
/// Every error is local to the call that produced it; none leaves the chain
/// partially modified.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Payload encoding, decoding or genesis access error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Lookup miss.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The existing chain failed validation, so the append was refused.
    #[error("chain failed validation at positions {failed_positions:?}")]
    ChainInvalid { failed_positions: Vec<u64> },

    /// The ownership proof was rejected; nothing was appended.
    #[error("admission denied: {0}")]
    AdmissionDenied(DenialReason),
}

/// Why a submission was not admitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenialReason {
    #[error("malformed challenge message: {0}")]
    MalformedChallenge(String),

    #[error("challenge was issued to {issued_to}, not {submitted_by}")]
    AddressMismatch {
        issued_to: String,
        submitted_by: String,
    },

    #[error("challenge expired {elapsed}s after issue (window is {window}s)")]
    ChallengeExpired { elapsed: i64, window: u64 },

    #[error("challenge timestamp {issued_at} is in the future")]
    ChallengeFromFuture { issued_at: i64 },

    #[error("signature does not prove ownership of the address")]
    InvalidSignature,
}

impl From<DenialReason> for LedgerError {
    fn from(reason: DenialReason) -> Self {
        LedgerError::AdmissionDenied(reason)
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
