//! # Starchain Core
//!
//! Pure primitives for Starchain: records, fingerprints, and canonicalization.
//!
//! This crate contains no I/O, no locking, no clocks. It is pure computation
//! over the data structures the ledger links together.
//!
//! ## Key Types
//!
//! - [`Record`] - One entry of the chain: encoded body plus linkage
//! - [`Fingerprint`] - Content digest of a record (Blake3)
//! - [`Address`] - The owner identity a caller proves control of
//! - [`Star`] - The application payload the registry stores
//!
//! ## Canonicalization
//!
//! Fingerprints are computed over deterministic CBOR. See [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod record;
pub mod star;
pub mod types;
pub mod validation;

pub use canonical::canonical_record_bytes;
pub use crypto::{Ed25519PublicKey, Ed25519Signature, Keypair};
pub use encoding::{decode_body, encode_body};
pub use error::{CoreError, Result, ValidationError};
pub use record::{Record, GENESIS_PAYLOAD};
pub use star::{Payload, Star};
pub use types::{Address, Fingerprint};
pub use validation::{validate_record, ChainReport, RecordOutcome};
