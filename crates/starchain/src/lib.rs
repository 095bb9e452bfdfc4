//! # Starchain
//!
//! An in-memory, append-only chain of records with an ownership gate in
//! front of writes.
//!
//! ## Overview
//!
//! - **Ledger**: owns the chain, creates genesis, appends and validates
//! - **Challenge**: a time-stamped message a caller signs to prove they
//!   control an address
//! - **Admission**: a signed challenge that is still fresh lets the caller
//!   append a star owned by that address
//!
//! ## Usage
//!
//! ```rust,no_run
//! use starchain::{Address, Ed25519Verifier, Keypair, Ledger, LedgerConfig, Star};
//!
//! async fn example() -> starchain::Result<()> {
//!     let ledger = Ledger::new(Ed25519Verifier, LedgerConfig::default()).await?;
//!
//!     let wallet = Keypair::generate();
//!     let address = Address::from_public_key(&wallet.public_key());
//!
//!     let message = ledger.request_challenge(&address);
//!     let signature = wallet.sign(message.as_bytes()).to_hex();
//!
//!     let star = Star::new("68° 52' 56.9", "16h 29m 1.0s", "first light");
//!     ledger.submit_record(&address, &message, &signature, &star).await?;
//!
//!     let stars: Vec<Star> = ledger.payloads_by_owner(&address).await?;
//!     assert_eq!(stars.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `starchain::core` - Core primitives (Record, Fingerprint, etc.)

pub mod challenge;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod verifier;

pub use starchain_core as core;

pub use challenge::{Challenge, CHALLENGE_DELIMITER};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LedgerConfig;
pub use error::{DenialReason, LedgerError, Result};
pub use ledger::{Ledger, OwnedPayload};
pub use verifier::{Ed25519Verifier, SignatureVerifier};

pub use starchain_core::{
    Address, ChainReport, Ed25519PublicKey, Ed25519Signature, Fingerprint, Keypair, Payload,
    Record, RecordOutcome, Star,
};
