//! Signature verification: the capability that proves address ownership.
//!
//! The ledger never handles keys. It asks a [`SignatureVerifier`] whether a
//! signature over a challenge message was made by the holder of an address.

use async_trait::async_trait;
use starchain_core::{Address, CoreError, Ed25519PublicKey, Ed25519Signature};

/// Checks that `signature` was produced by `address` over exactly `message`.
///
/// Implementations return `Ok(())` only for a valid signature. Any error,
/// including an address or signature the scheme cannot parse, denies the
/// submission.
#[async_trait]
pub trait SignatureVerifier: Send + Sync {
    async fn verify(
        &self,
        message: &str,
        address: &Address,
        signature: &str,
    ) -> Result<(), CoreError>;
}

/// Ed25519 message signing.
///
/// The address is the hex-encoded public key and the signature is the
/// hex-encoded 64-byte Ed25519 signature over the message's UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

#[async_trait]
impl SignatureVerifier for Ed25519Verifier {
    async fn verify(
        &self,
        message: &str,
        address: &Address,
        signature: &str,
    ) -> Result<(), CoreError> {
        let key = Ed25519PublicKey::from_hex(address.as_str())?;
        let signature = Ed25519Signature::from_hex(signature)?;
        key.verify(message.as_bytes(), &signature)
    }
}
