//! Ed25519 keys and signatures used to prove control of an address.
//!
//! Everything crosses the ledger boundary as lowercase hex: an Ed25519
//! address is the hex of its public key, and the answer to a challenge is the
//! hex of a 64-byte signature over the challenge message. Wallets live outside
//! the ledger; [`Keypair`] exists so callers and tests can answer challenges.

use std::fmt;

use ed25519_dalek::{
    Signature, Signer, SigningKey, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};

use crate::error::CoreError;

/// Decode a hex string of exactly `N` bytes.
fn decode_exact<const N: usize>(s: &str) -> Option<[u8; N]> {
    hex::decode(s).ok()?.try_into().ok()
}

/// An Ed25519 public key. Parsing rejects bytes that are not a curve point.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519PublicKey(VerifyingKey);

impl Ed25519PublicKey {
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = decode_exact::<PUBLIC_KEY_LENGTH>(s).ok_or(CoreError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes)
            .map(Self)
            .map_err(|_| CoreError::InvalidPublicKey)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }

    /// Check `signature` over `message`.
    ///
    /// Uses strict verification, so small-order keys and non-canonical
    /// signatures are refused.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<(), CoreError> {
        self.0
            .verify_strict(message, &signature.0)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({})", &self.to_hex()[..16])
    }
}

/// A detached Ed25519 signature over a challenge message.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(Signature);

impl Ed25519Signature {
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        decode_exact::<SIGNATURE_LENGTH>(s)
            .map(|bytes| Self(Signature::from_bytes(&bytes)))
            .ok_or(CoreError::InvalidSignature)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_bytes())
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Sig({}...)", &self.to_hex()[..16])
    }
}

/// A signing key able to answer ownership challenges.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut rand::thread_rng()),
        }
    }

    /// Deterministic keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key())
    }

    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(message))
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}
