//! Payload encoding: hex of JSON.
//!
//! Bodies are stored as lowercase hex of the payload's JSON serialization, so
//! the chain only ever sees a transport-safe string.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CoreError, Result};

/// Encode a payload into the opaque body representation.
pub fn encode_body<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    let json = serde_json::to_vec(payload).map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(hex::encode(json))
}

/// Decode a body produced by [`encode_body`].
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    let json = hex::decode(body).map_err(|e| CoreError::Decoding(e.to_string()))?;
    serde_json::from_slice(&json).map_err(|e| CoreError::Decoding(e.to_string()))
}
