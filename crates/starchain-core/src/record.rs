//! Record: one entry of the chain.
//!
//! A record is built from a payload, then stamped exactly once by the ledger
//! when it is appended (timestamp, position, link and fingerprint). After
//! that it is never mutated; callers only ever see clones.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::canonical::canonical_record_bytes;
use crate::encoding::{decode_body, encode_body};
use crate::error::{CoreError, Result};
use crate::types::Fingerprint;

/// The sentinel payload carried by every genesis record.
pub const GENESIS_PAYLOAD: &str = "Genesis Block";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Digest over every other field. `None` until appended.
    pub fingerprint: Option<Fingerprint>,

    /// Index in the chain. 0 is the genesis record.
    pub position: u64,

    /// Hex of the payload's JSON encoding.
    pub body: String,

    /// Unix seconds at append time.
    pub timestamp: i64,

    /// Fingerprint of the record at `position - 1`. `None` for genesis.
    pub previous_fingerprint: Option<Fingerprint>,
}

impl Record {
    /// Build an unstamped record carrying `payload`.
    pub fn new<T: Serialize + ?Sized>(payload: &T) -> Result<Self> {
        Ok(Self {
            fingerprint: None,
            position: 0,
            body: encode_body(payload)?,
            timestamp: 0,
            previous_fingerprint: None,
        })
    }

    /// Build the unstamped genesis record.
    pub fn genesis() -> Result<Self> {
        Self::new(GENESIS_PAYLOAD)
    }

    /// Decode the application payload.
    ///
    /// The genesis body is a sentinel, so decoding position 0 is an error.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        if self.is_genesis() {
            return Err(CoreError::GenesisData);
        }
        decode_body(&self.body)
    }

    /// Compute the fingerprint over the current field values.
    ///
    /// The stored fingerprint does not take part in the computation.
    pub fn compute_fingerprint(&self) -> Fingerprint {
        Fingerprint::digest(&canonical_record_bytes(self))
    }

    /// Check that the stored fingerprint matches the record's content.
    ///
    /// An unstamped record (no fingerprint yet) does not validate.
    pub fn self_validate(&self) -> bool {
        match self.fingerprint {
            Some(stored) => stored == self.compute_fingerprint(),
            None => false,
        }
    }

    pub fn is_genesis(&self) -> bool {
        self.position == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn stamped(payload: serde_json::Value, position: u64) -> Record {
        let mut record = Record::new(&payload).unwrap();
        record.position = position;
        record.timestamp = 1_700_000_000;
        record.previous_fingerprint = Some(Fingerprint::from_bytes([0x01; 32]));
        record.fingerprint = Some(record.compute_fingerprint());
        record
    }

    #[test]
    fn test_new_record_is_unstamped() {
        let record = Record::new(&json!({ "story": "hello" })).unwrap();
        assert_eq!(record.position, 0);
        assert_eq!(record.timestamp, 0);
        assert!(record.fingerprint.is_none());
        assert!(record.previous_fingerprint.is_none());
    }

    #[test]
    fn test_decode_roundtrip() {
        let payload = json!({ "address": "abc", "star": { "dec": "1", "ra": "2", "story": "s" } });
        let record = stamped(payload.clone(), 1);
        let decoded: serde_json::Value = record.decode().unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_decode_genesis_fails() {
        let genesis = Record::genesis().unwrap();
        let result: Result<String> = genesis.decode();
        assert!(matches!(result, Err(CoreError::GenesisData)));
    }

    #[test]
    fn test_self_validate_untampered() {
        assert!(stamped(json!("payload"), 2).self_validate());
    }

    #[test]
    fn test_self_validate_unstamped_fails() {
        let record = Record::new("payload").unwrap();
        assert!(!record.self_validate());
    }

    #[test]
    fn test_self_validate_detects_each_field() {
        let mut r = stamped(json!("payload"), 2);
        r.body = crate::encoding::encode_body("forged").unwrap();
        assert!(!r.self_validate());

        let mut r = stamped(json!("payload"), 2);
        r.timestamp -= 60;
        assert!(!r.self_validate());

        let mut r = stamped(json!("payload"), 2);
        r.position = 5;
        assert!(!r.self_validate());

        let mut r = stamped(json!("payload"), 2);
        r.previous_fingerprint = Some(Fingerprint::from_bytes([0x02; 32]));
        assert!(!r.self_validate());

        let mut r = stamped(json!("payload"), 2);
        r.fingerprint = Some(Fingerprint::from_bytes([0x03; 32]));
        assert!(!r.self_validate());
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let r = stamped(json!({ "a": 1 }), 1);
        assert_eq!(r.compute_fingerprint(), r.clone().compute_fingerprint());
    }

    proptest! {
        #[test]
        fn any_body_swap_is_detected(original in ".{0,64}", forged in ".{0,64}") {
            prop_assume!(original != forged);
            let mut record = stamped(json!(original), 1);
            record.body = encode_body(&forged).unwrap();
            prop_assert!(!record.self_validate());
        }

        #[test]
        fn any_timestamp_shift_is_detected(shift in 1i64..1_000_000) {
            let mut record = stamped(json!("payload"), 1);
            record.timestamp += shift;
            prop_assert!(!record.self_validate());
        }
    }
}
