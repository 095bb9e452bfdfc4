//! Canonical CBOR encoding for fingerprint computation.
//!
//! This module implements the subset of RFC 8949 Core Deterministic Encoding
//! that record headers need:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps are i64 seconds)
//!
//! The fingerprint field is never part of the encoding. A record's
//! fingerprint is a digest of everything else, so recomputing it over a
//! stored record reproduces the stored value unless a field changed.

use ciborium::value::Value;

use crate::record::Record;

/// Record field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR. There is deliberately no key
/// for the fingerprint.
mod keys {
    pub const POSITION: u64 = 0;
    pub const TIMESTAMP: u64 = 1;
    pub const PREVIOUS_FINGERPRINT: u64 = 2;
    pub const BODY: u64 = 3;
}

/// Encode a record (minus its fingerprint) to canonical CBOR bytes.
pub fn canonical_record_bytes(record: &Record) -> Vec<u8> {
    let value = record_to_cbor_value(record);
    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value);
    buf
}

fn record_to_cbor_value(record: &Record) -> Value {
    let previous = match &record.previous_fingerprint {
        Some(fp) => Value::Bytes(fp.0.to_vec()),
        None => Value::Null,
    };

    Value::Map(vec![
        (
            Value::Integer(keys::POSITION.into()),
            Value::Integer(record.position.into()),
        ),
        (
            Value::Integer(keys::TIMESTAMP.into()),
            Value::Integer(record.timestamp.into()),
        ),
        (Value::Integer(keys::PREVIOUS_FINGERPRINT.into()), previous),
        (
            Value::Integer(keys::BODY.into()),
            Value::Text(record.body.clone()),
        ),
    ])
}

fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => {
            encode_uint(buf, 2, b.len() as u64);
            buf.extend_from_slice(b);
        }
        Value::Text(s) => {
            encode_uint(buf, 3, s.len() as u64);
            buf.extend_from_slice(s.as_bytes());
        }
        Value::Map(entries) => encode_map_canonical(buf, entries),
        Value::Null => buf.push(0xf6),
        _ => panic!("unsupported CBOR value type in record header"),
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let abs = (-1 - n) as u64;
        encode_uint(buf, 1, abs);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}
