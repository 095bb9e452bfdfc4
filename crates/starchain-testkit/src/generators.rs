//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::Value;

use starchain_core::star::MAX_STORY_BYTES;
use starchain_core::{Address, Star};

use crate::fixtures::TestWallet;

/// Generate a wallet with a random deterministic seed.
pub fn wallet() -> impl Strategy<Value = TestWallet> {
    any::<[u8; 32]>().prop_map(TestWallet::from_seed)
}

/// Generate an address. Never contains the challenge delimiter.
pub fn address() -> impl Strategy<Value = Address> {
    "[a-zA-Z0-9]{1,40}".prop_map(Address::from)
}

/// Generate a star that passes [`Star::validate`].
pub fn star() -> impl Strategy<Value = Star> {
    (
        "[0-9]{1,2}° [0-9]{1,2}' [0-9]{1,2}\\.[0-9]",
        "[0-9]{1,2}h [0-9]{1,2}m [0-9]{1,2}\\.[0-9]s",
        prop::collection::vec(any::<char>(), 0..=MAX_STORY_BYTES / 4),
        prop::option::of("[0-9]\\.[0-9]"),
        prop::option::of("[A-Z][a-z]{2,10}"),
    )
        .prop_map(|(dec, ra, story, mag, cen)| Star {
            dec,
            ra,
            story: story.into_iter().collect(),
            mag,
            cen,
        })
}

/// Generate an arbitrary JSON payload (no floats, which need not round-trip
/// bit for bit).
pub fn json_payload() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        ".{0,32}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}
