//! # Starchain Testkit
//!
//! Testing utilities for Starchain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: wallets that answer ownership challenges and ledgers on a
//!   manual clock
//! - **Generators**: proptest strategies for stars, addresses and payloads
//!
//! ## Test Fixtures
//!
//! ```rust
//! use starchain_testkit::fixtures::TestWallet;
//!
//! let wallet = TestWallet::from_seed([0x01; 32]);
//! let message = format!("{}:1700000000:starRegistry", wallet.address());
//! let signature = wallet.sign_challenge(&message);
//! assert_eq!(signature.len(), 128);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use starchain_testkit::generators::star;
//!
//! proptest! {
//!     #[test]
//!     fn stars_validate(s in star()) {
//!         prop_assert!(s.validate().is_ok());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{ledger_at, ledger_with_config, sample_star, wallets, TestWallet, T0};
pub use generators::{address, json_payload, star, wallet};
