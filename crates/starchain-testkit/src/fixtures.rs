//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use starchain::{Ed25519Verifier, Ledger, LedgerConfig, ManualClock, Record, Result};
use starchain_core::{Address, Keypair, Star};

/// A fixed instant used as "now" by clock-driven tests.
pub const T0: i64 = 1_700_000_000;

/// A wallet that can answer ownership challenges.
#[derive(Debug, Clone)]
pub struct TestWallet {
    pub keypair: Keypair,
}

impl TestWallet {
    /// Create a wallet with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create a wallet with a deterministic keypair.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
        }
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.keypair.public_key())
    }

    /// Sign a challenge message, returning the hex signature the ledger's
    /// Ed25519 verifier expects.
    pub fn sign_challenge(&self, message: &str) -> String {
        self.keypair.sign(message.as_bytes()).to_hex()
    }

    /// Run the whole flow: request a challenge, sign it, submit `star`.
    pub async fn register(&self, ledger: &Ledger, star: &Star) -> Result<Record> {
        let address = self.address();
        let message = ledger.request_challenge(&address);
        let signature = self.sign_challenge(&message);
        ledger
            .submit_record(&address, &message, &signature, star)
            .await
    }
}

impl Default for TestWallet {
    fn default() -> Self {
        Self::new()
    }
}

/// A ledger with the default configuration on a manual clock set to `now`.
pub async fn ledger_at(now: i64) -> (Ledger, Arc<ManualClock>) {
    ledger_with_config(now, LedgerConfig::default()).await
}

/// A ledger with `config` on a manual clock set to `now`.
pub async fn ledger_with_config(now: i64, config: LedgerConfig) -> (Ledger, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(now));
    match Ledger::with_clock(Ed25519Verifier, config, clock.clone()).await {
        Ok(ledger) => (ledger, clock),
        Err(e) => panic!("test ledger failed to initialize: {}", e),
    }
}

/// A valid star whose story identifies it.
pub fn sample_star(story: &str) -> Star {
    Star::new("68° 52' 56.9", "16h 29m 1.0s", story)
}

/// Several wallets with distinct deterministic keys.
pub fn wallets(n: u8) -> Vec<TestWallet> {
    (0..n).map(|i| TestWallet::from_seed([i + 1; 32])).collect()
}
