//! The Ledger: owner of the chain.
//!
//! The ledger creates the genesis record on construction and afterwards only
//! ever appends. All mutation goes through a single write lock, so concurrent
//! appends are serialized and readers see either the state before an append
//! or the state after it.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use starchain_core::{Address, ChainReport, CoreError, Fingerprint, Payload, Record};

use crate::challenge::Challenge;
use crate::clock::{Clock, SystemClock};
use crate::config::LedgerConfig;
use crate::error::{DenialReason, LedgerError, Result};
use crate::verifier::{Ed25519Verifier, SignatureVerifier};

/// The body of every admitted record: the payload plus the address that
/// proved ownership when submitting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedPayload<T> {
    pub address: Address,
    pub star: T,
}

/// Records in position order, plus a fingerprint index.
#[derive(Default)]
struct Chain {
    records: Vec<Record>,
    by_fingerprint: HashMap<Fingerprint, usize>,
}

impl Chain {
    fn height(&self) -> i64 {
        self.records.len() as i64 - 1
    }

    fn find_by_fingerprint(&self, fingerprint: &Fingerprint) -> Option<&Record> {
        // The index is a shortcut only; the stored field is authoritative.
        self.by_fingerprint
            .get(fingerprint)
            .and_then(|&i| self.records.get(i))
            .filter(|r| r.fingerprint.as_ref() == Some(fingerprint))
            .or_else(|| {
                self.records
                    .iter()
                    .find(|r| r.fingerprint.as_ref() == Some(fingerprint))
            })
    }

    fn find_by_position(&self, position: u64) -> Option<&Record> {
        usize::try_from(position)
            .ok()
            .and_then(|i| self.records.get(i))
            .filter(|r| r.position == position)
            .or_else(|| self.records.iter().find(|r| r.position == position))
    }
}

/// An in-memory, hash-linked chain with an ownership gate on writes.
///
/// The signature scheme is pluggable through `V`; the default verifies
/// Ed25519 signatures against hex-encoded public key addresses.
pub struct Ledger<V: SignatureVerifier = Ed25519Verifier> {
    chain: RwLock<Chain>,
    verifier: V,
    clock: Arc<dyn Clock>,
    config: LedgerConfig,
}

impl<V: SignatureVerifier> Ledger<V> {
    /// Create a ledger using wall-clock time. Genesis is created before this
    /// returns.
    pub async fn new(verifier: V, config: LedgerConfig) -> Result<Self> {
        Self::with_clock(verifier, config, Arc::new(SystemClock)).await
    }

    /// Create a ledger with an explicit time source.
    pub async fn with_clock(
        verifier: V,
        config: LedgerConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let ledger = Self {
            chain: RwLock::new(Chain::default()),
            verifier,
            clock,
            config,
        };
        ledger.initialize().await?;
        Ok(ledger)
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Append the genesis record if the chain is empty. Idempotent.
    pub async fn initialize(&self) -> Result<()> {
        let mut chain = self.chain.write().await;
        if chain.records.is_empty() {
            let genesis = self.append_locked(&mut chain, Record::genesis()?)?;
            info!(
                fingerprint = %genesis.fingerprint.map(|f| f.to_hex()).unwrap_or_default(),
                "created genesis record"
            );
        }
        Ok(())
    }

    /// Append a record to the tail of the chain.
    ///
    /// The whole existing chain is validated first; if any record fails, the
    /// append is refused and the chain is left untouched. On success the
    /// returned record is a copy of the stamped tail.
    pub async fn append(&self, record: Record) -> Result<Record> {
        let mut chain = self.chain.write().await;
        self.append_locked(&mut chain, record)
    }

    fn append_locked(&self, chain: &mut Chain, mut record: Record) -> Result<Record> {
        if !chain.records.is_empty() {
            let report = ChainReport::check(&chain.records);
            if !report.is_valid() {
                let failed_positions = report.failed_positions();
                warn!(?failed_positions, "refusing append to a chain that fails validation");
                return Err(LedgerError::ChainInvalid { failed_positions });
            }
        }

        record.timestamp = self.clock.now_secs();
        record.position = chain.records.len() as u64;
        record.previous_fingerprint = chain.records.last().and_then(|r| r.fingerprint);

        let fingerprint = record.compute_fingerprint();
        record.fingerprint = Some(fingerprint);

        chain.by_fingerprint.insert(fingerprint, chain.records.len());
        chain.records.push(record.clone());

        debug!(
            position = record.position,
            fingerprint = %fingerprint,
            "appended record"
        );
        Ok(record)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership gate
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue the message `address` must sign to prove ownership.
    ///
    /// Nothing is remembered; freshness is checked from the timestamp
    /// embedded in the message when it comes back.
    pub fn request_challenge(&self, address: &Address) -> String {
        let challenge =
            Challenge::issue(address, self.clock.now_secs(), &self.config.protocol_tag);
        debug!(%address, issued_at = challenge.issued_at, "issued ownership challenge");
        challenge.to_message()
    }

    /// Append `payload` on behalf of `address` after checking the ownership
    /// proof.
    ///
    /// The submission is admitted only if `message` is a challenge for
    /// `address` carrying this ledger's tag, less than the validity window
    /// old, and `signature` is a valid signature by `address` over exactly
    /// `message`. The payload must also pass [`Payload::check`]. A denied or
    /// rejected submission appends nothing.
    pub async fn submit_record<T: Payload + ?Sized>(
        &self,
        address: &Address,
        message: &str,
        signature: &str,
        payload: &T,
    ) -> Result<Record> {
        if let Err(e) = payload.check() {
            warn!(%address, error = %e, "payload rejected");
            return Err(e.into());
        }

        self.check_admission(address, message, signature)
            .await
            .map_err(|reason| {
                warn!(%address, %reason, "submission denied");
                LedgerError::from(reason)
            })?;

        let record = Record::new(&OwnedPayload {
            address: address.clone(),
            star: payload,
        })?;
        let record = self.append(record).await?;

        info!(%address, position = record.position, "admitted record");
        Ok(record)
    }

    async fn check_admission(
        &self,
        address: &Address,
        message: &str,
        signature: &str,
    ) -> std::result::Result<(), DenialReason> {
        let challenge = Challenge::parse(message)?;

        if challenge.address != *address {
            return Err(DenialReason::AddressMismatch {
                issued_to: challenge.address.to_string(),
                submitted_by: address.to_string(),
            });
        }
        if challenge.tag != self.config.protocol_tag {
            return Err(DenialReason::MalformedChallenge(format!(
                "unexpected tag {:?}",
                challenge.tag
            )));
        }

        challenge.check_fresh(self.clock.now_secs(), self.config.window_secs())?;

        self.verifier
            .verify(message, address, signature)
            .await
            .map_err(|e| {
                debug!(error = %e, "signature verification failed");
                DenialReason::InvalidSignature
            })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Position of the tail record; -1 only before genesis exists.
    pub async fn height(&self) -> i64 {
        self.chain.read().await.height()
    }

    pub async fn len(&self) -> usize {
        self.chain.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chain.read().await.records.is_empty()
    }

    pub async fn tail(&self) -> Option<Record> {
        self.chain.read().await.records.last().cloned()
    }

    /// A copy of the whole chain in position order.
    pub async fn snapshot(&self) -> Vec<Record> {
        self.chain.read().await.records.clone()
    }

    pub async fn lookup_by_fingerprint(&self, fingerprint: &Fingerprint) -> Result<Record> {
        let chain = self.chain.read().await;
        chain
            .find_by_fingerprint(fingerprint)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("fingerprint {}", fingerprint.to_hex())))
    }

    pub async fn lookup_by_position(&self, position: u64) -> Result<Record> {
        let chain = self.chain.read().await;
        chain
            .find_by_position(position)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("position {}", position)))
    }

    /// Collect the payloads submitted by `address`, in append order.
    ///
    /// Genesis is skipped without decoding. Records whose body is not an
    /// owned payload (appended directly rather than through
    /// [`Ledger::submit_record`]) belong to nobody and are skipped. No match
    /// is an empty list, not an error.
    pub async fn payloads_by_owner<T: DeserializeOwned>(&self, address: &Address) -> Result<Vec<T>> {
        let chain = self.chain.read().await;
        let mut payloads = Vec::new();

        for record in chain.records.iter().filter(|r| !r.is_genesis()) {
            let body: serde_json::Value = record.decode()?;
            let Ok(owned) = serde_json::from_value::<OwnedPayload<serde_json::Value>>(body) else {
                continue;
            };
            if owned.address != *address {
                continue;
            }
            let payload = serde_json::from_value(owned.star)
                .map_err(|e| CoreError::Decoding(e.to_string()))?;
            payloads.push(payload);
        }

        debug!(%address, count = payloads.len(), "aggregated payloads by owner");
        Ok(payloads)
    }

    /// Validate every record's link and fingerprint.
    ///
    /// All outcomes are returned; a single bad record makes the report
    /// invalid but does not hide the results for the others.
    pub async fn validate_chain(&self) -> ChainReport {
        let chain = self.chain.read().await;
        let report = ChainReport::check(&chain.records);
        if !report.is_valid() {
            warn!(failed_positions = ?report.failed_positions(), "chain failed validation");
        }
        report
    }
}
