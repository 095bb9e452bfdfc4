//! End-to-end ownership flow through the public API.

use std::sync::Arc;

use starchain::{
    Address, DenialReason, Ed25519Verifier, Keypair, Ledger, LedgerConfig, LedgerError,
    ManualClock, Star,
};

const T0: i64 = 1_736_870_400;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("starchain=debug")
        .try_init();
}

async fn ledger() -> (Ledger, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(T0));
    let ledger = Ledger::with_clock(Ed25519Verifier, LedgerConfig::default(), clock.clone())
        .await
        .unwrap();
    (ledger, clock)
}

#[tokio::test]
async fn test_register_and_query_stars() {
    init_tracing();
    let (ledger, clock) = ledger().await;

    let alice = Keypair::from_seed(&[0xa1; 32]);
    let bob = Keypair::from_seed(&[0xb0; 32]);
    let alice_addr = Address::from_public_key(&alice.public_key());
    let bob_addr = Address::from_public_key(&bob.public_key());

    let orion = Star::new("-5° 23' 28", "5h 35m 17.3s", "Orion nebula").with_constellation("Orion");
    let vega = Star::new("38° 47' 1", "18h 36m 56.3s", "Vega");
    let deneb = Star::new("45° 16' 49", "20h 41m 25.9s", "Deneb").with_magnitude("1.25");

    for (wallet, address, star) in [
        (&alice, &alice_addr, &orion),
        (&bob, &bob_addr, &vega),
        (&alice, &alice_addr, &deneb),
    ] {
        let message = ledger.request_challenge(address);
        clock.advance(30);
        let signature = wallet.sign(message.as_bytes()).to_hex();
        ledger
            .submit_record(address, &message, &signature, star)
            .await
            .unwrap();
    }

    assert_eq!(ledger.height().await, 3);

    let alice_stars: Vec<Star> = ledger.payloads_by_owner(&alice_addr).await.unwrap();
    assert_eq!(alice_stars, vec![orion, deneb]);

    let bob_stars: Vec<Star> = ledger.payloads_by_owner(&bob_addr).await.unwrap();
    assert_eq!(bob_stars, vec![vega]);

    let report = ledger.validate_chain().await;
    assert!(report.is_valid());
    assert_eq!(report.outcomes.len(), 4);
}

#[tokio::test]
async fn test_lookup_roundtrip_by_fingerprint_and_position() {
    let (ledger, _clock) = ledger().await;
    let wallet = Keypair::from_seed(&[0x33; 32]);
    let address = Address::from_public_key(&wallet.public_key());

    let message = ledger.request_challenge(&address);
    let signature = wallet.sign(message.as_bytes()).to_hex();
    let record = ledger
        .submit_record(&address, &message, &signature, &Star::new("1", "2", "lookup"))
        .await
        .unwrap();

    let fingerprint = record.fingerprint.unwrap();
    assert_eq!(ledger.lookup_by_fingerprint(&fingerprint).await.unwrap(), record);
    assert_eq!(ledger.lookup_by_position(1).await.unwrap(), record);

    let hex = fingerprint.to_hex();
    let parsed = starchain::Fingerprint::from_hex(&hex).unwrap();
    assert_eq!(ledger.lookup_by_fingerprint(&parsed).await.unwrap(), record);
}

#[tokio::test]
async fn test_denied_submission_can_be_retried_with_fresh_challenge() {
    init_tracing();
    let (ledger, clock) = ledger().await;
    let wallet = Keypair::from_seed(&[0x44; 32]);
    let address = Address::from_public_key(&wallet.public_key());
    let star = Star::new("1", "2", "retry");

    let stale = ledger.request_challenge(&address);
    let stale_sig = wallet.sign(stale.as_bytes()).to_hex();
    clock.advance(301);

    let denied = ledger
        .submit_record(&address, &stale, &stale_sig, &star)
        .await
        .unwrap_err();
    assert!(matches!(
        denied,
        LedgerError::AdmissionDenied(DenialReason::ChallengeExpired { .. })
    ));
    assert_eq!(ledger.height().await, 0);

    let fresh = ledger.request_challenge(&address);
    let fresh_sig = wallet.sign(fresh.as_bytes()).to_hex();
    let record = ledger
        .submit_record(&address, &fresh, &fresh_sig, &star)
        .await
        .unwrap();
    assert_eq!(record.position, 1);
    assert_eq!(record.timestamp, T0 + 301);
}

#[tokio::test]
async fn test_genesis_is_not_application_data() {
    let (ledger, _clock) = ledger().await;
    let genesis = ledger.lookup_by_position(0).await.unwrap();

    assert!(matches!(
        genesis.decode::<serde_json::Value>(),
        Err(starchain::core::CoreError::GenesisData)
    ));
    let none: Vec<Star> = ledger
        .payloads_by_owner(&Address::from("nobody"))
        .await
        .unwrap();
    assert!(none.is_empty());
}
