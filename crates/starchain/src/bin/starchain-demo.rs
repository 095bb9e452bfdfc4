//! Walks one wallet through the ownership flow against an in-memory ledger.
//!
//! Log verbosity follows `RUST_LOG` (default `info`); the window and tag can
//! be overridden with `STARCHAIN_VALIDITY_WINDOW_SECS` and
//! `STARCHAIN_PROTOCOL_TAG`.

use anyhow::{ensure, Context};
use tracing_subscriber::EnvFilter;

use starchain::{Address, Ed25519Verifier, Keypair, Ledger, LedgerConfig, Star};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = LedgerConfig::from_env();
    tracing::debug!(?config, "starting ledger");
    let ledger = Ledger::new(Ed25519Verifier, config)
        .await
        .context("failed to initialize ledger")?;

    let wallet = Keypair::generate();
    let address = Address::from_public_key(&wallet.public_key());

    let message = ledger.request_challenge(&address);
    println!("challenge: {}", message);
    let signature = wallet.sign(message.as_bytes()).to_hex();

    let star = Star::new("68° 52' 56.9", "16h 29m 1.0s", "Found star using https://www.google.com/sky/")
        .with_constellation("Draco");

    let record = ledger
        .submit_record(&address, &message, &signature, &star)
        .await
        .context("submission was not admitted")?;
    println!(
        "admitted at position {} with fingerprint {}",
        record.position,
        record.fingerprint.map(|f| f.to_hex()).unwrap_or_default()
    );

    let stars: Vec<Star> = ledger.payloads_by_owner(&address).await?;
    println!("{} owns {} star(s): {}", address, stars.len(), serde_json::to_string_pretty(&stars)?);

    let report = ledger.validate_chain().await;
    ensure!(report.is_valid(), "chain failed validation: {:?}", report.failed_positions());
    println!("chain height {} validates", ledger.height().await);

    Ok(())
}
