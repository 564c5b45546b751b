use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_chaincode::host::Host;
use order_chaincode::{ChaincodeConfig, MemLedger, Metrics, OrderChaincode};

fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug order_chaincode < requests.jsonl
    // Logs go to stderr; stdout carries responses only.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_chaincode=debug"))
        )
        .init();

    let config = ChaincodeConfig::from_env().context("Invalid chaincode configuration")?;
    let metrics = Arc::new(Metrics::new()?);
    let chaincode = OrderChaincode::new(config).with_metrics(metrics.clone());

    let config = chaincode.config();
    tracing::info!(
        api_version = %config.api_version,
        compatibility = %config.compatibility,
        bootstrap_key = %config.bootstrap_key,
        "Starting order chaincode"
    );

    // The in-memory ledger lives only as long as this process.
    let mut host = Host::new(chaincode, MemLedger::new());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let stats = host.run(stdin.lock(), stdout.lock())?;

    tracing::info!(
        succeeded = stats.succeeded,
        failed = stats.failed,
        rejected = stats.rejected,
        keys = host.ledger().len(),
        "Shutting down"
    );
    tracing::debug!("Metrics:\n{}", metrics.render()?);

    Ok(())
}
