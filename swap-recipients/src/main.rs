//! Uniswap V2 swap recipient exporter CLI.
//!
//! Fetches the receipts of a bundled list of transactions from an Ethereum
//! JSON-RPC node and writes every distinct `Swap` recipient to a file, one
//! address per line.
//!
//! # Usage
//!
//! ```bash
//! # Local node, output to ./accounts.txt
//! swap-recipients
//!
//! # Custom node and output path
//! swap-recipients -e https://my-rpc.example.com -o recipients.txt
//!
//! # Give up on any request slower than 30 seconds
//! swap-recipients --timeout 30
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use swap_recipients::sink::AddressSink;
use swap_recipients::{extract, fetcher, known_txs};

/// Export the recipients of Uniswap V2 swaps in known transactions.
#[derive(Debug, Parser)]
#[command(name = "swap-recipients", version, about)]
struct Cli {
    /// Output file.
    #[arg(short, long, default_value = "accounts.txt")]
    output: PathBuf,

    /// Ethereum RPC endpoint.
    #[arg(short, long, default_value = "http://localhost:8545")]
    endpoint: String,

    /// Per-request timeout in seconds. Requests wait indefinitely if unset.
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<()> {
    let hashes = known_txs::bundled()?;

    let mut sink = AddressSink::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    tracing::info!(output = %cli.output.display(), "writing address list");

    let source = fetcher::connect(&cli.endpoint, cli.timeout.map(Duration::from_secs))?;
    let summary = extract::extract(&source, &hashes, &mut sink).await?;

    sink.close()
        .with_context(|| format!("closing {}", cli.output.display()))?;

    tracing::info!(
        transactions = summary.transactions,
        swaps = summary.swaps,
        addresses = summary.written,
        "done"
    );
    Ok(())
}
