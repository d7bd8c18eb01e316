//! Transaction receipt fetching.
//!
//! [`ReceiptSource`] is the seam between the extraction loop and the
//! network; [`RpcReceipts`] implements it with `eth_getTransactionReceipt`.

use std::future::Future;
use std::time::Duration;

use alloy::primitives::{B256, Log};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use anyhow::{Context, Result, anyhow};

/// Anything that can return the logs of a mined transaction.
pub trait ReceiptSource {
    /// Fetch the logs of transaction `hash`, in the order the node returns
    /// them.
    ///
    /// # Errors
    ///
    /// Implementations fail when the receipt cannot be obtained.
    fn receipt_logs(&self, hash: B256) -> impl Future<Output = Result<Vec<Log>>> + Send;
}

/// Receipt source backed by a JSON-RPC provider.
#[derive(Debug, Clone)]
pub struct RpcReceipts<P> {
    provider: P,
    timeout: Option<Duration>,
}

impl<P: Provider> RpcReceipts<P> {
    /// Wrap an existing provider.
    ///
    /// With `timeout` unset a request may block indefinitely.
    pub const fn new(provider: P, timeout: Option<Duration>) -> Self {
        Self { provider, timeout }
    }
}

/// Connect to an HTTP JSON-RPC endpoint.
///
/// # Errors
///
/// Returns an error if `endpoint` is not a valid URL.
pub fn connect(endpoint: &str, timeout: Option<Duration>) -> Result<RpcReceipts<impl Provider + use<>>> {
    let url = endpoint
        .parse()
        .with_context(|| format!("invalid RPC URL: {endpoint}"))?;
    Ok(RpcReceipts::new(ProviderBuilder::new().connect_http(url), timeout))
}

impl<P: Provider> ReceiptSource for RpcReceipts<P> {
    async fn receipt_logs(&self, hash: B256) -> Result<Vec<Log>> {
        let request = self.provider.get_transaction_receipt(hash);
        let receipt = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| anyhow!("request timed out after {limit:?}"))?,
            None => request.await,
        }
        .context("eth_getTransactionReceipt failed")?
        .with_context(|| format!("no receipt for transaction {hash}"))?;

        Ok(logs_of(&receipt))
    }
}

/// Strip RPC metadata from the receipt's logs, keeping node order.
fn logs_of(receipt: &TransactionReceipt) -> Vec<Log> {
    receipt
        .inner
        .logs()
        .iter()
        .map(|log| log.inner.clone())
        .collect()
}
