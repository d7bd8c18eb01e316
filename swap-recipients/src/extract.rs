//! The extraction loop.
//!
//! For each transaction, strictly in list order:
//! 1. Fetch its receipt logs (any failure aborts the run).
//! 2. Decode each log against the pair interface.
//! 3. Take the `to` address of every `Swap` event.
//! 4. Record it in the sink, which writes it if it is new.

use std::io::Write;

use alloy::primitives::B256;
use anyhow::{Context, Result};
use univ2_pair::Decoded;

use crate::fetcher::ReceiptSource;
use crate::sink::AddressSink;

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Transactions whose receipts were processed.
    pub transactions: usize,
    /// `Swap` logs found across all receipts.
    pub swaps: usize,
    /// Addresses written to the sink (never more than `swaps`).
    pub written: usize,
}

/// Scan `hashes` in order and stream new swap recipients into `sink`.
///
/// Fetches are sequential: each receipt is awaited before the next is
/// requested. Logs that are not pair events are skipped; pair logs that
/// fail to decode are skipped with a warning.
///
/// # Errors
///
/// Returns the first fetch or write error. No later hash is requested once
/// an error occurs; lines already written stay in the sink.
pub async fn extract<S, W>(
    source: &S,
    hashes: &[B256],
    sink: &mut AddressSink<W>,
) -> Result<Summary>
where
    S: ReceiptSource,
    W: Write,
{
    let mut summary = Summary::default();

    for &tx in hashes {
        tracing::info!(%tx, "processing transaction");
        let logs = source
            .receipt_logs(tx)
            .await
            .with_context(|| format!("fetching receipt for {tx}"))?;

        for log in &logs {
            let event = match univ2_pair::decode(&log.data) {
                Ok(Decoded::Event(event)) => event,
                Ok(Decoded::Unrecognized) => {
                    tracing::trace!(%tx, emitter = %log.address, "skipping unrecognized log");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(%tx, emitter = %log.address, error = %e, "skipping malformed log");
                    continue;
                }
            };
            let Some(to) = event.swap_recipient() else {
                continue;
            };

            summary.swaps += 1;
            tracing::debug!(%tx, pair = %log.address, ?event, "swap decoded");
            tracing::info!(address = %to, %tx, "address found");

            if sink
                .record(to)
                .with_context(|| format!("writing address {to}"))?
            {
                summary.written += 1;
            }
        }

        summary.transactions += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use alloy::primitives::{Address, Bytes, Log, LogData, U256};
    use alloy::sol_types::SolEvent;
    use anyhow::bail;
    use univ2_pair::IUniswapV2Pair;

    use super::*;

    /// In-memory receipts keyed by hash; records every request made.
    #[derive(Default)]
    struct FakeNode {
        receipts: HashMap<B256, Vec<Log>>,
        requests: Mutex<Vec<B256>>,
    }

    impl FakeNode {
        fn with(mut self, hash: B256, logs: Vec<Log>) -> Self {
            self.receipts.insert(hash, logs);
            self
        }

        fn requests(&self) -> Vec<B256> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ReceiptSource for FakeNode {
        async fn receipt_logs(&self, hash: B256) -> Result<Vec<Log>> {
            self.requests.lock().unwrap().push(hash);
            match self.receipts.get(&hash) {
                Some(logs) => Ok(logs.clone()),
                None => bail!("connection refused"),
            }
        }
    }

    fn pair() -> Address {
        Address::repeat_byte(0xc8)
    }

    fn hash(n: u8) -> B256 {
        B256::repeat_byte(n)
    }

    fn swap_to(to: Address) -> Log {
        let swap = IUniswapV2Pair::Swap {
            sender: Address::repeat_byte(0x7a),
            amount0In: U256::from(1_000),
            amount1In: U256::ZERO,
            amount0Out: U256::ZERO,
            amount1Out: U256::from(997),
            to,
        };
        Log {
            address: pair(),
            data: swap.encode_log_data(),
        }
    }

    fn transfer_to(to: Address) -> Log {
        let transfer = IUniswapV2Pair::Transfer {
            from: Address::ZERO,
            to,
            value: U256::from(1),
        };
        Log {
            address: pair(),
            data: transfer.encode_log_data(),
        }
    }

    fn burn_to(to: Address) -> Log {
        let burn = IUniswapV2Pair::Burn {
            sender: Address::repeat_byte(0x7a),
            amount0: U256::from(3),
            amount1: U256::from(4),
            to,
        };
        Log {
            address: pair(),
            data: burn.encode_log_data(),
        }
    }

    fn foreign_log() -> Log {
        Log {
            address: Address::repeat_byte(0xee),
            data: LogData::new_unchecked(vec![B256::repeat_byte(0x99)], Bytes::new()),
        }
    }

    async fn run(node: &FakeNode, hashes: &[B256]) -> (Result<Summary>, Vec<Address>) {
        let mut sink = AddressSink::new(Vec::new());
        let result = extract(node, hashes, &mut sink).await;
        let text = String::from_utf8(sink.close().unwrap()).unwrap();
        let lines = text.lines().map(|l| l.parse().unwrap()).collect();
        (result, lines)
    }

    #[tokio::test]
    async fn distinct_recipients_in_one_receipt() {
        let (a, b) = (Address::repeat_byte(0xaa), Address::repeat_byte(0xbb));
        let node = FakeNode::default().with(hash(1), vec![swap_to(a), swap_to(b)]);

        let (result, lines) = run(&node, &[hash(1)]).await;

        let summary = result.unwrap();
        assert_eq!(lines, [a, b], "both recipients in log order");
        assert_eq!(summary.swaps, 2, "swap count");
        assert_eq!(summary.written, 2, "written count");
    }

    #[tokio::test]
    async fn same_recipient_across_receipts_written_once() {
        let c = Address::repeat_byte(0xcc);
        let node = FakeNode::default()
            .with(hash(1), vec![swap_to(c)])
            .with(hash(2), vec![swap_to(c)]);

        let (result, lines) = run(&node, &[hash(1), hash(2)]).await;

        let summary = result.unwrap();
        assert_eq!(lines, [c], "deduplicated output");
        assert_eq!(
            summary,
            Summary {
                transactions: 2,
                swaps: 2,
                written: 1
            },
            "counters"
        );
    }

    #[tokio::test]
    async fn first_seen_order_across_receipts() {
        let (a, b, c) = (
            Address::repeat_byte(0x0a),
            Address::repeat_byte(0x0b),
            Address::repeat_byte(0x0c),
        );
        let node = FakeNode::default()
            .with(hash(1), vec![swap_to(b), swap_to(a)])
            .with(hash(2), vec![swap_to(a), swap_to(c), swap_to(b)]);

        let (result, lines) = run(&node, &[hash(1), hash(2)]).await;

        assert!(result.is_ok(), "run succeeds");
        assert_eq!(lines, [b, a, c], "first-seen order");
    }

    #[tokio::test]
    async fn only_swap_recipients_are_collected() {
        let swapped = Address::repeat_byte(0x51);
        let node = FakeNode::default().with(
            hash(1),
            vec![
                foreign_log(),
                transfer_to(Address::repeat_byte(0x70)),
                burn_to(Address::repeat_byte(0x71)),
                swap_to(swapped),
            ],
        );

        let (result, lines) = run(&node, &[hash(1)]).await;

        assert_eq!(result.unwrap().swaps, 1, "swap count");
        assert_eq!(lines, [swapped], "transfer, burn and foreign logs ignored");
    }

    #[tokio::test]
    async fn empty_receipt_produces_no_lines() {
        let node = FakeNode::default().with(hash(1), Vec::new());

        let (result, lines) = run(&node, &[hash(1)]).await;

        assert_eq!(
            result.unwrap(),
            Summary {
                transactions: 1,
                swaps: 0,
                written: 0
            },
            "counters"
        );
        assert!(lines.is_empty(), "no output");
    }

    #[tokio::test]
    async fn malformed_swap_is_skipped() {
        let good = Address::repeat_byte(0x60);
        let truncated = Log {
            address: pair(),
            data: LogData::new_unchecked(vec![IUniswapV2Pair::Swap::SIGNATURE_HASH], Bytes::new()),
        };
        let node = FakeNode::default().with(hash(1), vec![truncated, swap_to(good)]);

        let (result, lines) = run(&node, &[hash(1)]).await;

        assert_eq!(result.unwrap().swaps, 1, "only the well-formed swap counts");
        assert_eq!(lines, [good], "output");
    }

    #[tokio::test]
    async fn fetch_failure_stops_the_run() {
        let (a, b) = (Address::repeat_byte(0xaa), Address::repeat_byte(0xbb));
        let node = FakeNode::default()
            .with(hash(1), vec![swap_to(a)])
            .with(hash(3), vec![swap_to(b)]);

        let (result, lines) = run(&node, &[hash(1), hash(2), hash(3)]).await;

        let err = result.unwrap_err();
        assert!(
            err.to_string().starts_with("fetching receipt for"),
            "unexpected error: {err:#}"
        );
        assert_eq!(node.requests(), [hash(1), hash(2)], "no request after the failure");
        assert_eq!(lines, [a], "lines before the failure are kept");
    }
}
