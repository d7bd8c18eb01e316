//! The bundled list of transactions to scan.
//!
//! Hashes live in `data/known_txs.txt` and are embedded at compile time.
//! Order in the file is the order in which receipts are fetched.

use alloy::primitives::B256;
use anyhow::{Context, Result};

/// Raw contents of `data/known_txs.txt`.
const BUNDLED: &str = include_str!("../data/known_txs.txt");

/// Parse the bundled transaction list.
///
/// # Errors
///
/// Returns an error if the embedded file contains a malformed hash.
pub fn bundled() -> Result<Vec<B256>> {
    parse(BUNDLED).context("parsing bundled transaction list")
}

/// Parse one transaction hash per line, preserving order.
///
/// Blank lines and lines starting with `#` are ignored.
///
/// # Errors
///
/// Returns an error naming the 1-based line number of the first entry that
/// is not a 32-byte hex string.
pub fn parse(text: &str) -> Result<Vec<B256>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| {
            line.parse::<B256>()
                .with_context(|| format!("line {n}: invalid transaction hash {line:?}"))
        })
        .collect()
}
