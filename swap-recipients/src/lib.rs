//! Uniswap V2 swap recipient exporter library.
//!
//! Fetches receipts for a fixed list of transactions, decodes their logs
//! against the pair interface and streams every distinct `Swap` recipient
//! to a text file.

pub mod extract;
pub mod fetcher;
pub mod known_txs;
pub mod sink;
