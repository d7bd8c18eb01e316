//! Pair event ABI and the raw log decoder.

use alloy::primitives::{Address, B256, LogData};
use alloy::sol;
use alloy::sol_types::{SolEvent, SolEventInterface};

use crate::error::{Error, Result};

sol! {
    /// Events emitted by a Uniswap V2 pair contract.
    #[sol(all_derives)]
    interface IUniswapV2Pair {
        /// ERC-20 allowance change on the liquidity token.
        event Approval(address indexed owner, address indexed spender, uint256 value);
        /// Liquidity token transfer.
        event Transfer(address indexed from, address indexed to, uint256 value);
        /// Liquidity added.
        event Mint(address indexed sender, uint256 amount0, uint256 amount1);
        /// Liquidity removed; `to` receives the underlying tokens.
        event Burn(address indexed sender, uint256 amount0, uint256 amount1, address indexed to);
        /// Token swap; `to` receives the output amount.
        event Swap(
            address indexed sender,
            uint256 amount0In,
            uint256 amount1In,
            uint256 amount0Out,
            uint256 amount1Out,
            address indexed to
        );
        /// Reserves updated.
        event Sync(uint112 reserve0, uint112 reserve1);
    }
}

/// Any event declared by [`IUniswapV2Pair`].
pub type PairEvent = IUniswapV2Pair::IUniswapV2PairEvents;

/// Name of the event whose recipients are collected.
pub const SWAP_EVENT: &str = "Swap";

/// Signature hash (topic 0) of every pair event, paired with its name.
const SIGNATURES: [(B256, &str); 6] = [
    (IUniswapV2Pair::Approval::SIGNATURE_HASH, "Approval"),
    (IUniswapV2Pair::Transfer::SIGNATURE_HASH, "Transfer"),
    (IUniswapV2Pair::Mint::SIGNATURE_HASH, "Mint"),
    (IUniswapV2Pair::Burn::SIGNATURE_HASH, "Burn"),
    (IUniswapV2Pair::Swap::SIGNATURE_HASH, SWAP_EVENT),
    (IUniswapV2Pair::Sync::SIGNATURE_HASH, "Sync"),
];

/// Outcome of matching a raw log against the pair interface.
#[derive(Debug)]
pub enum Decoded {
    /// The log is a pair event.
    Event(PairEvent),
    /// The log's first topic is not a pair event signature.
    Unrecognized,
}

impl PairEvent {
    /// The event identifier, e.g. `"Swap"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Approval(_) => "Approval",
            Self::Transfer(_) => "Transfer",
            Self::Mint(_) => "Mint",
            Self::Burn(_) => "Burn",
            Self::Swap(_) => SWAP_EVENT,
            Self::Sync(_) => "Sync",
        }
    }

    /// The `to` address of a `Swap`; `None` for every other event.
    #[must_use]
    pub const fn swap_recipient(&self) -> Option<Address> {
        match self {
            Self::Swap(swap) => Some(swap.to),
            _ => None,
        }
    }
}

/// Decode a raw log against the pair interface.
///
/// # Errors
///
/// Returns [`Error::MalformedLog`] when the first topic names a pair event
/// but the remaining topics or the data payload do not fit its ABI.
pub fn decode(log: &LogData) -> Result<Decoded> {
    let Some(topic0) = log.topics().first() else {
        return Ok(Decoded::Unrecognized);
    };
    let Some(&(_, event)) = SIGNATURES.iter().find(|(hash, _)| hash == topic0) else {
        return Ok(Decoded::Unrecognized);
    };

    PairEvent::decode_raw_log(log.topics(), &log.data)
        .map(Decoded::Event)
        .map_err(|source| Error::MalformedLog { event, source })
}
