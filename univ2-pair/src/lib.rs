//! Uniswap V2 pair contract interface.
//!
//! Declares the pair's event ABI with [`alloy::sol!`] and decodes raw
//! receipt logs against it. Logs emitted by other contracts decode to
//! [`Decoded::Unrecognized`] rather than an error.
//!
//! ```
//! use alloy::primitives::{Address, LogData, U256};
//! use alloy::sol_types::SolEvent;
//! use univ2_pair::{Decoded, IUniswapV2Pair::Swap, decode};
//!
//! let swap = Swap {
//!     sender: Address::ZERO,
//!     amount0In: U256::from(1),
//!     amount1In: U256::ZERO,
//!     amount0Out: U256::ZERO,
//!     amount1Out: U256::from(2),
//!     to: Address::repeat_byte(0xaa),
//! };
//! let Ok(Decoded::Event(event)) = decode(&swap.encode_log_data()) else {
//!     panic!("swap log should decode");
//! };
//! assert_eq!(event.swap_recipient(), Some(Address::repeat_byte(0xaa)));
//! ```

mod error;
mod events;

pub use error::{Error, Result};
pub use events::{Decoded, IUniswapV2Pair, PairEvent, SWAP_EVENT, decode};
