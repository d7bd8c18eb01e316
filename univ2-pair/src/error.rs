//! Error types for pair log decoding.

/// Errors produced while decoding pair contract logs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The log carries a known event signature but its topics or data do
    /// not match the event's ABI.
    #[error("malformed {event} log: {source}")]
    MalformedLog {
        /// Name of the event the first topic identified.
        event: &'static str,
        /// Underlying ABI decoding error.
        #[source]
        source: alloy::sol_types::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
