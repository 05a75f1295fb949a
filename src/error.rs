//! Error types for the quantumfs branch storage system.

use thiserror::Error;

/// Failures while decoding a persisted branch store.
///
/// Every length field is checked against its bound before the payload is
/// read, so a hostile stream is rejected without allocating for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Oversized {field} count: {count} (limit {limit})")]
    OversizedCount {
        field: &'static str,
        count: u64,
        limit: u64,
    },

    #[error("Oversized {field} length: {length} (limit {limit})")]
    OversizedLength {
        field: &'static str,
        length: u64,
        limit: u64,
    },

    #[error("Truncated stream reading {field}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("Invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("Invalid boolean byte: {value:#04x}")]
    InvalidBool { value: u8 },

    #[error("Invalid qubit {index}: value {value} does not match its measured flag")]
    InvalidQubit { index: usize, value: i32 },
}

/// Storage and model errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid measurement probability: {0}")]
    InvalidProbability(f64),

    #[error("Unknown store: {0}")]
    UnknownStore(String),

    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors surfaced through the facade and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
