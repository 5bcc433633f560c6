//! Error types for forwarding invocations.
//!
//! Every variant aborts the current invocation. Nothing is caught or
//! retried inside the forwarder; the scheduling platform owns
//! retry-by-reinvocation.

use thiserror::Error;

/// Error type for a single forwarding invocation.
#[derive(Debug, Error)]
pub enum ForwarderError {
    /// The window query matched no records.
    #[error(
        "no records for asset {asset_id} log '{log_identifier}' in depth window [{top_depth}, {bottom_depth}]"
    )]
    EmptyResult {
        asset_id: i64,
        log_identifier: String,
        top_depth: f64,
        bottom_depth: f64,
    },

    /// A stored cursor value was present but not numeric.
    #[error("stored cursor for scope '{scope}' is not numeric: '{value}'")]
    MalformedCursor { scope: String, value: String },

    /// The output store rejected the write. No local retry.
    #[error("output write rejected with status {status}: {body}")]
    Write { status: u16, body: String },

    /// Transport or auth error from the data API, passed through unmodified.
    #[error("data api request failed")]
    Api(#[from] reqwest::Error),

    /// Cursor store failure, passed through unmodified.
    #[error("cursor store failure")]
    Store(#[from] rusqlite::Error),

    /// Event or record decode failure.
    #[error("decode failure")]
    Decode(#[from] serde_json::Error),

    /// Event source I/O failure.
    #[error("event source i/o failure")]
    Io(#[from] std::io::Error),
}

/// Result type alias for forwarder operations.
pub type Result<T> = std::result::Result<T, ForwarderError>;
