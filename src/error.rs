//! Error types for the typewriter syntax engine
//!
//! Uses thiserror for structured error definitions and anyhow for
//! propagation at the binary boundary.

use thiserror::Error;

/// Main error type for syntax engine operations
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// The execution context did not answer within the deadline
    #[error("Classification request {id} timed out after {timeout_ms}ms")]
    Timeout { id: u64, timeout_ms: u64 },

    /// The dispatcher has been closed
    #[error("Dispatcher is closed")]
    Closed,

    /// The bounded worker queue is full
    #[error("Worker queue is full ({0} requests queued)")]
    Overloaded(usize),

    /// Tag extraction failed
    #[error("Tagger error: {0}")]
    Tagger(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl SyntaxError {
    /// Whether this error is a deadline expiry
    pub fn is_timeout(&self) -> bool {
        matches!(self, SyntaxError::Timeout { .. })
    }
}

/// Result type alias for syntax engine operations
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Convert anyhow::Error to SyntaxError
impl From<anyhow::Error> for SyntaxError {
    fn from(err: anyhow::Error) -> Self {
        SyntaxError::Other(err.to_string())
    }
}
