use thiserror::Error;

/// Core error type shared across nopol crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested region name has no entry in the region table.
    #[error("region not found: {0}")]
    NotFound(String),
    /// The region table violates internal invariants.
    #[error("invalid region table: {0}")]
    InvalidTable(String),
    /// A region table file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A region table file is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results returned by nopol crates.
pub type Result<T> = std::result::Result<T, Error>;
