use thiserror::Error;

/// Errors emitted by the identifier generators.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid region: {0}")]
    InvalidRegion(String),
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("region table error: {0}")]
    Table(#[from] nopol_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
