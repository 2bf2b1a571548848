use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Operation not implemented for this operator shape: {0}")]
    NotImplemented(&'static str),

    #[error("Internal invariant failed: {0}")]
    Invariant(String),
}
