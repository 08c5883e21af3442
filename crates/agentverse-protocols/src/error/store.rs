//! Storage errors.

use thiserror::Error;

/// Infrastructure failure of a definition or configuration store.
///
/// "Not found" is never an error at this layer; lookups return `Option`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
