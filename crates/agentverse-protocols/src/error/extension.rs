//! Registration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("Capability not found: {0}")]
    NotFound(String),

    #[error("Capability already registered: {0}")]
    AlreadyRegistered(String),
}
