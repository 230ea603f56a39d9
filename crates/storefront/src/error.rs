//! Error types for the storefront core
//!
//! Most cart paths swallow failures (display must never break); these
//! types exist for the paths that do report them.

use thiserror::Error;

/// Failures from a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Page error: {0}")]
    Dom(#[from] dom::DomError),

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
