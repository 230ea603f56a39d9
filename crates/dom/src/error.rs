//! Error types for page model operations
//!
//! Simple, flat error hierarchy. No over-engineering.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("No element with id: {0}")]
    ElementNotFound(String),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Node {0} is not focusable")]
    NotFocusable(u32),

    #[error("Invalid page description: {0}")]
    InvalidPage(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
