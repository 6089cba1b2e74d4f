//! Error model shared across the product context crates.

use thiserror::Error;

/// Domain-level error.
///
/// Lookups on product records never fail with this type; absence is modelled
/// with `Option`. These variants cover malformed boundary input only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// An identifier was invalid (e.g. empty string).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl ContextError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
