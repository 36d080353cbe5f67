//! Parse error types.

use thiserror::Error;

/// Errors returned by [`Parser::parse`](crate::Parser::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The underlying parser rejected the source text.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// The underlying parser produced a tree we cannot represent.
    #[error("Internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
