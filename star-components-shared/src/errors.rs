//! Error types for edge parsing.
//!
//! An edge record that cannot be turned into exactly two vertex identifiers
//! invalidates the whole run, since a silently dropped edge changes the answer.

use thiserror::Error;

/// Errors raised when an input record cannot be parsed into an edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInputError {
    /// The record does not contain exactly two tokens.
    #[error("Expected 2 vertex identifiers, found {found} in {record:?}")]
    TokenCount { record: String, found: usize },

    /// A token is not a 64-bit signed integer.
    #[error("Invalid vertex identifier {token:?} in {record:?}: {reason}")]
    InvalidVertex {
        record: String,
        token: String,
        reason: String,
    },
}

impl MalformedInputError {
    /// Create a token count error.
    pub fn token_count(record: impl Into<String>, found: usize) -> Self {
        Self::TokenCount {
            record: record.into(),
            found,
        }
    }

    /// Create an invalid vertex error.
    pub fn invalid_vertex(
        record: impl Into<String>,
        token: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidVertex {
            record: record.into(),
            token: token.into(),
            reason: reason.into(),
        }
    }
}
