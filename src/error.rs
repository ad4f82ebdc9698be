//! Errors that abort work outright, as opposed to parse diagnostics
//!
//! Grammar construction and lexing either succeed or fail as a whole. Problems
//! found while parsing never show up here; they end up in
//! [`crate::diagnostics::Diagnostics`].

use thiserror::Error;

/// A grammar could not be assembled from its rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A rule was declared but never given a definition
    #[error("rule `{name}` was declared but never defined")]
    Unbound { name: String },

    /// A rule was given a second definition
    #[error("rule `{name}` is already defined")]
    AlreadyBound { name: String },

    /// A rule handle from a different rule set was passed to `define`
    #[error("rule `{name}` does not belong to this rule set")]
    ForeignRule { name: String },
}

/// The source text could not be split into tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lexing failed: {message}")]
pub struct LexError {
    pub message: String,
}

impl LexError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
