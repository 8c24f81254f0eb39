//! Error types for pattern compilation and matching.
//!
//! Engines report failures as [`EngineError`]; the compiler and compiled patterns wrap them
//! in [`PatternError`] together with the query that caused them.

use thiserror::Error;

/// A failure reported by a pattern engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    /// Error message produced by the engine.
    pub message: String,
}

impl EngineError {
    /// Creates a new engine error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors produced while compiling or running a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The query could not be compiled into a matcher.
    #[error("invalid pattern '{query}': {source}")]
    Compile {
        /// The raw query as typed.
        query: String,
        /// Underlying engine error.
        source: EngineError,
    },

    /// The compiled matcher failed while scanning text.
    #[error("pattern '{query}' failed during matching: {source}")]
    Execution {
        /// The raw query as typed.
        query: String,
        /// Underlying engine error.
        source: EngineError,
    },
}

impl PatternError {
    /// Returns the raw query that produced this error.
    pub fn query(&self) -> &str {
        match self {
            Self::Compile { query, .. } | Self::Execution { query, .. } => query,
        }
    }

    /// Returns the engine message without query context.
    pub fn message(&self) -> &str {
        match self {
            Self::Compile { source, .. } | Self::Execution { source, .. } => &source.message,
        }
    }

    /// Returns a hint for common mistakes, if one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        let Self::Compile { query, .. } = self else {
            return None;
        };

        if query.contains(['*', '?']) && query.contains(['[', ']', '(', ')', '{', '}']) {
            Some("wildcards cannot be mixed with regex syntax; use '.*' for any text")
        } else if query.contains('[') || query.contains(']') {
            Some("close the character class, or escape brackets as '\\[' and '\\]'")
        } else if query.contains('(') || query.contains(')') {
            Some("balance the parentheses, or escape them as '\\(' and '\\)'")
        } else if query.ends_with('\\') {
            Some("a trailing backslash must be doubled to match itself")
        } else {
            None
        }
    }
}
