//! The result of a find operation, as shown to the user.

use std::fmt;

use rfind_pattern::PatternError;

/// Why a search produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    /// The query could not be compiled.
    InvalidPattern {
        /// The raw query.
        query: String,
        /// Engine message.
        message: String,
        /// Hint for a common mistake, if one applies.
        suggestion: Option<&'static str>,
    },
    /// The matcher failed part way through the document.
    MatchFailed {
        /// The raw query.
        query: String,
        /// Engine message.
        message: String,
    },
    /// The tree rejected a highlight mutation.
    Highlight {
        /// Tree error message.
        message: String,
    },
}

impl SearchFailure {
    /// Builds a failure from a pattern error.
    pub fn from_pattern(err: &PatternError) -> Self {
        match err {
            PatternError::Compile { .. } => Self::InvalidPattern {
                query: err.query().to_string(),
                message: err.message().to_string(),
                suggestion: err.suggestion(),
            },
            PatternError::Execution { .. } => Self::MatchFailed {
                query: err.query().to_string(),
                message: err.message().to_string(),
            },
        }
    }

    /// Returns the detailed message.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidPattern { message, .. }
            | Self::MatchFailed { message, .. }
            | Self::Highlight { message } => message,
        }
    }
}

/// Match count and cursor, or the reason there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    /// The search ran. `current` is `None` exactly when `count` is zero.
    Matches {
        /// Number of markers.
        count: usize,
        /// Zero-based index of the current marker.
        current: Option<usize>,
    },
    /// The search failed and nothing is highlighted.
    Failed(SearchFailure),
}

impl Default for SearchStatus {
    fn default() -> Self {
        Self::none()
    }
}

impl SearchStatus {
    /// A status with no matches.
    pub fn none() -> Self {
        Self::Matches {
            count: 0,
            current: None,
        }
    }

    /// Returns the number of matches (zero on failure).
    pub fn count(&self) -> usize {
        match self {
            Self::Matches { count, .. } => *count,
            Self::Failed(_) => 0,
        }
    }

    /// Returns the zero-based current index.
    pub fn current(&self) -> Option<usize> {
        match self {
            Self::Matches { current, .. } => *current,
            Self::Failed(_) => None,
        }
    }

    /// Returns the failure, if the search failed.
    pub fn failure(&self) -> Option<&SearchFailure> {
        match self {
            Self::Matches { .. } => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    /// Returns true if the search failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matches {
                count,
                current: Some(index),
            } if *count > 0 => write!(f, "{} of {count} matches", index + 1),
            Self::Matches { count, .. } => write!(f, "{count} matches"),
            Self::Failed(SearchFailure::InvalidPattern { .. } | SearchFailure::MatchFailed { .. }) => {
                f.write_str("invalid pattern")
            }
            Self::Failed(SearchFailure::Highlight { .. }) => f.write_str("search failed"),
        }
    }
}
