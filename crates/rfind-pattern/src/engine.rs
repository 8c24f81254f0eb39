//! Pattern engine capability.
//!
//! The compiler never talks to a regex library directly. It asks a [`PatternEngine`] for a
//! [`Matcher`], so alternate engines can be substituted without touching the rest of the
//! pipeline. [`RegexEngine`] is the default and is backed by the `regex` crate, which runs
//! in linear time and cannot backtrack catastrophically.

use std::{fmt, ops::Range};

use regex::{Regex, RegexBuilder};

use crate::error::EngineError;

/// Default limit on the size of a compiled program, in bytes.
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Default limit on the lazy DFA cache, in bytes.
pub const DEFAULT_DFA_SIZE_LIMIT: usize = 2 * (1 << 20);

/// Options applied when compiling a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternFlags {
    /// Match without regard to letter case.
    pub case_insensitive: bool,
    /// Find every non-overlapping match rather than only the first.
    pub find_all: bool,
}

impl Default for PatternFlags {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            find_all: true,
        }
    }
}

/// An executable, compiled pattern.
pub trait Matcher: fmt::Debug {
    /// Returns the byte ranges of matches in `text`.
    ///
    /// Ranges are leftmost and non-overlapping, in ascending order. After a match, scanning
    /// resumes at the first character following it.
    fn find_all(&self, text: &str) -> Result<Vec<Range<usize>>, EngineError>;
}

/// Compiles pattern source into matchers.
pub trait PatternEngine {
    /// Compiles `source` with the given flags.
    fn compile(&self, source: &str, flags: PatternFlags) -> Result<Box<dyn Matcher>, EngineError>;
}

/// The default engine, backed by the `regex` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegexEngine {
    /// Maximum compiled program size in bytes.
    size_limit: usize,
    /// Maximum lazy DFA cache size in bytes.
    dfa_size_limit: usize,
}

impl Default for RegexEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexEngine {
    /// Creates an engine with the default size limits.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_SIZE_LIMIT, DEFAULT_DFA_SIZE_LIMIT)
    }

    /// Creates an engine with explicit size limits.
    pub fn with_limits(size_limit: usize, dfa_size_limit: usize) -> Self {
        Self {
            size_limit,
            dfa_size_limit,
        }
    }

    /// Returns the compiled program size limit.
    pub fn size_limit(&self) -> usize {
        self.size_limit
    }

    /// Returns the lazy DFA cache size limit.
    pub fn dfa_size_limit(&self) -> usize {
        self.dfa_size_limit
    }
}

impl PatternEngine for RegexEngine {
    fn compile(&self, source: &str, flags: PatternFlags) -> Result<Box<dyn Matcher>, EngineError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.case_insensitive)
            .size_limit(self.size_limit)
            .dfa_size_limit(self.dfa_size_limit)
            .build()
            .map_err(|e| EngineError::new(e.to_string()))?;

        Ok(Box::new(RegexMatcher {
            regex,
            find_all: flags.find_all,
        }))
    }
}

/// Matcher produced by [`RegexEngine`].
#[derive(Debug)]
struct RegexMatcher {
    /// The compiled regex.
    regex: Regex,
    /// Whether to return every match or only the first.
    find_all: bool,
}

impl Matcher for RegexMatcher {
    fn find_all(&self, text: &str) -> Result<Vec<Range<usize>>, EngineError> {
        if self.find_all {
            Ok(self.regex.find_iter(text).map(|m| m.range()).collect())
        } else {
            Ok(self.regex.find(text).map(|m| m.range()).into_iter().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compiles `source` with default flags on the default engine.
    fn matcher(source: &str) -> Box<dyn Matcher> {
        RegexEngine::new()
            .compile(source, PatternFlags::default())
            .unwrap()
    }

    #[test]
    fn finds_non_overlapping_matches() {
        let ranges = matcher("aa").find_all("aaaa").unwrap();
        assert_eq!(ranges, vec![0..2, 2..4]);
    }

    #[test]
    fn ignores_case_by_default() {
        let ranges = matcher("test").find_all("Test TEST test").unwrap();
        assert_eq!(ranges.len(), 3);
    }

    #[test]
    fn respects_case_sensitive_flags() {
        let flags = PatternFlags {
            case_insensitive: false,
            find_all: true,
        };
        let m = RegexEngine::new().compile("test", flags).unwrap();
        assert_eq!(m.find_all("Test TEST test").unwrap(), vec![10..14]);
    }

    #[test]
    fn first_match_only() {
        let flags = PatternFlags {
            case_insensitive: true,
            find_all: false,
        };
        let m = RegexEngine::new().compile("a", flags).unwrap();
        assert_eq!(m.find_all("a a a").unwrap(), vec![0..1]);
    }

    #[test]
    fn rejects_invalid_syntax() {
        let err = RegexEngine::new()
            .compile("[invalid", PatternFlags::default())
            .unwrap_err();
        assert!(!err.message.is_empty());
    }

    #[test]
    fn rejects_programs_over_the_size_limit() {
        let engine = RegexEngine::with_limits(64, DEFAULT_DFA_SIZE_LIMIT);
        let result = engine.compile(r"\w{500}", PatternFlags::default());
        assert!(result.is_err());
    }

    #[test]
    fn nested_quantifiers_finish_quickly() {
        let text = "a".repeat(5_000) + "X";
        let ranges = matcher("(a+)+b").find_all(&text).unwrap();
        assert!(ranges.is_empty());
    }
}
