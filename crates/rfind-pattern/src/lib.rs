//! Query classification and pattern compilation for rfind.
//!
//! A raw query is interpreted in one of three modes:
//!
//! - **Literal**: `TODO` - matches the text itself
//! - **Wildcard**: `test*`, `f?x` - glob-like, never spanning a line break
//! - **Regex**: `\d{3}`, `(TODO|FIXME):` - any query containing `\ ^ $ { } ( ) | [ ]`
//!
//! All modes match case-insensitively and find every non-overlapping occurrence.
//!
//! # Example
//!
//! ```
//! use rfind_pattern::{MatchMode, compile};
//!
//! let pattern = compile("test*").unwrap().unwrap();
//! assert_eq!(pattern.mode(), MatchMode::Wildcard);
//! assert_eq!(pattern.find_all("Testing\nmore").unwrap(), vec![0..7]);
//! ```

#![warn(missing_docs)]

mod classify;
mod compile;
mod engine;
mod error;

pub use classify::{
    MatchMode, classify, escape_literal, has_regex_syntax, has_wildcards, translate,
    wildcard_to_regex,
};
pub use compile::{CompiledPattern, compile, compile_with};
pub use engine::{
    DEFAULT_DFA_SIZE_LIMIT, DEFAULT_SIZE_LIMIT, Matcher, PatternEngine, PatternFlags, RegexEngine,
};
pub use error::{EngineError, PatternError};
