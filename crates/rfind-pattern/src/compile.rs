//! Compiling raw queries into executable patterns.

use std::ops::Range;

use tracing::debug;

use crate::{
    classify::{MatchMode, classify, translate},
    engine::{Matcher, PatternEngine, PatternFlags, RegexEngine},
    error::PatternError,
};

/// A query compiled into an executable matcher.
///
/// Only produced by a successful compilation; a failed compilation yields a
/// [`PatternError`] instead.
#[derive(Debug)]
pub struct CompiledPattern {
    /// The raw query as typed.
    query: String,
    /// How the query was interpreted.
    mode: MatchMode,
    /// The regex source handed to the engine.
    source: String,
    /// Flags used at compile time.
    flags: PatternFlags,
    /// The engine's matcher.
    matcher: Box<dyn Matcher>,
}

impl CompiledPattern {
    /// Returns the raw query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the match mode chosen for the query.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Returns the pattern source that was compiled.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the compile flags.
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Returns the byte ranges of all non-overlapping matches in `text`.
    pub fn find_all(&self, text: &str) -> Result<Vec<Range<usize>>, PatternError> {
        self.matcher
            .find_all(text)
            .map_err(|source| PatternError::Execution {
                query: self.query.clone(),
                source,
            })
    }
}

/// Compiles a raw query with the default [`RegexEngine`].
///
/// Returns `Ok(None)` when the query is empty or whitespace only.
pub fn compile(query: &str) -> Result<Option<CompiledPattern>, PatternError> {
    compile_with(query, &RegexEngine::default())
}

/// Compiles a raw query with the given engine.
///
/// Returns `Ok(None)` when the query is empty or whitespace only. Trimming only decides
/// emptiness; the untrimmed query is what gets translated.
pub fn compile_with<E>(query: &str, engine: &E) -> Result<Option<CompiledPattern>, PatternError>
where
    E: PatternEngine + ?Sized,
{
    if query.trim().is_empty() {
        return Ok(None);
    }

    let mode = classify(query);
    let source = translate(query, mode);
    let flags = PatternFlags::default();
    debug!(query, %mode, pattern = %source, "classified query");

    let matcher = engine
        .compile(&source, flags)
        .map_err(|err| PatternError::Compile {
            query: query.to_string(),
            source: err,
        })?;

    Ok(Some(CompiledPattern {
        query: query.to_string(),
        mode,
        source,
        flags,
        matcher,
    }))
}
