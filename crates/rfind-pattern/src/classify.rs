//! Query classification and translation.
//!
//! Every non-empty query is routed to one of three match modes:
//!
//! - **Regex**: the query contains any of `\ ^ $ { } ( ) | [ ]` and is used verbatim.
//! - **Wildcard**: the query contains `*` or `?` but no regex syntax. `*` matches any run of
//!   characters on the same line and `?` matches a single non-newline character.
//! - **Literal**: everything else. The query matches only itself.

use std::fmt;

/// Characters whose presence routes a query to regex mode.
const REGEX_SYNTAX: [char; 10] = ['\\', '^', '$', '{', '}', '(', ')', '|', '[', ']'];

/// Characters treated as wildcards when no regex syntax is present.
const WILDCARDS: [char; 2] = ['*', '?'];

/// Regex source for a `*` wildcard.
const ANY_RUN_ON_LINE: &str = r"[^\n]*";

/// Regex source for a `?` wildcard.
const ANY_CHAR_ON_LINE: &str = r"[^\n]";

/// How a raw query is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Matches the query text exactly (ignoring case).
    Literal,
    /// Glob-like `*` and `?`, confined to a single line.
    Wildcard,
    /// A full regular expression.
    Regex,
}

impl MatchMode {
    /// Returns the lowercase name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Wildcard => "wildcard",
            Self::Regex => "regex",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if the query contains `*` or `?`.
pub fn has_wildcards(query: &str) -> bool {
    query.contains(WILDCARDS)
}

/// Returns true if the query contains any character that implies regex syntax.
pub fn has_regex_syntax(query: &str) -> bool {
    query.contains(REGEX_SYNTAX)
}

/// Classifies a raw query into its match mode.
pub fn classify(query: &str) -> MatchMode {
    if has_regex_syntax(query) {
        MatchMode::Regex
    } else if has_wildcards(query) {
        MatchMode::Wildcard
    } else {
        MatchMode::Literal
    }
}

/// Escapes every regex metacharacter so the text matches only itself.
pub fn escape_literal(text: &str) -> String {
    regex::escape(text)
}

/// Converts a wildcard query into regex source.
///
/// Text between wildcards is escaped. Wildcards never match a newline, so a converted
/// pattern cannot span lines.
pub fn wildcard_to_regex(query: &str) -> String {
    let mut out = String::with_capacity(query.len() * 2);
    let mut literal_start = 0;

    for (idx, ch) in query.char_indices() {
        let replacement = match ch {
            '*' => ANY_RUN_ON_LINE,
            '?' => ANY_CHAR_ON_LINE,
            _ => continue,
        };
        out.push_str(&regex::escape(&query[literal_start..idx]));
        out.push_str(replacement);
        literal_start = idx + ch.len_utf8();
    }
    out.push_str(&regex::escape(&query[literal_start..]));

    out
}

/// Translates a query into regex source for the given mode.
pub fn translate(query: &str, mode: MatchMode) -> String {
    match mode {
        MatchMode::Literal => escape_literal(query),
        MatchMode::Wildcard => wildcard_to_regex(query),
        MatchMode::Regex => query.to_string(),
    }
}
