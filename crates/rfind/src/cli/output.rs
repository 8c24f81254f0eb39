//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use rfind_engine::{FindSession, SearchFailure, SearchStatus};
pub use rfind_highlight::{dim, error, header, subheader};
use rfind_highlight::{Highlighter, MarkStyle, render_text};
use rfind_tree::{ContentTree, Document, NodeId};
use serde::Serialize;

/// Longest context snippet shown for a match, in characters.
const CONTEXT_WIDTH: usize = 72;

/// JSON description of one match.
#[derive(Serialize)]
pub struct JsonMatch {
    /// One-based position in document order.
    pub index: usize,
    /// The matched text.
    pub text: String,
    /// Whether this is the current match.
    pub current: bool,
    /// Text of the enclosing element, whitespace collapsed.
    pub context: String,
}

/// JSON output for `rfind search`.
#[derive(Serialize)]
pub struct JsonSearchOutput {
    /// The raw query.
    pub query: String,
    /// How the query was interpreted, if it compiled.
    pub mode: Option<&'static str>,
    /// The pattern handed to the engine.
    pub pattern: Option<String>,
    /// Number of matches.
    pub count: usize,
    /// One-based index of the current match.
    pub current: Option<usize>,
    /// Status line text.
    pub status: String,
    /// Failure detail, if the search failed.
    pub error: Option<String>,
    /// Matches in document order.
    pub matches: Vec<JsonMatch>,
}

impl JsonSearchOutput {
    /// Captures the state of `session` after a search over `doc`.
    pub fn from_session(doc: &Document, session: &FindSession<NodeId>) -> Self {
        let status = session.status();
        let current = session.current_marker();
        let matches = session
            .markers()
            .iter()
            .enumerate()
            .map(|(i, &marker)| JsonMatch {
                index: i + 1,
                text: doc.text_content(marker),
                current: Some(marker) == current,
                context: match_context(doc, marker),
            })
            .collect();
        Self {
            query: session.query().to_string(),
            mode: session.mode().map(|m| m.as_str()),
            pattern: session.pattern().map(str::to_string),
            count: status.count(),
            current: status.current().map(|i| i + 1),
            status: status.to_string(),
            error: status.failure().map(|f| f.message().to_string()),
            matches,
        }
    }
}

/// Returns true if output should be colored.
pub fn use_color(no_color: bool) -> bool {
    !no_color && io::stdout().is_terminal()
}

/// Builds the marker style for a session.
pub fn mark_style(session: &FindSession<NodeId>, color: bool) -> MarkStyle {
    let options = session.options();
    MarkStyle::new(&options.highlight_tag, &options.current_tag, color)
}

/// Returns the whitespace-collapsed text of `marker`'s parent, shortened around the match.
pub fn match_context(doc: &Document, marker: NodeId) -> String {
    let Some(parent) = doc.parent(marker) else {
        return doc.text_content(marker);
    };
    let text = collapse_whitespace(&doc.text_content(parent));
    let total = text.chars().count();
    if total <= CONTEXT_WIDTH {
        return text;
    }

    // Offset of this marker, not of the first equal match in the parent
    let before: String = doc
        .children(parent)
        .into_iter()
        .take_while(|&child| child != marker)
        .map(|child| doc.text_content(child))
        .collect();
    let mut prefix = collapse_whitespace(&before);
    if !prefix.is_empty() && before.ends_with(char::is_whitespace) {
        prefix.push(' ');
    }
    let skip = prefix.chars().count().saturating_sub(CONTEXT_WIDTH / 3);

    let snippet: String = text.chars().skip(skip).take(CONTEXT_WIDTH).collect();
    let mut out = String::new();
    if skip > 0 {
        out.push('…');
    }
    out.push_str(&snippet);
    if skip + CONTEXT_WIDTH < total {
        out.push('…');
    }
    out
}

/// Joins the words of `text` with single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Formats the status line, styled when `color` is set.
pub fn status_line(status: &SearchStatus, color: bool) -> String {
    let text = status.to_string();
    match (color, status) {
        (false, _) => text,
        (true, SearchStatus::Failed(_)) => error(&text),
        (true, SearchStatus::Matches { count: 0, .. }) => dim(&text),
        (true, SearchStatus::Matches { .. }) => header(&text),
    }
}

/// Prints the failure detail to stderr.
pub fn report_failure(failure: &SearchFailure) {
    match failure {
        SearchFailure::InvalidPattern {
            query,
            message,
            suggestion,
        } => {
            eprintln!("error: invalid pattern '{query}': {message}");
            if let Some(hint) = suggestion {
                eprintln!("hint: {hint}");
            }
        }
        SearchFailure::MatchFailed { query, message } => {
            eprintln!("error: matching '{query}' failed: {message}");
        }
        SearchFailure::Highlight { message } => {
            eprintln!("error: could not highlight matches: {message}");
        }
    }
}

/// Prints JSON output, returning failure if serialization fails.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the searchable text of `doc` with markers decorated.
pub fn print_document(doc: &Document, style: &MarkStyle) {
    let text = render_text(doc, style);
    if !text.is_empty() {
        println!("{text}");
    }
}

/// Prints `doc` as markup, syntax highlighted when `color` is set.
pub fn print_markup(doc: &Document, color: bool) {
    let markup = doc.to_markup();
    if color {
        println!("{}", Highlighter::new().highlight_markup(&markup));
    } else {
        println!("{markup}");
    }
}

/// Prints a table of matches with their context.
pub fn print_match_table(doc: &Document, session: &FindSession<NodeId>) {
    let current = session.current_marker();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Match", "Context"]);
    for (i, &marker) in session.markers().iter().enumerate() {
        let index = if Some(marker) == current {
            format!("> {}", i + 1)
        } else {
            (i + 1).to_string()
        };
        table.add_row(vec![
            Cell::new(index),
            Cell::new(doc.text_content(marker)),
            Cell::new(match_context(doc, marker)),
        ]);
    }
    println!("{table}");
}
