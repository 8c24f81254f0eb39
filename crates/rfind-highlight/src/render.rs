//! Rendering a highlighted content tree as terminal text.

use rfind_tree::{ContentTree, NodeKind};

use crate::style::colors;

/// How markers are shown when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkStyle {
    /// Tag identifying highlight markers.
    pub highlight_tag: String,
    /// Tag identifying the current marker.
    pub current_tag: String,
    /// Emit ANSI colors. Without colors, matches are bracketed: `[hit]`, current `[[hit]]`.
    pub color: bool,
}

impl MarkStyle {
    /// Creates a style for the given tags.
    pub fn new(highlight_tag: impl Into<String>, current_tag: impl Into<String>, color: bool) -> Self {
        Self {
            highlight_tag: highlight_tag.into(),
            current_tag: current_tag.into(),
            color,
        }
    }

    /// Returns the opening and closing decoration for a marker.
    fn decoration(&self, current: bool) -> (&'static str, &'static str) {
        match (self.color, current) {
            (true, true) => (colors::CURRENT, colors::RESET),
            (true, false) => (colors::MATCH, colors::RESET),
            (false, true) => ("[[", "]]"),
            (false, false) => ("[", "]"),
        }
    }
}

/// Renders the searchable text under the tree's root, decorating markers.
///
/// Excluded subtrees are omitted. Trailing whitespace is trimmed from each line, runs of blank
/// lines collapse to one, and leading and trailing blank lines are dropped.
pub fn render_text<T>(tree: &T, style: &MarkStyle) -> String
where
    T: ContentTree + ?Sized,
{
    let mut raw = String::new();
    write_node(tree, tree.root(), style, &mut raw);
    tidy_lines(&raw)
}

/// Appends the rendering of `node` to `out`.
fn write_node<T>(tree: &T, node: T::Node, style: &MarkStyle, out: &mut String)
where
    T: ContentTree + ?Sized,
{
    match tree.kind(node) {
        NodeKind::Excluded => {}
        NodeKind::Text => out.push_str(tree.text(node).unwrap_or_default()),
        NodeKind::Element => {
            let marker = tree.has_tag(node, &style.highlight_tag);
            let current = tree.has_tag(node, &style.current_tag);
            let (open, close) = if marker || current {
                style.decoration(current)
            } else {
                ("", "")
            };
            out.push_str(open);
            for child in tree.children(node) {
                write_node(tree, child, style, out);
            }
            out.push_str(close);
        }
    }
}

/// Trims line ends and collapses blank lines.
fn tidy_lines(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blank = false;
    for line in raw.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank = !lines.is_empty();
            continue;
        }
        if blank {
            lines.push("");
            blank = false;
        }
        lines.push(line);
    }
    lines.join("\n")
}
