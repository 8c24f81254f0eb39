//! Locating matches in a content tree.

use std::ops::Range;

use rfind_pattern::{CompiledPattern, PatternError};
use rfind_tree::{ContentTree, NodeKind};
use tracing::debug;

/// One match inside a text node, located before any mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan<N> {
    /// The text node containing the match.
    pub node: N,
    /// Byte offset of the match within the node's text.
    pub offset: usize,
    /// Byte length of the match.
    pub len: usize,
    /// The matched text.
    pub text: String,
}

impl<N> MatchSpan<N> {
    /// Returns the byte range of the match within its node.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Finds every match of `pattern` in the searchable text under the tree's root.
///
/// Nodes are visited depth-first in document order. Excluded subtrees are skipped entirely.
/// Within a text node, matches are leftmost and non-overlapping; empty matches are dropped.
/// If the matcher fails on any node the whole search fails and no spans are returned.
pub fn find_matches<T>(
    tree: &T,
    pattern: &CompiledPattern,
) -> Result<Vec<MatchSpan<T::Node>>, PatternError>
where
    T: ContentTree + ?Sized,
{
    let mut spans = Vec::new();
    let mut text_nodes = 0usize;
    let mut stack = vec![tree.root()];

    while let Some(node) = stack.pop() {
        match tree.kind(node) {
            NodeKind::Excluded => {}
            NodeKind::Element => stack.extend(tree.children(node).into_iter().rev()),
            NodeKind::Text => {
                let Some(text) = tree.text(node) else {
                    continue;
                };
                text_nodes += 1;
                for range in pattern.find_all(text)? {
                    if range.is_empty() {
                        continue;
                    }
                    spans.push(MatchSpan {
                        node,
                        offset: range.start,
                        len: range.len(),
                        text: text[range].to_string(),
                    });
                }
            }
        }
    }

    debug!(
        query = pattern.query(),
        text_nodes,
        matches = spans.len(),
        "matched tree"
    );
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use rfind_pattern::compile;
    use rfind_tree::parse_markup;

    use super::*;

    /// Runs `query` against `markup` and returns the matched strings.
    fn matched(markup: &str, query: &str) -> Vec<String> {
        let doc = parse_markup(markup).unwrap();
        let pattern = compile(query).unwrap().unwrap();
        find_matches(&doc, &pattern)
            .unwrap()
            .into_iter()
            .map(|span| span.text)
            .collect()
    }

    #[test]
    fn finds_matches_in_document_order() {
        let spans = matched(
            "<body><p>one <em>two</em></p><p>three</p></body>",
            "t?o|e",
        );
        // Regex mode because of '|'
        assert_eq!(spans, vec!["o", "e", "two", "e", "e"]);
    }

    #[test]
    fn skips_excluded_subtrees() {
        let spans = matched(
            r#"<body><p>hidden?</p><script>hidden</script><style>.hidden{}</style>
               <div class="rfind-container">hidden</div></body>"#,
            "hidden",
        );
        assert_eq!(spans, vec!["hidden"]);
    }

    #[test]
    fn records_offsets_within_node() {
        let doc = parse_markup("<p>aaaa</p>").unwrap();
        let pattern = compile("aa").unwrap().unwrap();
        let spans = find_matches(&doc, &pattern).unwrap();
        let ranges: Vec<_> = spans.iter().map(MatchSpan::range).collect();
        assert_eq!(ranges, vec![0..2, 2..4]);
        assert!(spans.iter().all(|s| s.node == spans[0].node));
    }

    #[test]
    fn drops_empty_matches() {
        assert!(matched("<p>abc</p>", "(x)*").is_empty());
        assert_eq!(matched("<p>abxc</p>", "(x)*"), vec!["x"]);
    }

    #[test]
    fn matches_never_span_nodes() {
        assert!(matched("<p>hel<b>lo</b></p>", "hello").is_empty());
    }

    #[test]
    fn excluded_root_yields_nothing() {
        assert!(matched("<body class=\"rfind-container\">text</body>", "text").is_empty());
    }
}
