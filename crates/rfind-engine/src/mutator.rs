//! Wrapping matches in highlight markers.

use std::collections::HashSet;

use rfind_tree::{ContentTree, TreeError};
use tracing::{debug, warn};

use crate::matcher::MatchSpan;

/// The text a parent held before any of its children were split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreRecord<N> {
    /// The parent whose text node(s) were replaced.
    pub parent: N,
    /// The parent's full text content before mutation.
    pub original_text: String,
}

/// Markers created by one highlight pass, with the records needed to verify a restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlights<N> {
    /// Markers in document order.
    pub markers: Vec<N>,
    /// One record per affected parent, in the order parents were first touched.
    pub records: Vec<RestoreRecord<N>>,
}

impl<N> Default for Highlights<N> {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            records: Vec::new(),
        }
    }
}

/// Replaces every matched text node with fragments and markers.
///
/// A text node containing matches becomes `[before][marker][between][marker]...[after]`,
/// where empty fragments are not created. Each marker carries `tag` and holds exactly the
/// matched substring. `spans` must be in document order, as [`find_matches`] returns them.
///
/// [`find_matches`]: crate::find_matches
pub fn apply_highlights<T>(
    tree: &mut T,
    spans: &[MatchSpan<T::Node>],
    tag: &str,
) -> Result<Highlights<T::Node>, TreeError>
where
    T: ContentTree + ?Sized,
{
    let mut highlights = Highlights::default();
    let mut recorded: HashSet<T::Node> = HashSet::new();

    for group in spans.chunk_by(|a, b| a.node == b.node) {
        let node = group[0].node;
        let parent = tree.parent(node).ok_or_else(|| TreeError::detached(node))?;
        record_parent(tree, parent, &mut recorded, &mut highlights.records);
        split_text_node(tree, parent, node, group, tag, &mut highlights.markers)?;
    }

    debug!(
        markers = highlights.markers.len(),
        parents = highlights.records.len(),
        "applied highlights"
    );
    Ok(highlights)
}

/// Records `parent`'s text the first time it is touched.
fn record_parent<T>(
    tree: &T,
    parent: T::Node,
    recorded: &mut HashSet<T::Node>,
    records: &mut Vec<RestoreRecord<T::Node>>,
) where
    T: ContentTree + ?Sized,
{
    if recorded.insert(parent) {
        records.push(RestoreRecord {
            parent,
            original_text: tree.text_content(parent),
        });
    }
}

/// Inserts fragments and markers for `spans` before `node`, then removes `node`.
///
/// Either the whole node is split or the parent is left as it was: when any step fails, every
/// node already inserted for `node` is removed again before the error is returned.
fn split_text_node<T>(
    tree: &mut T,
    parent: T::Node,
    node: T::Node,
    spans: &[MatchSpan<T::Node>],
    tag: &str,
    markers: &mut Vec<T::Node>,
) -> Result<(), TreeError>
where
    T: ContentTree + ?Sized,
{
    let mut inserted = Vec::new();
    let mut created = Vec::new();
    let result = insert_fragments(tree, parent, node, spans, tag, &mut inserted, &mut created)
        .and_then(|()| tree.remove(node));

    if let Err(err) = result {
        for &fragment in inserted.iter().rev() {
            if let Err(undo) = tree.remove(fragment) {
                warn!(%fragment, error = %undo, "could not undo partial highlight");
            }
        }
        return Err(err);
    }
    markers.extend(created);
    Ok(())
}

/// Inserts the fragments and markers for one text node ahead of it.
///
/// Every node that made it into the tree is pushed to `inserted`; markers also go to `created`.
fn insert_fragments<T>(
    tree: &mut T,
    parent: T::Node,
    node: T::Node,
    spans: &[MatchSpan<T::Node>],
    tag: &str,
    inserted: &mut Vec<T::Node>,
    created: &mut Vec<T::Node>,
) -> Result<(), TreeError>
where
    T: ContentTree + ?Sized,
{
    let text = tree.text(node).unwrap_or_default().to_string();
    let mut cursor = 0;

    for span in spans {
        let range = span.range();
        if range.start < cursor || range.end > text.len() {
            // Stale span: the node changed since matching
            continue;
        }
        if range.start > cursor {
            let fragment = tree.create_text(&text[cursor..range.start]);
            tree.insert_before(parent, fragment, node)?;
            inserted.push(fragment);
        }
        let marker = tree.create_marker(&text[range.clone()], tag);
        tree.insert_before(parent, marker, node)?;
        inserted.push(marker);
        created.push(marker);
        cursor = range.end;
    }

    if cursor < text.len() {
        let fragment = tree.create_text(&text[cursor..]);
        tree.insert_before(parent, fragment, node)?;
        inserted.push(fragment);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rfind_pattern::compile;
    use rfind_tree::{Document, NodeId, NodeKind, parse_markup};

    use super::*;
    use crate::{matcher::find_matches, test_support::FaultyTree};

    /// Parses `markup`, highlights `query`, and returns the document and highlights.
    fn highlight(markup: &str, query: &str) -> (Document, Highlights<NodeId>) {
        let mut doc = parse_markup(markup).unwrap();
        let pattern = compile(query).unwrap().unwrap();
        let spans = find_matches(&doc, &pattern).unwrap();
        let highlights = apply_highlights(&mut doc, &spans, "highlight").unwrap();
        (doc, highlights)
    }

    #[test]
    fn wraps_each_match() {
        let (doc, highlights) = highlight("<p>a a a</p>", "a");
        assert_eq!(highlights.markers.len(), 3);
        assert_eq!(
            doc.to_markup(),
            concat!(
                r#"<p><span class="highlight">a</span> "#,
                r#"<span class="highlight">a</span> "#,
                r#"<span class="highlight">a</span></p>"#
            )
        );
    }

    #[test]
    fn keeps_text_around_matches() {
        let (doc, highlights) = highlight("<p>say hello world</p>", "hello");
        let p = doc.children(doc.root())[0];
        let children = doc.children(p);
        assert_eq!(children.len(), 3);
        assert_eq!(doc.text(children[0]), Some("say "));
        assert_eq!(children[1], highlights.markers[0]);
        assert_eq!(doc.text(children[2]), Some(" world"));
        assert_eq!(doc.text_content(p), "say hello world");
    }

    #[test]
    fn no_empty_fragments() {
        let (doc, _) = highlight("<p>hello</p>", "hello");
        let p = doc.children(doc.root())[0];
        let children = doc.children(p);
        assert_eq!(children.len(), 1);
        assert_eq!(doc.kind(children[0]), NodeKind::Element);
    }

    #[test]
    fn records_each_parent_once() {
        let (_, highlights) = highlight("<p>ab <b>ab</b> ab</p>", "ab");
        assert_eq!(highlights.markers.len(), 3);
        assert_eq!(highlights.records.len(), 2);
        assert_eq!(highlights.records[0].original_text, "ab ab ab");
        assert_eq!(highlights.records[1].original_text, "ab");
    }

    #[test]
    fn markers_are_in_document_order() {
        let (doc, highlights) = highlight("<p>x1 <i>x2</i></p><p>x3</p>", "x?");
        let texts: Vec<String> = highlights
            .markers
            .iter()
            .map(|&m| doc.text_content(m))
            .collect();
        assert_eq!(texts, vec!["x1", "x2", "x3"]);
    }

    #[test]
    fn detached_text_node_is_an_error() {
        let mut doc = parse_markup("<p>abc</p>").unwrap();
        let pattern = compile("b").unwrap().unwrap();
        let spans = find_matches(&doc, &pattern).unwrap();
        doc.remove(spans[0].node).unwrap();
        let err = apply_highlights(&mut doc, &spans, "highlight").unwrap_err();
        assert!(matches!(err, TreeError::Detached { .. }));
    }

    #[test]
    fn failed_split_leaves_the_text_node_whole() {
        let doc = parse_markup("<p>x</p><p>say hello world</p>").unwrap();
        let pattern = compile("x|hello").unwrap().unwrap();
        let spans = find_matches(&doc, &pattern).unwrap();
        // First node takes one insertion; the second fails after "say " and the marker
        let mut tree = FaultyTree::new(doc).fail_insert(4);

        let err = apply_highlights(&mut tree, &spans, "highlight").unwrap_err();
        assert!(matches!(err, TreeError::NotAChild { .. }));
        assert_eq!(
            tree.doc.to_markup(),
            r#"<p><span class="highlight">x</span></p><p>say hello world</p>"#
        );
        let second = tree.doc.children(tree.doc.root())[1];
        assert_eq!(tree.doc.children(second).len(), 1);
    }
}
