//! Removing highlight markers and restoring the original text.

use std::collections::HashSet;

use rfind_tree::ContentTree;
use tracing::{debug, warn};

use crate::mutator::RestoreRecord;

/// What a clear pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Markers replaced by plain text.
    pub restored: usize,
    /// Parents whose text nodes were merged afterwards.
    pub normalized: usize,
    /// Markers left in place because they had no parent or could not be replaced.
    pub skipped: usize,
    /// Parents whose restored text differs from the recorded original.
    pub mismatched: usize,
}

impl ClearReport {
    /// Returns true if the pass found nothing to do.
    pub fn is_empty(&self) -> bool {
        self.restored == 0 && self.skipped == 0
    }
}

/// Replaces every marker tagged `tag` anywhere in the tree with a text node holding its text,
/// then merges adjacent text in each affected parent.
///
/// The pass is global and idempotent: it does not depend on which markers the caller
/// remembers, and running it on a clean tree changes nothing. Markers that cannot be replaced
/// are skipped and counted rather than reported as errors. When `records` are given, each
/// recorded parent's text is compared with what it held before highlighting.
pub fn clear_highlights<T>(
    tree: &mut T,
    tag: &str,
    records: &[RestoreRecord<T::Node>],
) -> ClearReport
where
    T: ContentTree + ?Sized,
{
    let mut report = ClearReport::default();
    let mut affected: Vec<T::Node> = Vec::new();
    let mut seen: HashSet<T::Node> = HashSet::new();

    for marker in tree.find_tagged(tag) {
        let Some(parent) = tree.parent(marker) else {
            warn!(%marker, "highlight marker has no parent, leaving it");
            report.skipped += 1;
            continue;
        };
        let text = tree.text_content(marker);
        let replacement = tree.create_text(&text);
        if let Err(err) = tree.replace(marker, replacement) {
            warn!(%marker, error = %err, "could not restore highlight marker");
            report.skipped += 1;
            continue;
        }
        report.restored += 1;
        if seen.insert(parent) {
            affected.push(parent);
        }
    }

    for &parent in &affected {
        tree.normalize(parent);
    }
    report.normalized = affected.len();

    for record in records {
        let restored = tree.text_content(record.parent);
        if restored != record.original_text {
            warn!(
                parent = %record.parent,
                expected = %record.original_text,
                actual = %restored,
                "restored text differs from original"
            );
            report.mismatched += 1;
        }
    }

    if !report.is_empty() {
        debug!(
            restored = report.restored,
            normalized = report.normalized,
            skipped = report.skipped,
            "cleared highlights"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use rfind_pattern::compile;
    use rfind_tree::{Document, NodeId, parse_markup};

    use super::*;
    use crate::{matcher::find_matches, mutator::apply_highlights, test_support::FaultyTree};

    /// Highlights `query` in `doc` and returns the restore records.
    fn highlight(doc: &mut Document, query: &str) -> Vec<RestoreRecord<NodeId>> {
        let pattern = compile(query).unwrap().unwrap();
        let spans = find_matches(&*doc, &pattern).unwrap();
        apply_highlights(doc, &spans, "highlight").unwrap().records
    }

    #[test]
    fn restores_original_markup() {
        let source = "<body><p>say hello, hello world</p><div>hello <b>there</b></div></body>";
        let mut doc = parse_markup(source).unwrap();
        let records = highlight(&mut doc, "hello");
        assert_ne!(doc.to_markup(), source);

        let report = clear_highlights(&mut doc, "highlight", &records);
        assert_eq!(report.restored, 3);
        assert_eq!(report.normalized, 2);
        assert_eq!(report.mismatched, 0);
        assert_eq!(doc.to_markup(), source);
    }

    #[test]
    fn merges_text_back_into_one_node() {
        let mut doc = parse_markup("<p>a a a</p>").unwrap();
        let records = highlight(&mut doc, "a");
        clear_highlights(&mut doc, "highlight", &records);

        let p = doc.children(doc.root())[0];
        let children = doc.children(p);
        assert_eq!(children.len(), 1);
        assert_eq!(doc.text(children[0]), Some("a a a"));
    }

    #[test]
    fn clearing_a_clean_tree_is_a_no_op() {
        let mut doc = parse_markup("<p>plain</p>").unwrap();
        let report = clear_highlights(&mut doc, "highlight", &[]);
        assert!(report.is_empty());
        assert_eq!(doc.to_markup(), "<p>plain</p>");

        highlight(&mut doc, "plain");
        clear_highlights(&mut doc, "highlight", &[]);
        let again = clear_highlights(&mut doc, "highlight", &[]);
        assert_eq!(again, ClearReport::default());
    }

    #[test]
    fn finds_markers_it_was_not_told_about() {
        let mut doc = parse_markup(r#"<p>x <span class="highlight">stale</span> y</p>"#).unwrap();
        let report = clear_highlights(&mut doc, "highlight", &[]);
        assert_eq!(report.restored, 1);
        assert_eq!(doc.to_markup(), "<p>x stale y</p>");
    }

    #[test]
    fn detached_markers_are_skipped() {
        let mut doc = parse_markup("<p>one two</p>").unwrap();
        let orphan = doc.create_marker("orphan", "highlight");
        highlight(&mut doc, "two");
        let mut tree = FaultyTree::new(doc).with_orphan(orphan);

        let report = clear_highlights(&mut tree, "highlight", &[]);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.restored, 1);
        assert_eq!(tree.doc.to_markup(), "<p>one two</p>");
    }

    #[test]
    fn reports_text_that_changed_while_highlighted() {
        let mut doc = parse_markup("<p>abc</p>").unwrap();
        let records = highlight(&mut doc, "b");
        let p = records[0].parent;
        let extra = doc.create_text("!");
        doc.append_child(p, extra).unwrap();

        let report = clear_highlights(&mut doc, "highlight", &records);
        assert_eq!(report.restored, 1);
        assert_eq!(report.mismatched, 1);
        assert_eq!(doc.text_content(p), "abc!");
    }
}
