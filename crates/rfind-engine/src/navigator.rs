//! Stepping through markers.

use rfind_tree::{ContentTree, ScrollOptions};
use tracing::debug;

use crate::status::SearchStatus;

/// Ordered marker handles plus a cursor.
///
/// Exactly one marker carries the current tag whenever the list is non-empty and a cursor has
/// been set. The navigator holds handles only; the tree owns the markers.
#[derive(Debug, Clone)]
pub struct Navigator<N> {
    /// Markers in document order.
    markers: Vec<N>,
    /// Index of the current marker.
    current: Option<usize>,
    /// Tag moved between markers as the cursor changes.
    current_tag: String,
    /// How the current marker is brought into view.
    scroll: ScrollOptions,
}

impl<N: Copy + Eq> Navigator<N> {
    /// Creates an empty navigator.
    pub fn new(current_tag: impl Into<String>, scroll: ScrollOptions) -> Self {
        Self {
            markers: Vec::new(),
            current: None,
            current_tag: current_tag.into(),
            scroll,
        }
    }

    /// Replaces the marker list and clears the cursor. The tree is not touched.
    pub fn reset(&mut self, markers: Vec<N>) {
        self.markers = markers;
        self.current = None;
    }

    /// Forgets all markers.
    pub fn clear(&mut self) {
        self.reset(Vec::new());
    }

    /// Returns the markers in document order.
    pub fn markers(&self) -> &[N] {
        &self.markers
    }

    /// Returns the number of markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns true if there are no markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Returns the cursor position.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Returns the current marker.
    pub fn current_marker(&self) -> Option<N> {
        self.current.and_then(|i| self.markers.get(i).copied())
    }

    /// Moves the cursor to `index`, retagging markers and scrolling the new one into view.
    ///
    /// Returns false, changing nothing, if `index` is out of range.
    pub fn set_current<T>(&mut self, tree: &mut T, index: usize) -> bool
    where
        T: ContentTree<Node = N> + ?Sized,
    {
        let Some(&marker) = self.markers.get(index) else {
            return false;
        };
        if let Some(previous) = self.current_marker() {
            tree.remove_tag(previous, &self.current_tag);
        }
        tree.add_tag(marker, &self.current_tag);
        self.current = Some(index);
        tree.scroll_into_view(marker, self.scroll);
        debug!(index, count = self.markers.len(), "moved to match");
        true
    }

    /// Advances the cursor, wrapping from the last marker to the first. No-op when empty.
    pub fn next<T>(&mut self, tree: &mut T)
    where
        T: ContentTree<Node = N> + ?Sized,
    {
        let len = self.markers.len();
        if len == 0 {
            return;
        }
        let index = self.current.map_or(0, |i| (i + 1) % len);
        self.set_current(tree, index);
    }

    /// Moves the cursor back, wrapping from the first marker to the last. No-op when empty.
    pub fn previous<T>(&mut self, tree: &mut T)
    where
        T: ContentTree<Node = N> + ?Sized,
    {
        let len = self.markers.len();
        if len == 0 {
            return;
        }
        let index = self.current.map_or(len - 1, |i| (i + len - 1) % len);
        self.set_current(tree, index);
    }

    /// Returns the status for the current list and cursor.
    pub fn status(&self) -> SearchStatus {
        SearchStatus::Matches {
            count: self.markers.len(),
            current: self.current,
        }
    }
}

#[cfg(test)]
mod tests {
    use rfind_pattern::compile;
    use rfind_tree::{Document, NodeId, parse_markup};

    use super::*;
    use crate::{matcher::find_matches, mutator::apply_highlights};

    /// Highlights `query` and returns a navigator over the markers.
    fn navigator(markup: &str, query: &str) -> (Document, Navigator<NodeId>) {
        let mut doc = parse_markup(markup).unwrap();
        let pattern = compile(query).unwrap().unwrap();
        let spans = find_matches(&doc, &pattern).unwrap();
        let highlights = apply_highlights(&mut doc, &spans, "highlight").unwrap();
        let mut nav = Navigator::new("highlight-current", ScrollOptions::default());
        nav.reset(highlights.markers);
        (doc, nav)
    }

    /// Returns the indices of markers carrying the current tag.
    fn tagged(doc: &Document, nav: &Navigator<NodeId>) -> Vec<usize> {
        nav.markers()
            .iter()
            .enumerate()
            .filter(|&(_, &m)| doc.has_tag(m, "highlight-current"))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn next_wraps_around() {
        let (mut doc, mut nav) = navigator("<p>a a a</p>", "a");
        nav.set_current(&mut doc, 0);
        for _ in 0..nav.len() {
            nav.next(&mut doc);
        }
        assert_eq!(nav.current(), Some(0));
        assert_eq!(tagged(&doc, &nav), vec![0]);
    }

    #[test]
    fn previous_wraps_to_last() {
        let (mut doc, mut nav) = navigator("<p>a a a a</p>", "a");
        nav.set_current(&mut doc, 0);
        nav.previous(&mut doc);
        assert_eq!(nav.current(), Some(3));
        assert_eq!(tagged(&doc, &nav), vec![3]);
    }

    #[test]
    fn exactly_one_current_marker() {
        let (mut doc, mut nav) = navigator("<p>x y x y x</p>", "x");
        nav.set_current(&mut doc, 0);
        nav.next(&mut doc);
        nav.next(&mut doc);
        nav.previous(&mut doc);
        assert_eq!(tagged(&doc, &nav), vec![1]);
    }

    #[test]
    fn moving_scrolls_the_new_marker_into_view() {
        let (mut doc, mut nav) = navigator("<p>a b a</p>", "a");
        nav.set_current(&mut doc, 0);
        nav.next(&mut doc);
        let current = nav.current_marker().unwrap();
        assert_eq!(doc.last_scroll(), Some((current, ScrollOptions::default())));
    }

    #[test]
    fn empty_navigator_ignores_movement() {
        let mut doc = Document::new();
        let mut nav: Navigator<NodeId> = Navigator::new("current", ScrollOptions::default());
        nav.next(&mut doc);
        nav.previous(&mut doc);
        assert_eq!(nav.current(), None);
        assert_eq!(doc.last_scroll(), None);
        assert_eq!(nav.status().to_string(), "0 matches");
    }

    #[test]
    fn out_of_range_cursor_is_rejected() {
        let (mut doc, mut nav) = navigator("<p>a</p>", "a");
        assert!(!nav.set_current(&mut doc, 1));
        assert_eq!(nav.current(), None);
        assert!(nav.set_current(&mut doc, 0));
    }

    #[test]
    fn status_reports_position() {
        let (mut doc, mut nav) = navigator("<p>a a a</p>", "a");
        nav.set_current(&mut doc, 0);
        assert_eq!(nav.status().to_string(), "1 of 3 matches");
        nav.next(&mut doc);
        assert_eq!(nav.status().to_string(), "2 of 3 matches");
    }
}
