//! A document wrapper that misbehaves on request.

use rfind_tree::{ContentTree, Document, NodeId, NodeKind, ScrollOptions, TreeError};

/// Wraps a [`Document`], rejecting one chosen insertion and reporting extra tagged nodes.
pub struct FaultyTree {
    /// The real document.
    pub doc: Document,
    /// One-based `insert_before` call that fails, if any.
    fail_insert: Option<usize>,
    /// `insert_before` calls seen so far.
    inserts: usize,
    /// Nodes reported by `find_tagged` ahead of the document's own.
    orphans: Vec<NodeId>,
}

impl FaultyTree {
    /// Wraps `doc` without any faults.
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            fail_insert: None,
            inserts: 0,
            orphans: Vec::new(),
        }
    }

    /// Makes the `nth` insertion from now on fail.
    pub fn fail_insert(mut self, nth: usize) -> Self {
        self.fail_insert = Some(self.inserts + nth);
        self
    }

    /// Reports `node` from every `find_tagged` call.
    pub fn with_orphan(mut self, node: NodeId) -> Self {
        self.orphans.push(node);
        self
    }
}

impl ContentTree for FaultyTree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.doc.root()
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        self.doc.kind(node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.doc.children(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.doc.parent(node)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.doc.text(node)
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.doc.create_text(text)
    }

    fn create_marker(&mut self, text: &str, tag: &str) -> NodeId {
        self.doc.create_marker(text, tag)
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        new: NodeId,
        reference: NodeId,
    ) -> Result<(), TreeError> {
        self.inserts += 1;
        if self.fail_insert == Some(self.inserts) {
            return Err(TreeError::not_a_child(parent, reference));
        }
        self.doc.insert_before(parent, new, reference)
    }

    fn remove(&mut self, node: NodeId) -> Result<(), TreeError> {
        self.doc.remove(node)
    }

    fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), TreeError> {
        self.doc.replace(old, new)
    }

    fn normalize(&mut self, node: NodeId) {
        self.doc.normalize(node);
    }

    fn has_tag(&self, node: NodeId, tag: &str) -> bool {
        self.doc.has_tag(node, tag)
    }

    fn add_tag(&mut self, node: NodeId, tag: &str) {
        self.doc.add_tag(node, tag);
    }

    fn remove_tag(&mut self, node: NodeId, tag: &str) {
        self.doc.remove_tag(node, tag);
    }

    fn scroll_into_view(&mut self, node: NodeId, options: ScrollOptions) {
        self.doc.scroll_into_view(node, options);
    }

    fn find_tagged(&self, tag: &str) -> Vec<NodeId> {
        let mut found = self.orphans.clone();
        found.extend(self.doc.find_tagged(tag));
        found
    }
}
