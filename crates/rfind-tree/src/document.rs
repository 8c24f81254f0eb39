//! In-memory document implementing [`ContentTree`].
//!
//! A `Document` is an arena of nodes under a synthetic top-level node. When markup contains
//! a `body` element, searches start there; otherwise they start at the top-level node.
//! Removing a node releases its subtree's slots for reuse. Handles into a released subtree go
//! stale: every lookup through them fails instead of reaching the node that reuses the slot.

use tracing::trace;

use crate::{
    error::TreeError,
    node::{Element, NodeData, NodeId, NodeKind, Slot},
    tree::{ContentTree, ScrollOptions},
};

/// Elements whose subtrees are excluded from search by default.
pub const DEFAULT_EXCLUDED_ELEMENTS: &[&str] = &["script", "style", "noscript", "head"];

/// Class marking the find tool's own UI, excluded from search by default.
pub const DEFAULT_UI_CLASS: &str = "rfind-container";

/// Element name used for highlight markers by default.
pub const DEFAULT_MARKER_ELEMENT: &str = "span";

/// Name of the synthetic top-level node.
const DOCUMENT_NODE_NAME: &str = "#document";

/// Decides which elements are excluded from search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRules {
    /// Lowercase element names whose subtrees are skipped.
    elements: Vec<String>,
    /// Class marking the tool's own UI subtree.
    ui_class: Option<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_ELEMENTS.iter().copied(),
            Some(DEFAULT_UI_CLASS),
        )
    }
}

impl ExclusionRules {
    /// Creates rules from element names and an optional UI class.
    pub fn new<I, S>(elements: I, ui_class: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            elements: elements
                .into_iter()
                .map(|e| e.as_ref().to_ascii_lowercase())
                .collect(),
            ui_class: ui_class.filter(|c| !c.is_empty()).map(str::to_string),
        }
    }

    /// Returns true if `element`'s subtree must not be searched.
    pub fn excludes(&self, element: &Element) -> bool {
        self.elements.iter().any(|name| *name == element.name)
            || self
                .ui_class
                .as_deref()
                .is_some_and(|class| element.has_class(class))
    }
}

/// An in-memory content tree.
#[derive(Debug, Clone)]
pub struct Document {
    /// Node arena.
    slots: Vec<Slot>,
    /// Indices of released slots, reused before the arena grows.
    free: Vec<usize>,
    /// The synthetic top-level node.
    document: NodeId,
    /// The `body` element, if one was declared.
    body: Option<NodeId>,
    /// Exclusion rules used by [`ContentTree::kind`].
    rules: ExclusionRules,
    /// Element name for new markers.
    marker_element: String,
    /// The latest scroll request.
    last_scroll: Option<(NodeId, ScrollOptions)>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document with default exclusion rules.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::new(NodeData::Element(Element::new(
                DOCUMENT_NODE_NAME,
            )))],
            free: Vec::new(),
            document: NodeId {
                index: 0,
                generation: 0,
            },
            body: None,
            rules: ExclusionRules::default(),
            marker_element: DEFAULT_MARKER_ELEMENT.to_string(),
            last_scroll: None,
        }
    }

    /// Replaces the exclusion rules in place.
    pub fn set_rules(&mut self, rules: ExclusionRules) {
        self.rules = rules;
    }

    /// Sets the element name used for new markers.
    pub fn set_marker_element(&mut self, name: &str) {
        self.marker_element = name.to_ascii_lowercase();
    }

    /// Returns the synthetic top-level node.
    pub fn document_node(&self) -> NodeId {
        self.document
    }

    /// Returns the `body` element, if one exists.
    pub fn body(&self) -> Option<NodeId> {
        self.body
    }

    /// Returns the number of live nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Returns the payload of `node`, or `None` if the handle is stale.
    pub fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.slot(node).map(|slot| &slot.data)
    }

    /// Returns the element payload of `node`, or `None` for text nodes.
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.data(node)? {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    /// Returns a mutable element payload.
    pub(crate) fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.slot_mut(node)?.data {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    /// Appends a new element under `parent`.
    pub fn append_element(&mut self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        self.append_element_with_classes(parent, name, &[])
    }

    /// Appends a new element with classes under `parent`.
    pub fn append_element_with_classes(
        &mut self,
        parent: NodeId,
        name: &str,
        classes: &[&str],
    ) -> Result<NodeId, TreeError> {
        let mut element = Element::new(name);
        for class in classes {
            element.add_class(class);
        }
        self.append_new(parent, NodeData::Element(element))
    }

    /// Appends a parsed element under `parent`, recording it as the body if it is the first
    /// `body` element.
    pub(crate) fn append_parsed_element(
        &mut self,
        parent: NodeId,
        element: Element,
    ) -> Result<NodeId, TreeError> {
        let is_body = element.name == "body";
        let id = self.append_new(parent, NodeData::Element(element))?;
        if is_body && self.body.is_none() {
            self.body = Some(id);
        }
        Ok(id)
    }

    /// Appends a new text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, TreeError> {
        self.append_new(parent, NodeData::Text(text.to_string()))
    }

    /// Appends an existing node as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check_container(parent)?;
        self.check_node(child)?;
        self.detach(child);
        self.slots[parent.index].children.push(child);
        self.slots[child.index].parent = Some(parent);
        Ok(())
    }

    /// Returns an iterator over `node` and its descendants in pre-order.
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        let stack = if self.slot(node).is_some() {
            vec![node]
        } else {
            Vec::new()
        };
        Descendants { doc: self, stack }
    }

    /// Returns the latest scroll request.
    pub fn last_scroll(&self) -> Option<(NodeId, ScrollOptions)> {
        self.last_scroll
    }

    /// Returns the slot for a live handle.
    fn slot(&self, node: NodeId) -> Option<&Slot> {
        self.slots
            .get(node.index)
            .filter(|slot| slot.generation == node.generation)
    }

    /// Returns the mutable slot for a live handle.
    fn slot_mut(&mut self, node: NodeId) -> Option<&mut Slot> {
        self.slots
            .get_mut(node.index)
            .filter(|slot| slot.generation == node.generation)
    }

    /// Creates a detached node, reusing a released slot when one is free.
    fn push_slot(&mut self, data: NodeData) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.data = data;
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len();
        self.slots.push(Slot::new(data));
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Creates a node and appends it under `parent`.
    fn append_new(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId, TreeError> {
        self.check_container(parent)?;
        let id = self.push_slot(data);
        self.slots[parent.index].children.push(id);
        self.slots[id.index].parent = Some(parent);
        Ok(id)
    }

    /// Fails unless `node` is a live handle.
    fn check_node(&self, node: NodeId) -> Result<(), TreeError> {
        match self.slot(node) {
            Some(_) => Ok(()),
            None => Err(TreeError::unknown_node(node)),
        }
    }

    /// Fails unless `node` is live and an element.
    fn check_container(&self, node: NodeId) -> Result<(), TreeError> {
        match self.data(node) {
            Some(NodeData::Element(_)) => Ok(()),
            Some(NodeData::Text(_)) => Err(TreeError::NotAContainer {
                node: node.to_string(),
            }),
            None => Err(TreeError::unknown_node(node)),
        }
    }

    /// Unlinks `node` from its parent, if it has one.
    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.slots[node.index].parent.take() {
            self.slots[parent.index].children.retain(|&c| c != node);
        }
    }

    /// Unlinks `node` and releases its whole subtree.
    fn release(&mut self, node: NodeId) {
        self.detach(node);
        self.free_subtree(node);
    }

    /// Returns the slots of an unlinked subtree to the free list, staling every handle into it.
    fn free_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node.index];
        while let Some(index) = stack.pop() {
            let slot = &mut self.slots[index];
            stack.extend(slot.children.drain(..).map(|child| child.index));
            slot.parent = None;
            slot.data = NodeData::Text(String::new());
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
        }
    }

    /// Returns the position of `child` among `parent`'s children.
    fn child_index(&self, parent: NodeId, child: NodeId) -> Result<usize, TreeError> {
        self.slots[parent.index]
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or_else(|| TreeError::not_a_child(parent, child))
    }
}

impl ContentTree for Document {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.body.unwrap_or(self.document)
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        match self.data(node) {
            Some(NodeData::Text(_)) => NodeKind::Text,
            Some(NodeData::Element(element)) if self.rules.excludes(element) => {
                NodeKind::Excluded
            }
            Some(NodeData::Element(_)) => NodeKind::Element,
            None => NodeKind::Excluded,
        }
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.slot(node)
            .map(|slot| slot.children.clone())
            .unwrap_or_default()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slot(node)?.parent
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match self.data(node)? {
            NodeData::Text(text) => Some(text),
            NodeData::Element(_) => None,
        }
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.push_slot(NodeData::Text(text.to_string()))
    }

    fn create_marker(&mut self, text: &str, tag: &str) -> NodeId {
        let mut element = Element::new(self.marker_element.as_str());
        element.add_class(tag);
        let marker = self.push_slot(NodeData::Element(element));
        let content = self.push_slot(NodeData::Text(text.to_string()));
        self.slots[marker.index].children.push(content);
        self.slots[content.index].parent = Some(marker);
        marker
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        new: NodeId,
        reference: NodeId,
    ) -> Result<(), TreeError> {
        self.check_container(parent)?;
        self.check_node(new)?;
        self.check_node(reference)?;
        self.child_index(parent, reference)?;

        self.detach(new);
        let index = self.child_index(parent, reference)?;
        self.slots[parent.index].children.insert(index, new);
        self.slots[new.index].parent = Some(parent);
        Ok(())
    }

    fn remove(&mut self, node: NodeId) -> Result<(), TreeError> {
        self.check_node(node)?;
        if self.slots[node.index].parent.is_none() {
            return Err(TreeError::detached(node));
        }
        self.release(node);
        Ok(())
    }

    fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), TreeError> {
        self.check_node(old)?;
        self.check_node(new)?;
        if old == new {
            return Ok(());
        }
        let parent = self.slots[old.index]
            .parent
            .ok_or_else(|| TreeError::detached(old))?;

        self.detach(new);
        let index = self.child_index(parent, old)?;
        self.slots[parent.index].children[index] = new;
        self.slots[new.index].parent = Some(parent);
        self.slots[old.index].parent = None;
        self.free_subtree(old);
        Ok(())
    }

    fn normalize(&mut self, node: NodeId) {
        let Some(slot) = self.slot(node) else {
            return;
        };
        let children = slot.children.clone();
        let mut kept: Vec<NodeId> = Vec::with_capacity(children.len());
        let mut dropped: Vec<NodeId> = Vec::new();

        for child in children {
            let text = match &self.slots[child.index].data {
                NodeData::Text(text) => Some(text.clone()),
                NodeData::Element(_) => None,
            };
            match text {
                Some(text) if text.is_empty() => dropped.push(child),
                Some(text) => {
                    if let Some(&prev) = kept.last()
                        && let NodeData::Text(prev_text) = &mut self.slots[prev.index].data
                    {
                        prev_text.push_str(&text);
                        dropped.push(child);
                    } else {
                        kept.push(child);
                    }
                }
                None => {
                    self.normalize(child);
                    kept.push(child);
                }
            }
        }

        self.slots[node.index].children = kept;
        for child in dropped {
            self.slots[child.index].parent = None;
            self.free_subtree(child);
        }
    }

    fn has_tag(&self, node: NodeId, tag: &str) -> bool {
        self.element(node).is_some_and(|el| el.has_class(tag))
    }

    fn add_tag(&mut self, node: NodeId, tag: &str) {
        if let Some(element) = self.element_mut(node) {
            element.add_class(tag);
        }
    }

    fn remove_tag(&mut self, node: NodeId, tag: &str) {
        if let Some(element) = self.element_mut(node) {
            element.remove_class(tag);
        }
    }

    fn scroll_into_view(&mut self, node: NodeId, options: ScrollOptions) {
        trace!(%node, behavior = %options.behavior, block = %options.block, "scroll into view");
        self.last_scroll = Some((node, options));
    }

    fn find_tagged(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.document)
            .filter(|&node| self.has_tag(node, tag))
            .collect()
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    /// The document being walked.
    doc: &'a Document,
    /// Nodes still to visit (rightmost children pushed first).
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order so the leftmost child is visited first
        self.stack
            .extend(self.doc.slots[node.index].children.iter().rev().copied());
        Some(node)
    }
}
