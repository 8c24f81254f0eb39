//! Node handles and payloads for the in-memory document.
//!
//! Nodes live in an arena owned by [`Document`](crate::Document) and are addressed by
//! [`NodeId`]. A node is either a run of text or an element with a name, a set of
//! classes (used as tags), and any other attributes read from markup.

use std::fmt;

/// Handle to a node in a [`Document`](crate::Document).
///
/// Slots of removed nodes are reused. The generation tells a stale handle apart from the node
/// that took over its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    /// Arena index.
    pub(crate) index: usize,
    /// Generation of the slot when this handle was issued.
    pub(crate) generation: u32,
}

impl NodeId {
    /// Returns the arena index of this node.
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "#{}", self.index)
        } else {
            write!(f, "#{}.{}", self.index, self.generation)
        }
    }
}

/// How the search pipeline treats a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A run of text that can be searched.
    Text,
    /// An element whose children are searched.
    Element,
    /// An element whose whole subtree is skipped (scripts, styles, the tool's own UI).
    Excluded,
}

/// An element's name, classes, and remaining attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase element name.
    pub name: String,
    /// Class list, in source order and without duplicates.
    pub classes: Vec<String>,
    /// Attributes other than `class`, in source order.
    pub attributes: Vec<(String, String)>,
}

impl Element {
    /// Creates an element with no classes or attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Returns true if the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds `class` unless it is already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes `class` if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Returns the value of an attribute other than `class`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// A text run.
    Text(String),
    /// An element.
    Element(Element),
}

/// An arena slot: a node's payload plus its links.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    /// Parent node, or `None` for the document node and detached nodes.
    pub(crate) parent: Option<NodeId>,
    /// Children in document order.
    pub(crate) children: Vec<NodeId>,
    /// Node payload.
    pub(crate) data: NodeData,
    /// Bumped each time the slot is released.
    pub(crate) generation: u32,
}

impl Slot {
    /// Creates an unattached slot.
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
            generation: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_names_are_lowercased() {
        assert_eq!(Element::new("SCRIPT").name, "script");
    }

    #[test]
    fn classes_behave_as_a_set() {
        let mut el = Element::new("span");
        el.add_class("highlight");
        el.add_class("highlight");
        assert_eq!(el.classes, vec!["highlight"]);
        assert!(el.has_class("highlight"));

        el.remove_class("highlight");
        assert!(!el.has_class("highlight"));
    }

    #[test]
    fn attribute_lookup() {
        let mut el = Element::new("a");
        el.attributes.push(("href".into(), "/home".into()));
        assert_eq!(el.attribute("href"), Some("/home"));
        assert_eq!(el.attribute("title"), None);
    }

    #[test]
    fn node_id_display() {
        let fresh = NodeId {
            index: 7,
            generation: 0,
        };
        let reused = NodeId {
            index: 7,
            generation: 2,
        };
        assert_eq!(fresh.to_string(), "#7");
        assert_eq!(reused.to_string(), "#7.2");
        assert_ne!(fresh, reused);
    }
}
