//! Error types for tree operations and markup parsing.

use std::fmt::Display;

use thiserror::Error;

/// Errors that can occur when mutating a content tree or reading markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A node handle does not belong to this tree.
    #[error("unknown node {node}")]
    UnknownNode {
        /// Description of the node handle.
        node: String,
    },

    /// A reference node is not a child of the given parent.
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// Description of the parent handle.
        parent: String,
        /// Description of the child handle.
        child: String,
    },

    /// A node has no parent to be removed from or replaced in.
    #[error("node {node} is not attached to a parent")]
    Detached {
        /// Description of the node handle.
        node: String,
    },

    /// A text node was asked to hold children.
    #[error("node {node} cannot have children")]
    NotAContainer {
        /// Description of the node handle.
        node: String,
    },

    /// Markup could not be read.
    #[error("markup error at byte {position}: {message}")]
    Markup {
        /// Byte offset in the input.
        position: usize,
        /// What went wrong.
        message: String,
    },
}

impl TreeError {
    /// Creates an unknown-node error.
    pub fn unknown_node(node: impl Display) -> Self {
        Self::UnknownNode {
            node: node.to_string(),
        }
    }

    /// Creates a not-a-child error.
    pub fn not_a_child(parent: impl Display, child: impl Display) -> Self {
        Self::NotAChild {
            parent: parent.to_string(),
            child: child.to_string(),
        }
    }

    /// Creates a detached-node error.
    pub fn detached(node: impl Display) -> Self {
        Self::Detached {
            node: node.to_string(),
        }
    }

    /// Creates a markup error.
    pub fn markup(position: usize, message: impl Into<String>) -> Self {
        Self::Markup {
            position,
            message: message.into(),
        }
    }
}
