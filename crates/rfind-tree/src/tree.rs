//! The content tree capability.
//!
//! Search, highlighting and restoration only ever see a tree through [`ContentTree`]. A host
//! implements it over its own document model; [`Document`](crate::Document) is the in-memory
//! implementation used by the terminal host and the tests.

use std::{
    fmt::{self, Debug, Display},
    hash::Hash,
    str::FromStr,
};

use crate::{error::TreeError, node::NodeKind};

/// How a scroll request should animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Animate smoothly.
    #[default]
    Smooth,
    /// Jump immediately.
    Instant,
    /// Let the host decide.
    Auto,
}

/// Where the target should end up within the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBlock {
    /// Align with the top edge.
    Start,
    /// Center vertically.
    #[default]
    Center,
    /// Align with the bottom edge.
    End,
    /// Scroll as little as possible.
    Nearest,
}

/// Options for a "bring into view" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOptions {
    /// Animation behaviour.
    pub behavior: ScrollBehavior,
    /// Vertical alignment.
    pub block: ScrollBlock,
}

impl FromStr for ScrollBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "smooth" => Ok(Self::Smooth),
            "instant" => Ok(Self::Instant),
            "auto" => Ok(Self::Auto),
            other => Err(format!(
                "unknown scroll behavior '{other}' (expected smooth, instant, or auto)"
            )),
        }
    }
}

impl FromStr for ScrollBlock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            "nearest" => Ok(Self::Nearest),
            other => Err(format!(
                "unknown scroll block '{other}' (expected start, center, end, or nearest)"
            )),
        }
    }
}

impl fmt::Display for ScrollBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Smooth => "smooth",
            Self::Instant => "instant",
            Self::Auto => "auto",
        })
    }
}

impl fmt::Display for ScrollBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::Nearest => "nearest",
        })
    }
}

/// A live, mutable tree of text content.
///
/// Node handles are cheap copies. Newly created nodes are detached until inserted.
pub trait ContentTree {
    /// Handle type for nodes in this tree.
    type Node: Copy + Eq + Hash + Debug + Display;

    /// Returns the node searches start from.
    fn root(&self) -> Self::Node;

    /// Classifies a node for traversal.
    fn kind(&self, node: Self::Node) -> NodeKind;

    /// Returns the children of `node` in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Returns the parent of `node`, or `None` if it is detached or the top of the tree.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns the text of a text node, or `None` for elements.
    fn text(&self, node: Self::Node) -> Option<&str>;

    /// Creates a detached text node.
    fn create_text(&mut self, text: &str) -> Self::Node;

    /// Creates a detached marker element tagged with `tag` and holding `text` as its only
    /// content.
    fn create_marker(&mut self, text: &str, tag: &str) -> Self::Node;

    /// Inserts `new` into `parent` immediately before `reference`.
    fn insert_before(
        &mut self,
        parent: Self::Node,
        new: Self::Node,
        reference: Self::Node,
    ) -> Result<(), TreeError>;

    /// Detaches `node` from its parent.
    fn remove(&mut self, node: Self::Node) -> Result<(), TreeError>;

    /// Puts `new` in the place of `old` within `old`'s parent, detaching `old`.
    fn replace(&mut self, old: Self::Node, new: Self::Node) -> Result<(), TreeError>;

    /// Merges adjacent text nodes and drops empty ones throughout the subtree at `node`.
    fn normalize(&mut self, node: Self::Node);

    /// Returns true if `node` carries `tag`.
    fn has_tag(&self, node: Self::Node, tag: &str) -> bool;

    /// Adds `tag` to an element. Has no effect on text nodes.
    fn add_tag(&mut self, node: Self::Node, tag: &str);

    /// Removes `tag` from an element. Has no effect on text nodes.
    fn remove_tag(&mut self, node: Self::Node, tag: &str);

    /// Asks the host to bring `node` into view.
    fn scroll_into_view(&mut self, node: Self::Node, options: ScrollOptions);

    /// Returns the concatenated text of `node` and all of its descendants.
    fn text_content(&self, node: Self::Node) -> String {
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(text) = self.text(current) {
                out.push_str(text);
            } else {
                stack.extend(self.children(current).into_iter().rev());
            }
        }
        out
    }

    /// Returns every node under [`root`](Self::root) carrying `tag`, in document order.
    fn find_tagged(&self, tag: &str) -> Vec<Self::Node> {
        let mut found = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(current) = stack.pop() {
            if self.has_tag(current, tag) {
                found.push(current);
            }
            stack.extend(self.children(current).into_iter().rev());
        }
        found
    }
}
