//! Content trees for rfind.
//!
//! The search engine never touches a concrete document type. It works through the
//! [`ContentTree`] capability, which any host can implement over its own node model.
//! [`Document`] is the in-memory implementation, and [`parse_markup`] builds one from an
//! HTML-like string.
//!
//! # Example
//!
//! ```
//! use rfind_tree::{ContentTree, NodeKind, parse_markup};
//!
//! let doc = parse_markup("<body><p>Hi</p><script>x()</script></body>").unwrap();
//! let children = doc.children(doc.root());
//! assert_eq!(doc.kind(children[0]), NodeKind::Element);
//! assert_eq!(doc.kind(children[1]), NodeKind::Excluded);
//! ```

#![warn(missing_docs)]

mod document;
mod error;
mod markup;
mod node;
mod tree;

pub use document::{
    DEFAULT_EXCLUDED_ELEMENTS, DEFAULT_MARKER_ELEMENT, DEFAULT_UI_CLASS, Descendants, Document,
    ExclusionRules,
};
pub use error::TreeError;
pub use markup::parse_markup;
pub use node::{Element, NodeData, NodeId, NodeKind};
pub use tree::{ContentTree, ScrollBehavior, ScrollBlock, ScrollOptions};
