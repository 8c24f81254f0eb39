//! Terminal output for rfind.
//!
//! Renders highlighted documents with the current match picked out, highlights TOML and
//! markup with syntect, and provides ANSI helpers for headers and status messages.

#![warn(missing_docs)]

mod render;
mod style;
mod syntax;

pub use render::{MarkStyle, render_text};
pub use style::{
    colors, dim, error, header, indent_content, rule, subheader, success, warning,
};
pub use syntax::Highlighter;
