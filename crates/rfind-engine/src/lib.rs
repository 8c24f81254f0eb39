//! Find, highlight, navigate and restore over a content tree.
//!
//! A search runs in four stages, each usable on its own:
//!
//! 1. **Match**: [`find_matches`] walks the tree and locates every match in searchable text
//! 2. **Highlight**: [`apply_highlights`] splits matched text nodes around tagged markers
//! 3. **Navigate**: [`Navigator`] moves the current-match tag and scrolls it into view
//! 4. **Restore**: [`clear_highlights`] replaces every marker with plain text again
//!
//! [`FindSession`] strings the stages together behind the events a host delivers: open, close,
//! query changed, next and previous.
//!
//! # Example
//!
//! ```
//! use rfind_engine::{FindOptions, FindSession};
//! use rfind_tree::parse_markup;
//!
//! let mut doc = parse_markup("<p>one fish, two fish</p>").unwrap();
//! let mut session = FindSession::new(FindOptions::default());
//! session.open();
//!
//! let status = session.query_changed(&mut doc, "fish");
//! assert_eq!(status.to_string(), "1 of 2 matches");
//!
//! session.close(&mut doc);
//! assert_eq!(doc.to_markup(), "<p>one fish, two fish</p>");
//! ```

#![warn(missing_docs)]

mod matcher;
mod mutator;
mod navigator;
mod options;
mod restore;
mod session;
mod status;
#[cfg(test)]
mod test_support;

pub use matcher::{MatchSpan, find_matches};
pub use mutator::{Highlights, RestoreRecord, apply_highlights};
pub use navigator::Navigator;
pub use options::FindOptions;
pub use restore::{ClearReport, clear_highlights};
pub use session::FindSession;
pub use status::{SearchFailure, SearchStatus};
