//! The find session: the event interface a host drives.

use std::hash::Hash;

use rfind_pattern::{MatchMode, PatternEngine, compile_with};
use rfind_tree::ContentTree;
use tracing::{debug, warn};

use crate::{
    matcher::{MatchSpan, find_matches},
    mutator::{RestoreRecord, apply_highlights},
    navigator::Navigator,
    options::FindOptions,
    restore::{ClearReport, clear_highlights},
    status::{SearchFailure, SearchStatus},
};

/// State for one find tool attached to one tree.
///
/// The session never owns the tree. Every event takes the tree by mutable reference, and every
/// search starts by clearing whatever highlights are present, so at most one generation of
/// markers exists at a time even if the host changed the tree in between.
pub struct FindSession<N> {
    /// Resolved settings.
    options: FindOptions,
    /// Engine used to compile queries.
    engine: Box<dyn PatternEngine>,
    /// Markers from the latest search and the cursor.
    navigator: Navigator<N>,
    /// Records from the latest highlight pass.
    records: Vec<RestoreRecord<N>>,
    /// Whether the tool is showing.
    open: bool,
    /// The latest raw query.
    query: String,
    /// How the latest query was interpreted.
    mode: Option<MatchMode>,
    /// Pattern source handed to the engine for the latest query.
    pattern: Option<String>,
    /// Status after the latest event.
    status: SearchStatus,
}

impl<N: Copy + Eq + Hash> FindSession<N> {
    /// Creates a closed session using the default engine with the configured limits.
    pub fn new(options: FindOptions) -> Self {
        let engine = options.engine();
        Self::with_engine(options, engine)
    }

    /// Creates a closed session with a custom pattern engine.
    pub fn with_engine(options: FindOptions, engine: impl PatternEngine + 'static) -> Self {
        let navigator = Navigator::new(options.current_tag.clone(), options.scroll);
        Self {
            options,
            engine: Box::new(engine),
            navigator,
            records: Vec::new(),
            open: false,
            query: String::new(),
            mode: None,
            pattern: None,
            status: SearchStatus::none(),
        }
    }

    /// Returns the session options.
    pub fn options(&self) -> &FindOptions {
        &self.options
    }

    /// Returns true if the tool is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the latest raw query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns how the latest query was interpreted, if it compiled.
    pub fn mode(&self) -> Option<MatchMode> {
        self.mode
    }

    /// Returns the pattern source compiled for the latest query.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Returns the status after the latest event.
    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    /// Returns the live markers in document order.
    pub fn markers(&self) -> &[N] {
        self.navigator.markers()
    }

    /// Returns the current marker.
    pub fn current_marker(&self) -> Option<N> {
        self.navigator.current_marker()
    }

    /// Opens the tool. Highlights are unaffected.
    pub fn open(&mut self) -> SearchStatus {
        if !self.open {
            debug!("find opened");
        }
        self.open = true;
        self.status.clone()
    }

    /// Closes the tool and removes every highlight.
    pub fn close<T>(&mut self, tree: &mut T) -> ClearReport
    where
        T: ContentTree<Node = N> + ?Sized,
    {
        self.open = false;
        let report = self.clear(tree);
        debug!("find closed");
        report
    }

    /// Opens the tool if closed, closes it otherwise. Returns whether it is now open.
    pub fn toggle<T>(&mut self, tree: &mut T) -> bool
    where
        T: ContentTree<Node = N> + ?Sized,
    {
        if self.open {
            self.close(tree);
        } else {
            self.open();
        }
        self.open
    }

    /// Removes every highlight and resets navigation, keeping the tool open or closed.
    pub fn clear<T>(&mut self, tree: &mut T) -> ClearReport
    where
        T: ContentTree<Node = N> + ?Sized,
    {
        let report = clear_highlights(tree, &self.options.highlight_tag, &self.records);
        self.records.clear();
        self.navigator.clear();
        self.status = SearchStatus::none();
        report
    }

    /// Runs a fresh search for `raw`.
    ///
    /// Existing highlights are cleared first. An empty query leaves the tree clean with zero
    /// matches. An invalid query, a matcher failure, or a rejected mutation leaves the tree
    /// clean and returns a failed status.
    pub fn query_changed<T>(&mut self, tree: &mut T, raw: &str) -> SearchStatus
    where
        T: ContentTree<Node = N> + ?Sized,
    {
        self.clear(tree);
        raw.clone_into(&mut self.query);
        self.mode = None;
        self.pattern = None;

        self.status = match compile_with(raw, self.engine.as_ref()) {
            Ok(None) => SearchStatus::none(),
            Ok(Some(pattern)) => {
                self.mode = Some(pattern.mode());
                self.pattern = Some(pattern.source().to_string());
                match find_matches(&*tree, &pattern) {
                    Ok(spans) => self.highlight(tree, &spans),
                    Err(err) => {
                        debug!(error = %err, "matching failed");
                        SearchStatus::Failed(SearchFailure::from_pattern(&err))
                    }
                }
            }
            Err(err) => {
                debug!(error = %err, "query did not compile");
                SearchStatus::Failed(SearchFailure::from_pattern(&err))
            }
        };
        self.status.clone()
    }

    /// Moves to the next match, wrapping around.
    pub fn next<T>(&mut self, tree: &mut T) -> SearchStatus
    where
        T: ContentTree<Node = N> + ?Sized,
    {
        if !self.navigator.is_empty() {
            self.navigator.next(tree);
            self.status = self.navigator.status();
        }
        self.status.clone()
    }

    /// Moves to the previous match, wrapping around.
    pub fn previous<T>(&mut self, tree: &mut T) -> SearchStatus
    where
        T: ContentTree<Node = N> + ?Sized,
    {
        if !self.navigator.is_empty() {
            self.navigator.previous(tree);
            self.status = self.navigator.status();
        }
        self.status.clone()
    }

    /// Wraps `spans` in markers and selects the first one.
    fn highlight<T>(&mut self, tree: &mut T, spans: &[MatchSpan<N>]) -> SearchStatus
    where
        T: ContentTree<Node = N> + ?Sized,
    {
        match apply_highlights(tree, spans, &self.options.highlight_tag) {
            Ok(highlights) => {
                self.records = highlights.records;
                self.navigator.reset(highlights.markers);
                self.navigator.set_current(tree, 0);
                self.navigator.status()
            }
            Err(err) => {
                warn!(error = %err, "highlighting failed, restoring tree");
                // The failing node was put back whole; nodes split before it hold tagged markers
                clear_highlights(tree, &self.options.highlight_tag, &[]);
                SearchStatus::Failed(SearchFailure::Highlight {
                    message: err.to_string(),
                })
            }
        }
    }
}
