//! Settings that shape a find session, resolved from configuration.

use rfind_config::Config;
use rfind_pattern::RegexEngine;
use rfind_tree::{Document, ExclusionRules, ScrollBehavior, ScrollBlock, ScrollOptions};
use tracing::warn;

/// Resolved settings for a [`FindSession`](crate::FindSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions {
    /// Tag carried by every marker.
    pub highlight_tag: String,
    /// Tag carried by the current marker.
    pub current_tag: String,
    /// Element name for markers, applied to in-memory documents.
    pub marker_element: String,
    /// Which subtrees are never searched.
    pub exclusion: ExclusionRules,
    /// How the current marker is brought into view.
    pub scroll: ScrollOptions,
    /// Pattern engine program size limit.
    pub size_limit: usize,
    /// Pattern engine DFA cache limit.
    pub dfa_size_limit: usize,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl FindOptions {
    /// Resolves options from a loaded configuration.
    ///
    /// Unrecognised scroll values fall back to their defaults with a warning; `rfind check`
    /// reports them in more detail.
    pub fn from_config(config: &Config) -> Self {
        let behavior = config
            .scroll
            .behavior
            .parse::<ScrollBehavior>()
            .unwrap_or_else(|err| {
                warn!("{err}, using default");
                ScrollBehavior::default()
            });
        let block = config
            .scroll
            .block
            .parse::<ScrollBlock>()
            .unwrap_or_else(|err| {
                warn!("{err}, using default");
                ScrollBlock::default()
            });

        let ui_class = config.exclude.ui_class.trim();
        Self {
            highlight_tag: config.markers.highlight.clone(),
            current_tag: config.markers.current.clone(),
            marker_element: config.markers.element.clone(),
            exclusion: ExclusionRules::new(
                config.exclude.elements.iter().filter(|e| !e.trim().is_empty()),
                Some(ui_class),
            ),
            scroll: ScrollOptions { behavior, block },
            size_limit: config.engine.size_limit,
            dfa_size_limit: config.engine.dfa_size_limit,
        }
    }

    /// Returns the default pattern engine configured with these limits.
    pub fn engine(&self) -> RegexEngine {
        RegexEngine::with_limits(self.size_limit, self.dfa_size_limit)
    }

    /// Applies the exclusion rules and marker element to an in-memory document.
    pub fn configure(&self, doc: &mut Document) {
        doc.set_rules(self.exclusion.clone());
        if !self.marker_element.trim().is_empty() {
            doc.set_marker_element(self.marker_element.trim());
        }
    }
}
