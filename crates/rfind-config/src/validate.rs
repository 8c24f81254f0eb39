//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for settings that will not behave
//! the way their author probably intended.

use std::fmt;

use crate::Config;

/// Accepted values for `[scroll] behavior`.
pub const SCROLL_BEHAVIORS: &[&str] = &["smooth", "instant", "auto"];

/// Accepted values for `[scroll] block`.
pub const SCROLL_BLOCKS: &[&str] = &["start", "center", "end", "nearest"];

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The marker element name is empty.
    EmptyMarkerElement,
    /// A marker tag is empty.
    EmptyMarkerTag {
        /// Which setting is empty (`highlight` or `current`).
        field: &'static str,
    },
    /// The highlight and current tags are the same.
    DuplicateMarkerTags {
        /// The shared tag.
        tag: String,
    },
    /// No elements are excluded, so scripts and styles will be searched.
    NoExcludedElements,
    /// The UI class is empty, so the tool's own UI is searchable.
    EmptyUiClass,
    /// An engine limit is zero, so every pattern will fail to compile.
    ZeroEngineLimit {
        /// Which limit is zero.
        field: &'static str,
    },
    /// The scroll behaviour is not recognised.
    UnknownScrollBehavior {
        /// The configured value.
        value: String,
    },
    /// The scroll block alignment is not recognised.
    UnknownScrollBlock {
        /// The configured value.
        value: String,
    },
}

impl ConfigWarning {
    /// Returns a short suggestion for resolving the warning.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::EmptyMarkerElement => "set [markers] element, e.g. \"span\" or \"mark\"",
            Self::EmptyMarkerTag { .. } => "marker tags must be non-empty class names",
            Self::DuplicateMarkerTags { .. } => {
                "use distinct tags so the current match can be told apart"
            }
            Self::NoExcludedElements => "add \"script\" and \"style\" to [exclude] elements",
            Self::EmptyUiClass => "set [exclude] ui_class to the class of the find widget",
            Self::ZeroEngineLimit { .. } => "remove the setting to use the default limit",
            Self::UnknownScrollBehavior { .. } => "expected one of: smooth, instant, auto",
            Self::UnknownScrollBlock { .. } => "expected one of: start, center, end, nearest",
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMarkerElement => write!(f, "marker element name is empty"),
            Self::EmptyMarkerTag { field } => write!(f, "marker tag '{field}' is empty"),
            Self::DuplicateMarkerTags { tag } => {
                write!(f, "highlight and current marker tags are both '{tag}'")
            }
            Self::NoExcludedElements => write!(f, "no elements are excluded from search"),
            Self::EmptyUiClass => write!(f, "ui_class is empty"),
            Self::ZeroEngineLimit { field } => write!(f, "engine {field} is zero"),
            Self::UnknownScrollBehavior { value } => {
                write!(f, "unknown scroll behavior '{value}'")
            }
            Self::UnknownScrollBlock { value } => write!(f, "unknown scroll block '{value}'"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let markers = &config.markers;
    if markers.element.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyMarkerElement);
    }
    if markers.highlight.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyMarkerTag { field: "highlight" });
    }
    if markers.current.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyMarkerTag { field: "current" });
    }
    if !markers.highlight.is_empty() && markers.highlight == markers.current {
        warnings.push(ConfigWarning::DuplicateMarkerTags {
            tag: markers.highlight.clone(),
        });
    }

    if config.exclude.elements.iter().all(|e| e.trim().is_empty()) {
        warnings.push(ConfigWarning::NoExcludedElements);
    }
    if config.exclude.ui_class.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyUiClass);
    }

    if config.engine.size_limit == 0 {
        warnings.push(ConfigWarning::ZeroEngineLimit {
            field: "size_limit",
        });
    }
    if config.engine.dfa_size_limit == 0 {
        warnings.push(ConfigWarning::ZeroEngineLimit {
            field: "dfa_size_limit",
        });
    }

    if !SCROLL_BEHAVIORS.contains(&config.scroll.behavior.as_str()) {
        warnings.push(ConfigWarning::UnknownScrollBehavior {
            value: config.scroll.behavior.clone(),
        });
    }
    if !SCROLL_BLOCKS.contains(&config.scroll.block.as_str()) {
        warnings.push(ConfigWarning::UnknownScrollBlock {
            value: config.scroll.block.clone(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn test_validate_marker_tags() {
        let mut config = Config::default();
        config.markers.current = config.markers.highlight.clone();
        config.markers.element = String::new();

        let warnings = config.validate();
        assert!(warnings.contains(&ConfigWarning::EmptyMarkerElement));
        assert!(warnings.contains(&ConfigWarning::DuplicateMarkerTags {
            tag: "highlight".into()
        }));
    }

    #[test]
    fn test_validate_empty_tag() {
        let mut config = Config::default();
        config.markers.highlight = "  ".into();
        assert_eq!(
            config.validate(),
            vec![ConfigWarning::EmptyMarkerTag { field: "highlight" }]
        );
    }

    #[test]
    fn test_validate_exclusions() {
        let mut config = Config::default();
        config.exclude.elements.clear();
        config.exclude.ui_class.clear();

        let warnings = config.validate();
        assert_eq!(
            warnings,
            vec![ConfigWarning::NoExcludedElements, ConfigWarning::EmptyUiClass]
        );
    }

    #[test]
    fn test_validate_engine_limits() {
        let mut config = Config::default();
        config.engine.size_limit = 0;
        assert_eq!(
            config.validate(),
            vec![ConfigWarning::ZeroEngineLimit {
                field: "size_limit"
            }]
        );
    }

    #[test]
    fn test_validate_scroll_values() {
        let mut config = Config::default();
        config.scroll.behavior = "bouncy".into();
        config.scroll.block = "middle".into();

        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            &warnings[0],
            ConfigWarning::UnknownScrollBehavior { value } if value == "bouncy"
        ));
        assert!(matches!(
            &warnings[1],
            ConfigWarning::UnknownScrollBlock { value } if value == "middle"
        ));
    }

    #[test]
    fn test_warning_display_and_hint() {
        let warning = ConfigWarning::ZeroEngineLimit {
            field: "dfa_size_limit",
        };
        assert_eq!(warning.to_string(), "engine dfa_size_limit is zero");
        assert!(!warning.hint().is_empty());

        let warning = ConfigWarning::NoExcludedElements;
        assert_eq!(warning.to_string(), "no elements are excluded from search");
    }
}
