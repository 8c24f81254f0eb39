//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`.

use std::path::{Path, PathBuf};

use crate::{
    Config, EngineSettings, ExcludeSettings, MarkerSettings, ScrollSettings,
    parse::{RawConfig, RawEngine, RawExclude, RawMarkers, RawScroll},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Every field takes the first defined value. Lists are values too: a higher-precedence
/// `[exclude] elements` replaces a lower one rather than extending it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    if configs.is_empty() {
        return Config::default();
    }

    let mut markers = MarkerSettings::default();
    let mut exclude = ExcludeSettings::default();
    let mut engine = EngineSettings::default();
    let mut scroll = ScrollSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(ref section) = raw.markers {
            apply_raw_markers(&mut markers, section);
        }
        if let Some(ref section) = raw.exclude {
            apply_raw_exclude(&mut exclude, section);
        }
        if let Some(ref section) = raw.engine {
            apply_raw_engine(&mut engine, section);
        }
        if let Some(ref section) = raw.scroll {
            apply_raw_scroll(&mut scroll, section);
        }
    }

    Config {
        markers,
        exclude,
        engine,
        scroll,
        sources: configs.iter().map(|c| c.path.clone()).collect(),
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(Path::to_path_buf),
    }
}

/// Applies a raw `[markers]` section.
fn apply_raw_markers(result: &mut MarkerSettings, raw: &RawMarkers) {
    if let Some(ref v) = raw.element {
        result.element.clone_from(v);
    }
    if let Some(ref v) = raw.highlight {
        result.highlight.clone_from(v);
    }
    if let Some(ref v) = raw.current {
        result.current.clone_from(v);
    }
}

/// Applies a raw `[exclude]` section.
fn apply_raw_exclude(result: &mut ExcludeSettings, raw: &RawExclude) {
    if let Some(ref v) = raw.elements {
        result.elements = v.iter().map(|e| e.trim().to_ascii_lowercase()).collect();
    }
    if let Some(ref v) = raw.ui_class {
        result.ui_class.clone_from(v);
    }
}

/// Applies a raw `[engine]` section.
fn apply_raw_engine(result: &mut EngineSettings, raw: &RawEngine) {
    if let Some(v) = raw.size_limit {
        result.size_limit = v;
    }
    if let Some(v) = raw.dfa_size_limit {
        result.dfa_size_limit = v;
    }
}

/// Applies a raw `[scroll]` section.
fn apply_raw_scroll(result: &mut ScrollSettings, raw: &RawScroll) {
    if let Some(ref v) = raw.behavior {
        result.behavior = v.to_ascii_lowercase();
    }
    if let Some(ref v) = raw.block {
        result.block = v.to_ascii_lowercase();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config(toml).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty() {
        let config = merge_configs(&[]);
        assert_eq!(config.markers, MarkerSettings::default());
        assert!(config.config_root.is_none());
    }

    #[test]
    fn test_merge_first_defined_wins() {
        let configs = [
            parsed("/project/.rfind.toml", "[markers]\nhighlight = \"local\"\n"),
            parsed(
                "/home/user/.rfind.toml",
                "[markers]\nhighlight = \"global\"\nelement = \"mark\"\n",
            ),
        ];
        let config = merge_configs(&configs);
        assert_eq!(config.markers.highlight, "local");
        assert_eq!(config.markers.element, "mark");
        assert_eq!(config.markers.current, "highlight-current");
    }

    #[test]
    fn test_merge_lists_replace() {
        let configs = [
            parsed("/a/.rfind.toml", "[exclude]\nelements = [\"PRE\"]\n"),
            parsed("/.rfind.toml", "[exclude]\nelements = [\"script\", \"style\"]\n"),
        ];
        let config = merge_configs(&configs);
        assert_eq!(config.exclude.elements, vec!["pre"]);
        assert_eq!(config.exclude.ui_class, "rfind-container");
    }

    #[test]
    fn test_merge_engine_and_scroll() {
        let configs = [
            parsed("/a/.rfind.toml", "[scroll]\nblock = \"Start\"\n"),
            parsed("/.rfind.toml", "[engine]\nsize_limit = 4096\n"),
        ];
        let config = merge_configs(&configs);
        assert_eq!(config.scroll.block, "start");
        assert_eq!(config.scroll.behavior, "smooth");
        assert_eq!(config.engine.size_limit, 4096);
        assert_eq!(config.engine.dfa_size_limit, crate::DEFAULT_DFA_SIZE_LIMIT);
    }

    #[test]
    fn test_merge_records_sources_and_root() {
        let configs = [
            parsed("/project/sub/.rfind.toml", ""),
            parsed("/project/.rfind.toml", ""),
        ];
        let config = merge_configs(&configs);
        assert_eq!(config.config_root, Some(PathBuf::from("/project/sub")));
        assert_eq!(
            config.sources,
            vec![
                PathBuf::from("/project/sub/.rfind.toml"),
                PathBuf::from("/project/.rfind.toml")
            ]
        );
    }
}
