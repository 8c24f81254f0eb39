//! Configuration file parsing.
//!
//! Parses individual `.rfind.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Highlight marker section.
    pub markers: Option<RawMarkers>,
    /// Search exclusion section.
    pub exclude: Option<RawExclude>,
    /// Pattern engine section.
    pub engine: Option<RawEngine>,
    /// Scroll behaviour section.
    pub scroll: Option<RawScroll>,
}

/// Raw `[markers]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMarkers {
    /// Element name used for markers.
    pub element: Option<String>,
    /// Tag carried by every marker.
    pub highlight: Option<String>,
    /// Tag carried by the current marker.
    pub current: Option<String>,
}

/// Raw `[exclude]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExclude {
    /// Element names whose subtrees are never searched.
    /// Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub elements: Option<Vec<String>>,
    /// Class identifying the tool's own UI.
    pub ui_class: Option<String>,
}

/// Raw `[engine]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEngine {
    /// Compiled program size limit in bytes.
    pub size_limit: Option<usize>,
    /// Lazy DFA cache size limit in bytes.
    pub dfa_size_limit: Option<usize>,
}

/// Raw `[scroll]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawScroll {
    /// Scroll animation behaviour.
    pub behavior: Option<String>,
    /// Vertical alignment of the current match.
    pub block: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.markers.is_none());
        assert!(config.exclude.is_none());
        assert!(config.engine.is_none());
        assert!(config.scroll.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
root = true

[markers]
element = "mark"
highlight = "hit"
current = "hit-current"

[exclude]
elements = ["script", "style", "pre"]
ui_class = "finder"

[engine]
size_limit = 1048576
dfa_size_limit = 524288

[scroll]
behavior = "instant"
block = "nearest"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.root, Some(true));

        let markers = config.markers.unwrap();
        assert_eq!(markers.element.as_deref(), Some("mark"));
        assert_eq!(markers.highlight.as_deref(), Some("hit"));
        assert_eq!(markers.current.as_deref(), Some("hit-current"));

        let exclude = config.exclude.unwrap();
        assert_eq!(
            exclude.elements,
            Some(vec!["script".into(), "style".into(), "pre".into()])
        );
        assert_eq!(exclude.ui_class.as_deref(), Some("finder"));

        let engine = config.engine.unwrap();
        assert_eq!(engine.size_limit, Some(1_048_576));
        assert_eq!(engine.dfa_size_limit, Some(524_288));

        let scroll = config.scroll.unwrap();
        assert_eq!(scroll.behavior.as_deref(), Some("instant"));
        assert_eq!(scroll.block.as_deref(), Some("nearest"));
    }

    #[test]
    fn test_parse_single_excluded_element() {
        let toml = r#"
[exclude]
elements = "pre"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.exclude.unwrap().elements, Some(vec!["pre".into()]));
    }

    #[test]
    fn test_parse_partial_section() {
        let toml = r#"
[markers]
highlight = "found"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let markers = config.markers.unwrap();
        assert_eq!(markers.highlight.as_deref(), Some("found"));
        assert!(markers.element.is_none());
        assert!(markers.current.is_none());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config_str("this is not valid toml [[[", Path::new("test.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn test_parse_unknown_fields_ignored() {
        let toml = r#"
[markers]
element = "mark"
flavour = "vanilla"

[unknown_section]
foo = "bar"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.markers.unwrap().element.as_deref(), Some("mark"));
    }

    #[test]
    fn test_parse_wrong_type_error() {
        let toml = r#"
[engine]
size_limit = "huge"
"#;
        assert!(parse_config_str(toml, Path::new("test.toml")).is_err());
    }

    #[test]
    fn test_parse_config_file_not_found() {
        let result = parse_config_file(Path::new("/nonexistent/path/.rfind.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_is_root_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".rfind.toml");

        fs::write(&config_path, "root = true\n").unwrap();
        assert!(is_root_config(&config_path));

        fs::write(&config_path, "root = false\n").unwrap();
        assert!(!is_root_config(&config_path));

        fs::write(&config_path, "[markers]\nelement = \"mark\"\n").unwrap();
        assert!(!is_root_config(&config_path));

        assert!(!is_root_config(Path::new("/nonexistent/.rfind.toml")));
    }
}
