//! Configuration system for rfind.
//!
//! rfind uses TOML configuration files named `.rfind.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.rfind.toml` files found, then loading `~/.rfind.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawEngine, RawExclude, RawMarkers, RawScroll, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::{ConfigWarning, SCROLL_BEHAVIORS, SCROLL_BLOCKS};
use validate::validate_config;

/// Default compiled program size limit for the pattern engine (10 MiB).
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Default lazy DFA cache size limit for the pattern engine (2 MiB).
pub const DEFAULT_DFA_SIZE_LIMIT: usize = 2 * (1 << 20);

/// Top-level merged configuration for rfind.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Highlight marker settings.
    pub markers: MarkerSettings,
    /// Search exclusion settings.
    pub exclude: ExcludeSettings,
    /// Pattern engine settings.
    pub engine: EngineSettings,
    /// Scroll settings for the current match.
    pub scroll: ScrollSettings,
    /// Config files that contributed, highest precedence first.
    pub sources: Vec<PathBuf>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.rfind.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML, in the same shape as a `.rfind.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            markers: &self.markers,
            exclude: &self.exclude,
            engine: &self.engine,
            scroll: &self.scroll,
        };
        toml::to_string_pretty(&serializable).map_err(|source| ConfigError::SerializeToml { source })
    }
}

/// Highlight marker settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkerSettings {
    /// Element name used for markers.
    pub element: String,
    /// Tag carried by every marker.
    pub highlight: String,
    /// Tag carried by the current marker.
    pub current: String,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            element: String::from("span"),
            highlight: String::from("highlight"),
            current: String::from("highlight-current"),
        }
    }
}

/// Search exclusion settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExcludeSettings {
    /// Element names whose subtrees are never searched.
    pub elements: Vec<String>,
    /// Class identifying the tool's own UI.
    pub ui_class: String,
}

impl Default for ExcludeSettings {
    fn default() -> Self {
        Self {
            elements: ["script", "style", "noscript", "head"]
                .into_iter()
                .map(String::from)
                .collect(),
            ui_class: String::from("rfind-container"),
        }
    }
}

/// Pattern engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Compiled program size limit in bytes.
    pub size_limit: usize,
    /// Lazy DFA cache size limit in bytes.
    pub dfa_size_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            size_limit: DEFAULT_SIZE_LIMIT,
            dfa_size_limit: DEFAULT_DFA_SIZE_LIMIT,
        }
    }
}

/// Scroll settings for bringing the current match into view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// One of `smooth`, `instant`, `auto`.
    pub behavior: String,
    /// One of `start`, `center`, `end`, `nearest`.
    pub block: String,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            behavior: String::from("smooth"),
            block: String::from("center"),
        }
    }
}

/// Borrowed view of the settings sections for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Highlight marker settings.
    markers: &'a MarkerSettings,
    /// Search exclusion settings.
    exclude: &'a ExcludeSettings,
    /// Pattern engine settings.
    engine: &'a EngineSettings,
    /// Scroll settings.
    scroll: &'a ScrollSettings,
}
