//! Shared context for running CLI commands.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use rfind_config::Config;
use rfind_engine::FindOptions;
use rfind_tree::{Document, parse_markup};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (default if no config files were found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Returns the find options for the loaded configuration.
    pub fn find_options(&self) -> FindOptions {
        FindOptions::from_config(&self.config)
    }

    /// Reads and parses `path` (relative to the working directory) with the configured rules.
    pub fn open_document(&self, path: &Path, options: &FindOptions) -> Result<Document, ExitCode> {
        let path = self.cwd.join(path);
        let source = fs::read_to_string(&path).map_err(|e| {
            eprintln!("error: failed to read {}: {e}", path.display());
            ExitCode::FAILURE
        })?;
        let mut doc = parse_markup(&source).map_err(|e| {
            eprintln!("error: failed to parse {}: {e}", path.display());
            ExitCode::FAILURE
        })?;
        options.configure(&mut doc);
        Ok(doc)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
