//! Directory trees of `.rfind.toml` files for discovery tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A throwaway project tree, removed on drop.
pub struct ProjectTree {
    /// Owned temporary directory.
    root: TempDir,
}

impl ProjectTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Returns the top of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates `rel` and any missing parents, returning its path.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `.rfind.toml` with `content` into `rel`, returning the file path.
    ///
    /// An empty `rel` writes at the top of the tree.
    pub fn config(&self, rel: &str, content: &str) -> PathBuf {
        let file = self.mkdir(rel).join(CONFIG_FILENAME);
        fs::write(&file, content).unwrap();
        file
    }

    /// Writes a comment-only config into `rel`.
    pub fn empty_config(&self, rel: &str) -> PathBuf {
        self.config(rel, "# no settings\n")
    }
}
