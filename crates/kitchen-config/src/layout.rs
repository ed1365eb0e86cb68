//! Project Layout
//!
//! Resolves the Kitchen Dashboard project root and every directory derived
//! from it. All paths in the configuration record come from one layout so they
//! stay mutually consistent.

use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that points the kit at a specific checkout
pub const PROJECT_ROOT_ENV: &str = "KITCHEN_PROJECT_ROOT";

/// Utility the default layout is anchored on: this crate, which lives in
/// `<checkout>/crates/`, so the project root is the checkout itself.
///
/// Captured at compile time, so the resolved root never depends on the
/// working directory of the test process.
const UTILITY_ANCHOR: &str = env!("CARGO_MANIFEST_DIR");

/// Directory layout of a Kitchen Dashboard checkout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Create a layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Derive the layout from the location of a utility file.
    ///
    /// The project root is the parent of the file's own directory, so a
    /// utility at `/proj/tests/test_utils.rs` yields `/proj`.
    pub fn from_utility_file(file: &Path) -> ConfigResult<Self> {
        file.parent()
            .and_then(Path::parent)
            .map(Self::new)
            .ok_or_else(|| ConfigError::InvalidRoot(file.to_path_buf()))
    }

    /// Layout anchored on this crate's location in the checkout
    pub fn anchored() -> Self {
        Self::from_utility_file(Path::new(UTILITY_ANCHOR))
            .unwrap_or_else(|_| Self::new(env!("CARGO_MANIFEST_DIR")))
    }

    /// Resolve the layout for the current process.
    ///
    /// `KITCHEN_PROJECT_ROOT` wins when set and non-empty; a relative value is
    /// resolved once against the working directory. Otherwise the compile-time
    /// anchor is used.
    pub fn resolve() -> Self {
        match env::var(PROJECT_ROOT_ENV) {
            Ok(root) if !root.trim().is_empty() => {
                let root = PathBuf::from(root);
                let root = if root.is_relative() {
                    env::current_dir()
                        .map(|cwd| cwd.join(&root))
                        .unwrap_or(root)
                } else {
                    root
                };
                debug!(root = %root.display(), "project root taken from {}", PROJECT_ROOT_ENV);
                Self::new(root)
            }
            _ => Self::anchored(),
        }
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/data`
    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    /// `<root>/logs`
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// `<root>/tests`
    pub fn tests_dir(&self) -> PathBuf {
        self.root.join("tests")
    }

    /// `<root>/modules`
    pub fn modules_dir(&self) -> PathBuf {
        self.root.join("modules")
    }

    /// `<root>/utils`
    pub fn utils_dir(&self) -> PathBuf {
        self.root.join("utils")
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self::resolve()
    }
}
