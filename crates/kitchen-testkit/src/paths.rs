//! Project paths
//!
//! The resolved path set (project root, modules, utils) and the data
//! directory helpers. Process-wide lookups go through the configuration
//! store, so every path here agrees with `get_test_config()`.

use crate::error::{TestkitError, TestkitResult};
use kitchen_config::{get_test_config, ProjectLayout};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories the locator makes searchable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectPaths {
    /// Project root
    pub project_root: PathBuf,
    /// Application modules (`<root>/modules`)
    pub modules_dir: PathBuf,
    /// Application utilities (`<root>/utils`)
    pub utils_dir: PathBuf,
}

impl ProjectPaths {
    /// Paths for a given layout
    pub fn from_layout(layout: &ProjectLayout) -> Self {
        Self {
            project_root: layout.root().to_path_buf(),
            modules_dir: layout.modules_dir(),
            utils_dir: layout.utils_dir(),
        }
    }

    /// Paths for the project root of the current process
    pub fn resolve() -> Self {
        Self::from_layout(&ProjectLayout::new(get_project_root()))
    }

    /// `(root, modules, utils)`
    pub fn to_tuple(&self) -> (PathBuf, PathBuf, PathBuf) {
        (
            self.project_root.clone(),
            self.modules_dir.clone(),
            self.utils_dir.clone(),
        )
    }

    /// Directories in `(root, modules, utils)` order
    pub fn dirs(&self) -> [&Path; 3] {
        [&self.project_root, &self.modules_dir, &self.utils_dir]
    }
}

/// Project root of the current process.
///
/// Resolved once, from the compile-time anchor or `KITCHEN_PROJECT_ROOT`,
/// and unaffected by later working-directory changes.
pub fn get_project_root() -> &'static Path {
    &get_test_config().project_root
}

/// `<project_root>/data`
pub fn get_data_dir() -> PathBuf {
    get_project_root().join("data")
}

/// Create the data directory if missing and return its path
pub fn ensure_data_dir() -> TestkitResult<PathBuf> {
    let dir = get_data_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Create the data directory of `layout` if missing and return its path
pub fn ensure_data_dir_in(layout: &ProjectLayout) -> TestkitResult<PathBuf> {
    let dir = layout.data_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Create `dir` and any missing parents. Existing directories are left alone.
pub fn ensure_dir(dir: &Path) -> TestkitResult<()> {
    if dir.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|e| TestkitError::io(dir, e))?;
    debug!(dir = %dir.display(), "created directory");
    Ok(())
}
