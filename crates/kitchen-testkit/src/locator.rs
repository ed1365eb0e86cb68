//! Module location
//!
//! Resolves dotted module names (`inventory`, `modules.inventory`) to files
//! or package directories of the application under test. The search path is
//! owned by the locator and threaded through callers explicitly.

use crate::error::ImportError;
use crate::paths::ProjectPaths;
use kitchen_config::ProjectLayout;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source extensions of the application under test
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["py"];

/// How a module is laid out on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// A single source file (`inventory.py`)
    File,
    /// A package directory (`inventory/`)
    Package,
}

/// A module found on the search path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedModule {
    /// Dotted name as requested
    pub name: String,
    /// File or directory that satisfied the lookup
    pub path: PathBuf,
    /// Search-path entry the module was found under
    pub search_dir: PathBuf,
    pub kind: ModuleKind,
}

/// Explicit module search context.
///
/// Replaces a process-global search path: each locator carries its own
/// ordered directory list, and [`ModuleLocator::setup_module_imports`] only
/// ever adds the project directories once.
#[derive(Debug, Clone)]
pub struct ModuleLocator {
    paths: ProjectPaths,
    search_path: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl ModuleLocator {
    /// Create a locator with an empty search path
    pub fn new(paths: ProjectPaths) -> Self {
        Self {
            paths,
            search_path: Vec::new(),
            extensions: DEFAULT_SOURCE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }

    /// Create a locator for a project layout
    pub fn for_layout(layout: &ProjectLayout) -> Self {
        Self::new(ProjectPaths::from_layout(layout))
    }

    /// Create a locator for the project root of the current process
    pub fn resolved() -> Self {
        Self::new(ProjectPaths::resolve())
    }

    /// Start from an existing search path (kept in order, duplicates dropped)
    pub fn with_search_path<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for dir in dirs {
            let dir = dir.into();
            if !self.search_path.contains(&dir) {
                self.search_path.push(dir);
            }
        }
        self
    }

    /// Replace the source extensions tried for file modules
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_string())
            .collect();
        self
    }

    /// Make the project root, `modules` and `utils` searchable.
    ///
    /// Each directory is prepended only if absent, so repeated calls leave
    /// exactly one entry per directory. Directories need not exist yet.
    /// Returns `(root, modules, utils)`.
    pub fn setup_module_imports(&mut self) -> (PathBuf, PathBuf, PathBuf) {
        let (root, modules, utils) = self.paths.to_tuple();

        for dir in [&root, &modules, &utils] {
            self.prepend(dir);
        }

        (root, modules, utils)
    }

    /// Put `dir` at the front of the search path unless already present.
    ///
    /// Returns `true` if the search path changed.
    pub fn prepend(&mut self, dir: &Path) -> bool {
        if self.search_path.iter().any(|entry| entry == dir) {
            return false;
        }

        debug!(dir = %dir.display(), "prepending to module search path");
        self.search_path.insert(0, dir.to_path_buf());
        true
    }

    /// Current search path, front first
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Project paths this locator was built from
    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Source extensions tried for file modules
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Find a module on the search path.
    ///
    /// Directories are tried front to back. Within a directory, a source file
    /// with any configured extension wins over a package directory.
    pub fn locate(&self, module_name: &str) -> Result<LocatedModule, ImportError> {
        let relative = Self::module_relative_path(module_name)?;

        for dir in &self.search_path {
            let base = dir.join(&relative);

            for ext in &self.extensions {
                let candidate = base.with_extension(ext);
                if candidate.is_file() {
                    return Ok(LocatedModule {
                        name: module_name.to_string(),
                        path: candidate,
                        search_dir: dir.clone(),
                        kind: ModuleKind::File,
                    });
                }
            }

            if base.is_dir() {
                return Ok(LocatedModule {
                    name: module_name.to_string(),
                    path: base,
                    search_dir: dir.clone(),
                    kind: ModuleKind::Package,
                });
            }
        }

        Err(ImportError::ModuleNotFound {
            module: module_name.to_string(),
            searched: self.search_path.clone(),
        })
    }

    /// Convert a dotted module name to a relative path (`a.b` -> `a/b`)
    pub fn module_relative_path(module_name: &str) -> Result<PathBuf, ImportError> {
        if module_name.is_empty() {
            return Err(ImportError::invalid_name(module_name, "name is empty"));
        }

        let mut relative = PathBuf::new();
        for segment in module_name.split('.') {
            if !is_identifier(segment) {
                return Err(ImportError::invalid_name(
                    module_name,
                    format!("'{}' is not a valid identifier", segment),
                ));
            }
            relative.push(segment);
        }

        Ok(relative)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn locator_for(root: &Path) -> ModuleLocator {
        ModuleLocator::for_layout(&ProjectLayout::new(root))
    }

    #[rstest]
    #[case("inventory", "inventory")]
    #[case("modules.inventory", "modules/inventory")]
    #[case("_private.helpers_v2", "_private/helpers_v2")]
    fn test_module_relative_path(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(
            ModuleLocator::module_relative_path(name).unwrap(),
            PathBuf::from(expected)
        );
    }

    #[rstest]
    #[case("")]
    #[case("modules..inventory")]
    #[case(".inventory")]
    #[case("9lives")]
    #[case("../etc/passwd")]
    #[case("sales-report")]
    fn test_invalid_module_names(#[case] name: &str) {
        let err = ModuleLocator::module_relative_path(name).unwrap_err();
        assert!(matches!(err, ImportError::InvalidModuleName { .. }));
    }

    #[test]
    fn test_setup_returns_root_modules_utils() {
        let mut locator = locator_for(Path::new("/proj"));
        let (root, modules, utils) = locator.setup_module_imports();

        assert_eq!(root, PathBuf::from("/proj"));
        assert_eq!(modules, PathBuf::from("/proj/modules"));
        assert_eq!(utils, PathBuf::from("/proj/utils"));
        assert_eq!(
            locator.search_path(),
            &[utils.clone(), modules.clone(), root.clone()]
        );
    }

    #[test]
    fn test_setup_is_idempotent() {
        let mut locator =
            locator_for(Path::new("/proj")).with_search_path(["/usr/lib/kitchen", "/proj/utils"]);

        locator.setup_module_imports();
        let once = locator.search_path().to_vec();
        locator.setup_module_imports();

        assert_eq!(locator.search_path(), once.as_slice());
        assert_eq!(locator.search_path().len(), 4);
    }

    #[test]
    fn test_locate_prefers_file_over_package() {
        let temp_dir = TempDir::new().unwrap();
        let modules = temp_dir.path().join("modules");
        fs::create_dir_all(modules.join("sales")).unwrap();
        fs::write(modules.join("sales.py"), "").unwrap();

        let mut locator = locator_for(temp_dir.path());
        locator.setup_module_imports();

        let found = locator.locate("sales").unwrap();
        assert_eq!(found.kind, ModuleKind::File);
        assert_eq!(found.path, modules.join("sales.py"));
        assert_eq!(found.search_dir, modules);
    }

    #[test]
    fn test_locate_package_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("modules").join("meal_planning")).unwrap();

        let mut locator = locator_for(temp_dir.path());
        locator.setup_module_imports();

        let found = locator.locate("modules.meal_planning").unwrap();
        assert_eq!(found.kind, ModuleKind::Package);
        assert_eq!(found.search_dir, temp_dir.path());
    }

    #[test]
    fn test_locate_with_custom_extensions() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("utils")).unwrap();
        fs::write(temp_dir.path().join("utils").join("formatting.pyw"), "").unwrap();

        let mut locator = locator_for(temp_dir.path()).with_extensions([".pyw"]);
        locator.setup_module_imports();

        assert_eq!(locator.extensions(), ["pyw".to_string()]);
        assert!(locator.locate("formatting").is_ok());
    }

    #[test]
    fn test_locate_missing_reports_search_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut locator = locator_for(temp_dir.path());
        locator.setup_module_imports();

        match locator.locate("__definitely_missing_module__") {
            Err(ImportError::ModuleNotFound { module, searched }) => {
                assert_eq!(module, "__definitely_missing_module__");
                assert_eq!(searched, locator.search_path());
            }
            other => panic!("expected ModuleNotFound, got {:?}", other),
        }
    }
}
