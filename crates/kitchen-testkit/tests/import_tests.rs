//! Module location and best-effort import tests

use kitchen_config::{ProjectLayout, TestConfig};
use kitchen_testkit::{
    safe_import, verify_targets, ComponentRegistry, ImportError, Imported, ModuleKind,
    ModuleLocator,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch Kitchen Dashboard checkout
fn kitchen_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::create_dir_all(root.join("modules").join("meal_planning")).unwrap();
    fs::create_dir_all(root.join("utils")).unwrap();
    fs::create_dir_all(root.join("data")).unwrap();

    fs::write(root.join("modules").join("inventory.py"), "").unwrap();
    fs::write(root.join("modules").join("sales.py"), "").unwrap();
    fs::write(root.join("modules").join("meal_planning").join("__init__.py"), "").unwrap();
    fs::write(root.join("utils").join("formatting.py"), "").unwrap();
    fs::write(root.join("data").join("inventory.csv"), "id,name,qty\n").unwrap();

    temp_dir
}

fn locator_for(root: &Path) -> ModuleLocator {
    ModuleLocator::for_layout(&ProjectLayout::new(root))
}

fn count(search_path: &[PathBuf], dir: &Path) -> usize {
    search_path.iter().filter(|entry| entry.as_path() == dir).count()
}

// ============================================================================
// safe_import
// ============================================================================

#[rstest]
#[case("inventory", ModuleKind::File)]
#[case("sales", ModuleKind::File)]
#[case("meal_planning", ModuleKind::Package)]
#[case("formatting", ModuleKind::File)]
#[case("modules.inventory", ModuleKind::File)]
fn test_present_modules_import(#[case] name: &str, #[case] kind: ModuleKind) {
    let project = kitchen_project();
    let mut locator = locator_for(project.path());

    let imported = safe_import(&mut locator, &ComponentRegistry::new(), name, None).unwrap();

    assert!(matches!(imported, Imported::Module(_)));
    assert_eq!(imported.module().name, name);
    assert_eq!(imported.module().kind, kind);
}

#[test]
fn test_missing_module_is_a_value() {
    let project = kitchen_project();
    let mut locator = locator_for(project.path());

    let outcome = safe_import(
        &mut locator,
        &ComponentRegistry::new(),
        "__definitely_missing_module__",
        None,
    );

    match outcome {
        Err(ImportError::ModuleNotFound { module, searched }) => {
            assert_eq!(module, "__definitely_missing_module__");
            assert_eq!(searched.len(), 3);
        }
        other => panic!("expected ModuleNotFound, got {:?}", other),
    }
}

#[test]
fn test_invalid_name_is_a_value() {
    let project = kitchen_project();
    let mut locator = locator_for(project.path());

    let err = safe_import(&mut locator, &ComponentRegistry::new(), "../data", None).unwrap_err();
    assert!(matches!(err, ImportError::InvalidModuleName { .. }));
    assert_eq!(err.module(), "../data");
}

#[test]
fn test_component_lookup_through_registry() {
    #[derive(Debug, PartialEq)]
    struct SalesReport {
        currency: &'static str,
    }

    let project = kitchen_project();
    let mut locator = locator_for(project.path());
    let mut registry = ComponentRegistry::new();
    registry.register("sales", "SalesReport", || SalesReport { currency: "EUR" });

    let imported = safe_import(&mut locator, &registry, "sales", Some("SalesReport")).unwrap();
    let report = imported.component().unwrap().create::<SalesReport>();
    assert_eq!(report, Some(SalesReport { currency: "EUR" }));

    let missing = safe_import(&mut locator, &registry, "sales", Some("SalesForecast"));
    assert_eq!(
        missing.unwrap_err(),
        ImportError::component_not_found("sales", "SalesForecast")
    );
}

#[test]
fn test_earlier_search_entries_win() {
    let project = kitchen_project();
    // utils is searched before modules after setup
    fs::write(project.path().join("utils").join("inventory.py"), "").unwrap();

    let mut locator = locator_for(project.path());
    let imported = safe_import(&mut locator, &ComponentRegistry::new(), "inventory", None).unwrap();

    assert_eq!(imported.module().search_dir, project.path().join("utils"));
}

#[test]
fn test_module_may_appear_after_setup() {
    let project = TempDir::new().unwrap();
    let mut locator = locator_for(project.path());

    // Directories need not exist when registered
    locator.setup_module_imports();
    assert!(safe_import(&mut locator, &ComponentRegistry::new(), "budget", None).is_err());

    fs::create_dir_all(project.path().join("modules")).unwrap();
    fs::write(project.path().join("modules").join("budget.py"), "").unwrap();
    assert!(safe_import(&mut locator, &ComponentRegistry::new(), "budget", None).is_ok());
}

// ============================================================================
// Search path idempotence
// ============================================================================

#[test]
fn test_setup_twice_leaves_one_entry_each() {
    let mut locator = locator_for(Path::new("/proj"));

    let first = locator.setup_module_imports();
    let second = locator.setup_module_imports();
    assert_eq!(first, second);

    let (root, modules, utils) = first;
    for dir in [&root, &modules, &utils] {
        assert_eq!(count(locator.search_path(), dir), 1);
    }
}

proptest! {
    #[test]
    fn prop_setup_never_duplicates(
        calls in 1usize..8,
        inherited in prop::collection::vec("/[a-z]{1,6}", 0..5),
    ) {
        let mut locator = locator_for(Path::new("/proj")).with_search_path(inherited.clone());
        let before = locator.search_path().len();

        for _ in 0..calls {
            locator.setup_module_imports();
        }

        for dir in locator.paths().dirs() {
            prop_assert_eq!(count(locator.search_path(), dir), 1);
        }
        for entry in locator.search_path() {
            prop_assert_eq!(count(locator.search_path(), entry), 1);
        }
        prop_assert!(locator.search_path().len() <= before + 3);
    }
}

// ============================================================================
// Target drift
// ============================================================================

#[test]
fn test_verify_targets_reports_drift() {
    let project = kitchen_project();
    let layout = ProjectLayout::new(project.path());
    let config = TestConfig::for_layout(&layout);

    let report = verify_targets(&config, &mut ModuleLocator::for_layout(&layout));

    assert_eq!(
        report.missing_modules(),
        vec!["shopping_list", "budget", "reports", "settings"]
    );
    assert_eq!(report.modules.len(), config.modules_to_test.len());
    assert!(report.data_files[0].is_found());
    assert_eq!(report.missing_data_files().len(), config.expected_data_files.len() - 1);
    assert!(!report.is_complete());
}
