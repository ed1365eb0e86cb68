//! Store fallback on a broken overrides file
//!
//! Lives in its own test binary: the store must first be read while
//! `KITCHEN_PROJECT_ROOT` points at a checkout with a malformed
//! `tests/test_config.toml`.

use kitchen_config::{
    get_modules_to_test, get_performance_config, get_test_config, get_timeout_config,
    ConfigError, ConfigLoader, PerformanceConfig, TestConfig, PROJECT_ROOT_ENV,
};
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_broken_overrides_fall_back_to_defaults() {
    let project = TempDir::new().unwrap();
    let tests_dir = project.path().join("tests");
    fs::create_dir_all(&tests_dir).unwrap();
    fs::write(
        tests_dir.join("test_config.toml"),
        "[performance]\nmemory_limit_mb = \"lots\"\n",
    )
    .unwrap();

    env::set_var(PROJECT_ROOT_ENV, project.path());

    // The fallible path reports the problem
    let err = ConfigLoader::resolved().load().unwrap_err();
    assert!(matches!(err, ConfigError::TomlParseError { .. }));

    // The store degrades to defaults for the same root
    let config = get_test_config();
    assert_eq!(config, &TestConfig::for_project_root(project.path()));
    assert!(config.validate().is_ok());

    assert_eq!(get_performance_config().memory_limit_mb, 500);
    assert_eq!(get_performance_config(), &PerformanceConfig::default());
    assert_eq!(get_timeout_config().seconds_for("performance"), Some(300));
    assert_eq!(get_modules_to_test().len(), 7);

    env::remove_var(PROJECT_ROOT_ENV);
}
