//! Process-wide configuration store
//!
//! The record is built on first access and shared, read-only, for the rest of
//! the process. Accessors hand out `'static` references, so repeated calls
//! return the same data without recomputation.

use crate::loader::ConfigLoader;
use crate::record::{PerformanceConfig, TestConfig, TimeoutConfig};
use crate::{ConfigError, ConfigResult};
use std::sync::OnceLock;
use tracing::error;

static TEST_CONFIG: OnceLock<TestConfig> = OnceLock::new();

/// Install an explicit record before anything reads the store.
///
/// Fails with [`ConfigError::AlreadyInitialized`] once the store holds a
/// record, whether it was installed here or built lazily by an accessor.
pub fn init_test_config(config: TestConfig) -> ConfigResult<&'static TestConfig> {
    config.validate()?;

    let mut installed = false;
    let stored = TEST_CONFIG.get_or_init(|| {
        installed = true;
        config
    });

    if installed {
        Ok(stored)
    } else {
        Err(ConfigError::AlreadyInitialized)
    }
}

/// The full configuration record
pub fn get_test_config() -> &'static TestConfig {
    TEST_CONFIG.get_or_init(load_or_default)
}

/// Expected data file names, in declaration order
pub fn get_data_files() -> &'static [String] {
    &get_test_config().expected_data_files
}

/// Application modules to exercise, in declaration order
pub fn get_modules_to_test() -> &'static [String] {
    &get_test_config().modules_to_test
}

/// Performance thresholds
pub fn get_performance_config() -> &'static PerformanceConfig {
    &get_test_config().performance
}

/// Timeout budgets per test category
pub fn get_timeout_config() -> &'static TimeoutConfig {
    &get_test_config().timeouts
}

/// Accessors cannot fail, so a broken overrides file degrades to defaults.
fn load_or_default() -> TestConfig {
    let loader = ConfigLoader::resolved();
    match loader.load() {
        Ok(config) => config,
        Err(err) => {
            error!(
                error = %err,
                overrides = %loader.overrides_path().display(),
                "falling back to built-in test configuration"
            );
            TestConfig::for_layout(loader.layout())
        }
    }
}
