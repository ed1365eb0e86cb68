//! Configuration Loader
//!
//! Builds the test configuration record with proper precedence:
//! 1. Built-in defaults for the project layout - lowest priority
//! 2. Overrides file (`<tests_dir>/test_config.toml`) - overrides defaults
//! 3. Environment variables (`KITCHEN_TEST_*`) - overrides the file

use crate::layout::ProjectLayout;
use crate::record::TestConfig;
use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the optional overrides file inside the tests directory
pub const OVERRIDES_FILE_NAME: &str = "test_config.toml";

const ENV_MEMORY_LIMIT_MB: &str = "KITCHEN_TEST_MEMORY_LIMIT_MB";
const ENV_MAX_EXECUTION_SECS: &str = "KITCHEN_TEST_MAX_EXECUTION_SECS";
const ENV_LARGE_DATASET_SIZE: &str = "KITCHEN_TEST_LARGE_DATASET_SIZE";

/// Partial configuration read from the overrides file.
///
/// Every field is optional. Maps merge key by key into the defaults; lists
/// replace the default list wholesale. Paths are not overridable here since
/// they always derive from the project root.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub sample_data: BTreeMap<String, u64>,

    pub performance: Option<PerformanceOverrides>,

    #[serde(default)]
    pub timeouts: BTreeMap<String, u64>,

    pub test_categories: Option<Vec<String>>,

    pub modules_to_test: Option<Vec<String>>,

    pub expected_data_files: Option<Vec<String>>,

    pub reporting: Option<ReportingOverrides>,
}

/// Performance threshold overrides
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct PerformanceOverrides {
    pub large_dataset_size: Option<u64>,
    pub benchmark_iterations: Option<u64>,
    pub stress_test_iterations: Option<u64>,
    pub memory_limit_mb: Option<u64>,
    pub max_execution_time_secs: Option<u64>,
    pub startup_time_limit_secs: Option<u64>,
}

/// Reporting overrides
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ReportingOverrides {
    pub formats: Option<Vec<String>>,
    pub max_failures_listed: Option<u64>,
    pub include_timings: Option<bool>,
}

impl ConfigOverrides {
    /// Load overrides from a TOML file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })
    }

    /// Apply these overrides on top of `config`
    pub fn apply(&self, config: &mut TestConfig) {
        config
            .sample_data
            .extend(self.sample_data.iter().map(|(k, v)| (k.clone(), *v)));

        for (category, seconds) in &self.timeouts {
            config.timeouts.set(category.clone(), *seconds);
        }

        if let Some(perf) = &self.performance {
            let target = &mut config.performance;
            set_if_some(&mut target.large_dataset_size, perf.large_dataset_size);
            set_if_some(&mut target.benchmark_iterations, perf.benchmark_iterations);
            set_if_some(&mut target.stress_test_iterations, perf.stress_test_iterations);
            set_if_some(&mut target.memory_limit_mb, perf.memory_limit_mb);
            set_if_some(&mut target.max_execution_time_secs, perf.max_execution_time_secs);
            set_if_some(&mut target.startup_time_limit_secs, perf.startup_time_limit_secs);
        }

        if let Some(categories) = &self.test_categories {
            config.test_categories = categories.clone();
        }
        if let Some(modules) = &self.modules_to_test {
            config.modules_to_test = modules.clone();
        }
        if let Some(files) = &self.expected_data_files {
            config.expected_data_files = files.clone();
        }

        if let Some(reporting) = &self.reporting {
            if let Some(formats) = &reporting.formats {
                config.reporting.formats = formats.clone();
            }
            set_if_some(
                &mut config.reporting.max_failures_listed,
                reporting.max_failures_listed,
            );
            set_if_some(
                &mut config.reporting.include_timings,
                reporting.include_timings,
            );
        }
    }
}

/// Configuration loader
pub struct ConfigLoader {
    layout: ProjectLayout,
}

impl ConfigLoader {
    /// Create a loader for the given project layout
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    /// Create a loader for the layout of the current process
    pub fn resolved() -> Self {
        Self::new(ProjectLayout::resolve())
    }

    /// The layout this loader builds paths from
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Location of the optional overrides file
    pub fn overrides_path(&self) -> PathBuf {
        self.layout.tests_dir().join(OVERRIDES_FILE_NAME)
    }

    /// Build the configuration record.
    ///
    /// The overrides file is optional; when absent only defaults and
    /// environment variables apply.
    pub fn load(&self) -> ConfigResult<TestConfig> {
        let path = self.overrides_path();
        if path.exists() {
            let overrides = ConfigOverrides::load_from_file(&path)?;
            self.build(Some((&overrides, &path)))
        } else {
            self.build(None)
        }
    }

    /// Build the configuration record from a specific overrides file.
    ///
    /// Unlike [`ConfigLoader::load`], the file must exist.
    pub fn load_from_file(&self, overrides_path: &Path) -> ConfigResult<TestConfig> {
        let overrides = ConfigOverrides::load_from_file(overrides_path)?;
        self.build(Some((&overrides, overrides_path)))
    }

    fn build(&self, overrides: Option<(&ConfigOverrides, &Path)>) -> ConfigResult<TestConfig> {
        let mut config = TestConfig::for_layout(&self.layout);

        if let Some((overrides, source)) = overrides {
            overrides.apply(&mut config);
            debug!(file = %source.display(), "applied test configuration overrides");
        }

        self.apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Variables follow the pattern `KITCHEN_TEST_<KEY>`.
    /// Example: `KITCHEN_TEST_MEMORY_LIMIT_MB=1024`
    fn apply_env_overrides(&self, config: &mut TestConfig) -> ConfigResult<()> {
        if let Some(limit) = env_u64(ENV_MEMORY_LIMIT_MB)? {
            config.performance.memory_limit_mb = limit;
        }

        if let Some(secs) = env_u64(ENV_MAX_EXECUTION_SECS)? {
            config.performance.max_execution_time_secs = secs;
        }

        if let Some(size) = env_u64(ENV_LARGE_DATASET_SIZE)? {
            config.performance.large_dataset_size = size;
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::resolved()
    }
}

fn set_if_some<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Read a numeric environment variable; unset or blank means "no override"
fn env_u64(name: &str) -> ConfigResult<Option<u64>> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidValue {
                    field: name.to_string(),
                    reason: format!("'{}' is not a whole number: {}", raw, e),
                })
        }
        _ => Ok(None),
    }
}
