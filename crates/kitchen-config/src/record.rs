//! Test Configuration Record
//!
//! The fixed-shape record describing what the Kitchen Dashboard test suite
//! exercises and how long it may take doing so.

use crate::layout::ProjectLayout;
use crate::{ConfigError, ConfigResult};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Report formats the harness knows how to emit
const REPORT_FORMATS: &[&str] = &["console", "json", "junit", "html"];

/// Full test configuration record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TestConfig {
    /// Resolved project root; every other path derives from it
    pub project_root: PathBuf,

    /// Application data directory (`<root>/data`)
    pub data_dir: PathBuf,

    /// Log directory (`<root>/logs`)
    pub logs_dir: PathBuf,

    /// Test directory (`<root>/tests`)
    pub tests_dir: PathBuf,

    /// Number of sample records to generate, by dataset
    pub sample_data: BTreeMap<String, u64>,

    /// Performance thresholds
    pub performance: PerformanceConfig,

    /// Timeout budget per test category
    pub timeouts: TimeoutConfig,

    /// Test categories, in execution order
    pub test_categories: Vec<String>,

    /// Application modules under test
    pub modules_to_test: Vec<String>,

    /// Data files the application expects under `data_dir`
    pub expected_data_files: Vec<String>,

    /// Report output settings
    pub reporting: ReportingConfig,
}

/// Performance thresholds
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PerformanceConfig {
    /// Row count for large-dataset tests
    pub large_dataset_size: u64,

    /// Iterations per benchmark
    pub benchmark_iterations: u64,

    /// Iterations per stress test
    pub stress_test_iterations: u64,

    /// Memory ceiling in megabytes
    pub memory_limit_mb: u64,

    /// Maximum execution time of a single operation, in seconds
    pub max_execution_time_secs: u64,

    /// Application startup ceiling, in seconds
    pub startup_time_limit_secs: u64,
}

/// Timeout budgets in seconds, keyed by test category
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct TimeoutConfig {
    budgets: BTreeMap<String, u64>,
}

/// Report output settings
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportingConfig {
    /// Directory reports are written to (`<tests_dir>/reports`)
    pub reports_dir: PathBuf,

    /// Output formats
    pub formats: Vec<String>,

    /// Failures listed in full before the report truncates
    pub max_failures_listed: u64,

    /// Include per-test timings
    pub include_timings: bool,
}

impl TestConfig {
    /// Built-in defaults for the given layout
    pub fn for_layout(layout: &ProjectLayout) -> Self {
        let tests_dir = layout.tests_dir();

        Self {
            project_root: layout.root().to_path_buf(),
            data_dir: layout.data_dir(),
            logs_dir: layout.logs_dir(),
            reporting: ReportingConfig {
                reports_dir: tests_dir.join("reports"),
                formats: strings(&["console", "json"]),
                max_failures_listed: 20,
                include_timings: true,
            },
            tests_dir,
            sample_data: counts(&[
                ("inventory_items", 50),
                ("sales_records", 100),
                ("recipes", 20),
                ("shopping_items", 30),
                ("budget_entries", 12),
            ]),
            performance: PerformanceConfig::default(),
            timeouts: TimeoutConfig::from_iter([
                ("unit", 30),
                ("integration", 60),
                ("performance", 300),
                ("ui", 120),
                ("data_validation", 45),
            ]),
            test_categories: strings(&[
                "unit",
                "integration",
                "performance",
                "ui",
                "data_validation",
            ]),
            modules_to_test: strings(&[
                "inventory",
                "sales",
                "meal_planning",
                "shopping_list",
                "budget",
                "reports",
                "settings",
            ]),
            expected_data_files: strings(&[
                "inventory.csv",
                "sales.csv",
                "recipes.csv",
                "items.csv",
                "shopping_list.csv",
                "budget.csv",
                "waste.csv",
                "cleaning_maintenance.csv",
            ]),
        }
    }

    /// Built-in defaults for a project rooted at `root`
    pub fn for_project_root(root: impl Into<PathBuf>) -> Self {
        Self::for_layout(&ProjectLayout::new(root))
    }

    /// Names of the fixed top-level keys, in declaration order
    pub const KEYS: [&'static str; 11] = [
        "project_root",
        "data_dir",
        "logs_dir",
        "tests_dir",
        "sample_data",
        "performance",
        "timeouts",
        "test_categories",
        "modules_to_test",
        "expected_data_files",
        "reporting",
    ];

    /// Validate the record
    pub fn validate(&self) -> ConfigResult<()> {
        let layout = ProjectLayout::new(&self.project_root);
        validate_derived_path("data_dir", &self.data_dir, &layout.data_dir())?;
        validate_derived_path("logs_dir", &self.logs_dir, &layout.logs_dir())?;
        validate_derived_path("tests_dir", &self.tests_dir, &layout.tests_dir())?;
        validate_derived_path(
            "reporting.reports_dir",
            &self.reporting.reports_dir,
            &self.tests_dir.join("reports"),
        )?;

        for (name, count) in &self.sample_data {
            validate_positive(&format!("sample_data.{}", name), *count)?;
        }

        self.performance.validate()?;

        for (category, seconds) in self.timeouts.iter() {
            validate_positive(&format!("timeouts.{}", category), seconds)?;
        }

        validate_names("test_categories", &self.test_categories)?;
        validate_names("modules_to_test", &self.modules_to_test)?;
        validate_names("expected_data_files", &self.expected_data_files)?;

        // Every category needs a budget the harness can enforce
        for category in &self.test_categories {
            if self.timeouts.seconds_for(category).is_none() {
                return Err(ConfigError::MissingTimeout {
                    category: category.clone(),
                });
            }
        }

        self.reporting.validate()
    }
}

impl PerformanceConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive("performance.large_dataset_size", self.large_dataset_size)?;
        validate_positive("performance.benchmark_iterations", self.benchmark_iterations)?;
        validate_positive(
            "performance.stress_test_iterations",
            self.stress_test_iterations,
        )?;
        validate_positive("performance.memory_limit_mb", self.memory_limit_mb)?;
        validate_positive(
            "performance.max_execution_time_secs",
            self.max_execution_time_secs,
        )?;
        validate_positive(
            "performance.startup_time_limit_secs",
            self.startup_time_limit_secs,
        )
    }

    /// Maximum execution time as a duration
    pub fn max_execution_time(&self) -> Duration {
        Duration::from_secs(self.max_execution_time_secs)
    }

    /// Startup ceiling as a duration
    pub fn startup_time_limit(&self) -> Duration {
        Duration::from_secs(self.startup_time_limit_secs)
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            large_dataset_size: 10_000,
            benchmark_iterations: 100,
            stress_test_iterations: 1_000,
            memory_limit_mb: 500,
            max_execution_time_secs: 30,
            startup_time_limit_secs: 10,
        }
    }
}

impl TimeoutConfig {
    /// Budget in seconds for a category
    pub fn seconds_for(&self, category: &str) -> Option<u64> {
        self.budgets.get(category).copied()
    }

    /// Budget for a category as a duration
    pub fn timeout_for(&self, category: &str) -> Option<Duration> {
        self.seconds_for(category).map(Duration::from_secs)
    }

    /// Set or replace the budget for a category
    pub fn set(&mut self, category: impl Into<String>, seconds: u64) {
        self.budgets.insert(category.into(), seconds);
    }

    /// Iterate over `(category, seconds)` in category order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.budgets.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for TimeoutConfig {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self {
            budgets: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl ReportingConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive("reporting.max_failures_listed", self.max_failures_listed)?;
        validate_names("reporting.formats", &self.formats)?;

        for format in &self.formats {
            if !REPORT_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "reporting.formats".to_string(),
                    reason: format!(
                        "unknown format '{}', expected one of: {}",
                        format,
                        REPORT_FORMATS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn counts(items: &[(&str, u64)]) -> BTreeMap<String, u64> {
    items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn validate_positive(field: &str, value: u64) -> ConfigResult<()> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// Entries must be non-empty and unique
fn validate_names(field: &str, names: &[String]) -> ConfigResult<()> {
    let mut seen = HashSet::new();

    for name in names {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: "entries cannot be empty".to_string(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: format!("duplicate entry '{}'", name),
            });
        }
    }

    Ok(())
}

fn validate_derived_path(field: &str, actual: &Path, expected: &Path) -> ConfigResult<()> {
    if actual != expected {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!(
                "expected {} to match the project layout, got {}",
                expected.display(),
                actual.display()
            ),
        });
    }
    Ok(())
}
