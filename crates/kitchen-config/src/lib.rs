//! Kitchen Dashboard Test Configuration
//!
//! Provides the read-only settings registry consulted by the Kitchen Dashboard
//! test suite:
//! - Project layout resolution (root, data, logs, tests, modules, utils)
//! - The configuration record (sample data volumes, performance thresholds,
//!   timeouts, modules and data files under test, reporting)
//! - Optional overrides (`tests/test_config.toml`, `KITCHEN_TEST_*`)
//! - A process-wide store with named accessors
//!
//! # Configuration Hierarchy
//!
//! The record is built once, in the following order (later overrides earlier):
//! 1. Built-in defaults derived from the project root
//! 2. Overrides file (`<tests_dir>/test_config.toml`)
//! 3. Environment variables (`KITCHEN_TEST_*`)
//!
//! # Example
//!
//! ```no_run
//! use kitchen_config::{get_performance_config, get_test_config};
//!
//! let config = get_test_config();
//! println!("data lives in {}", config.data_dir.display());
//! assert!(get_performance_config().memory_limit_mb > 0);
//! ```

pub mod layout;
pub mod loader;
pub mod record;
pub mod store;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Test category '{category}' has no timeout budget")]
    MissingTimeout { category: String },

    #[error("Cannot derive a project root from {0}")]
    InvalidRoot(PathBuf),

    #[error("Test configuration has already been initialized")]
    AlreadyInitialized,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use layout::{ProjectLayout, PROJECT_ROOT_ENV};
pub use loader::{ConfigLoader, ConfigOverrides, OVERRIDES_FILE_NAME};
pub use record::{PerformanceConfig, ReportingConfig, TestConfig, TimeoutConfig};
pub use store::{
    get_data_files, get_modules_to_test, get_performance_config, get_test_config,
    get_timeout_config, init_test_config,
};
