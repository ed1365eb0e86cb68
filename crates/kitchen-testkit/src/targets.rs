//! Target drift report
//!
//! `modules_to_test` and `expected_data_files` are maintained by hand. This
//! report shows which of them the checkout actually provides; whether a gap
//! fails the run is left to the harness.

use crate::locator::ModuleLocator;
use kitchen_config::TestConfig;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Whether one configured target was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetStatus {
    pub name: String,
    /// Where it was found; `None` when missing
    pub path: Option<PathBuf>,
}

impl TargetStatus {
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}

/// Configured targets checked against the filesystem, in configuration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct TargetReport {
    pub modules: Vec<TargetStatus>,
    pub data_files: Vec<TargetStatus>,
}

impl TargetReport {
    pub fn missing_modules(&self) -> Vec<&str> {
        missing(&self.modules)
    }

    pub fn missing_data_files(&self) -> Vec<&str> {
        missing(&self.data_files)
    }

    /// True when every configured target exists
    pub fn is_complete(&self) -> bool {
        self.modules.iter().all(TargetStatus::is_found)
            && self.data_files.iter().all(TargetStatus::is_found)
    }
}

/// Check every configured module and data file
pub fn verify_targets(config: &TestConfig, locator: &mut ModuleLocator) -> TargetReport {
    locator.setup_module_imports();

    let modules = config
        .modules_to_test
        .iter()
        .map(|name| TargetStatus {
            name: name.clone(),
            path: locator.locate(name).ok().map(|module| module.path),
        })
        .collect();

    let data_files = config
        .expected_data_files
        .iter()
        .map(|name| {
            let path = config.data_dir.join(name);
            TargetStatus {
                name: name.clone(),
                path: path.is_file().then_some(path),
            }
        })
        .collect();

    let report = TargetReport {
        modules,
        data_files,
    };
    debug!(
        missing_modules = report.missing_modules().len(),
        missing_data_files = report.missing_data_files().len(),
        "verified test targets"
    );
    report
}

fn missing(statuses: &[TargetStatus]) -> Vec<&str> {
    statuses
        .iter()
        .filter(|status| !status.is_found())
        .map(|status| status.name.as_str())
        .collect()
}
