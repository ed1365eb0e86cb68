//! Kitchen Dashboard test kit
//!
//! Helpers the test harness uses to find the application under test:
//! - Resolved project paths (root, modules, utils) and the data directory
//! - A module locator holding an explicit, idempotent search path
//! - A component registry mapping stable identifiers to factories
//! - `safe_import`, which reports failures as values instead of failing
//! - A drift report comparing configured targets against the checkout

pub mod error;
pub mod import;
pub mod locator;
pub mod paths;
pub mod registry;
pub mod targets;

// Re-export main types
pub use error::{ImportError, TestkitError, TestkitResult};
pub use import::{safe_import, ImportOutcome, Imported};
pub use locator::{LocatedModule, ModuleKind, ModuleLocator, DEFAULT_SOURCE_EXTENSIONS};
pub use paths::{
    ensure_data_dir, ensure_data_dir_in, ensure_dir, get_data_dir, get_project_root, ProjectPaths,
};
pub use registry::{Component, ComponentId, ComponentRegistry};
pub use targets::{verify_targets, TargetReport, TargetStatus};
