pub mod config;
pub mod data_dir;
pub mod import;
pub mod paths;
pub mod verify;

use anyhow::{Context, Result};
use kitchen_config::{ConfigLoader, ProjectLayout, TestConfig};

/// Build the configuration record for `layout`, surfacing override errors
pub(crate) fn load_config(layout: &ProjectLayout) -> Result<TestConfig> {
    let loader = ConfigLoader::new(layout.clone());
    loader.load().with_context(|| {
        format!(
            "Failed to load test configuration for {}",
            layout.root().display()
        )
    })
}
