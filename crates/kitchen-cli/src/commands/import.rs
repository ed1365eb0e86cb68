//! Import command - locate an application module

use anyhow::{bail, Result};
use kitchen_config::ProjectLayout;
use kitchen_testkit::{safe_import, ComponentRegistry, ModuleKind, ModuleLocator};
use std::path::PathBuf;

/// Locate `module` with the project directories plus `search_dirs`
pub fn run(
    layout: &ProjectLayout,
    module: &str,
    search_dirs: Vec<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut locator = ModuleLocator::for_layout(layout).with_search_path(search_dirs);

    // The CLI has no components to offer; it only answers "is it there"
    let registry = ComponentRegistry::new();

    match safe_import(&mut locator, &registry, module, None) {
        Ok(imported) => {
            let located = imported.module();
            if json {
                println!("{}", serde_json::to_string_pretty(located)?);
            } else {
                let kind = match located.kind {
                    ModuleKind::File => "file",
                    ModuleKind::Package => "package",
                };
                println!("{} -> {} ({})", located.name, located.path.display(), kind);
            }
            Ok(())
        }
        Err(err) => bail!("{}", err),
    }
}
