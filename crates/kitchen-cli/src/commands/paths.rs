//! Paths command - show the resolved path set

use anyhow::Result;
use kitchen_config::ProjectLayout;
use kitchen_testkit::ModuleLocator;

/// Print the project root, the search directories and the data directory
pub fn run(layout: &ProjectLayout, json: bool) -> Result<()> {
    let mut locator = ModuleLocator::for_layout(layout);
    let (root, modules, utils) = locator.setup_module_imports();
    let data = layout.data_dir();

    if json {
        let value = serde_json::json!({
            "project_root": root,
            "modules_dir": modules,
            "utils_dir": utils,
            "data_dir": data,
            "search_path": locator.search_path(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("project_root: {}", root.display());
    println!("modules_dir:  {}", modules.display());
    println!("utils_dir:    {}", utils.display());
    println!("data_dir:     {}", data.display());
    println!("search_path:");
    for dir in locator.search_path() {
        let marker = if dir.is_dir() { "" } else { "  (missing)" };
        println!("  {}{}", dir.display(), marker);
    }
    Ok(())
}
