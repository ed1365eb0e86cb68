//! Verify command - compare configured targets with the checkout

use anyhow::{bail, Result};
use colored::*;
use kitchen_config::ProjectLayout;
use kitchen_testkit::{verify_targets, ModuleLocator, TargetStatus};

/// Print which configured modules and data files exist.
///
/// With `strict`, any missing target fails the command.
pub fn run(layout: &ProjectLayout, strict: bool, json: bool) -> Result<()> {
    let config = super::load_config(layout)?;
    let mut locator = ModuleLocator::for_layout(layout);
    let report = verify_targets(&config, &mut locator);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_section("Modules", &report.modules);
        println!();
        print_section("Data files", &report.data_files);
        println!();

        let missing = report.missing_modules().len() + report.missing_data_files().len();
        let total = report.modules.len() + report.data_files.len();
        if missing == 0 {
            println!("{}", format!("All {} targets present", total).green());
        } else {
            println!(
                "{}",
                format!("{} of {} targets missing", missing, total).yellow()
            );
        }
    }

    if strict && !report.is_complete() {
        bail!(
            "missing modules: [{}]; missing data files: [{}]",
            report.missing_modules().join(", "),
            report.missing_data_files().join(", ")
        );
    }

    Ok(())
}

fn print_section(title: &str, statuses: &[TargetStatus]) {
    println!("{}", title.bold());
    for status in statuses {
        match &status.path {
            Some(path) => println!("  {} {} ({})", "✓".green(), status.name, path.display()),
            None => println!("  {} {} (missing)", "✗".red(), status.name),
        }
    }
}
