//! Config command - show the effective test configuration

use anyhow::Result;
use kitchen_config::{ProjectLayout, TestConfig};
use std::fmt::{self, Write};

/// Print the configuration record for `layout`
pub fn run(layout: &ProjectLayout, json: bool) -> Result<()> {
    let config = super::load_config(layout)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", render(&config)?);
    }
    Ok(())
}

/// Human-readable listing, one key per line, nested maps indented
fn render(config: &TestConfig) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let perf = &config.performance;
    let reporting = &config.reporting;

    writeln!(out, "project_root: {}", config.project_root.display())?;
    writeln!(out, "data_dir: {}", config.data_dir.display())?;
    writeln!(out, "logs_dir: {}", config.logs_dir.display())?;
    writeln!(out, "tests_dir: {}", config.tests_dir.display())?;

    writeln!(out, "sample_data:")?;
    for (name, count) in &config.sample_data {
        writeln!(out, "  {}: {}", name, count)?;
    }

    writeln!(out, "performance:")?;
    writeln!(out, "  large_dataset_size: {}", perf.large_dataset_size)?;
    writeln!(out, "  benchmark_iterations: {}", perf.benchmark_iterations)?;
    writeln!(out, "  stress_test_iterations: {}", perf.stress_test_iterations)?;
    writeln!(out, "  memory_limit_mb: {}", perf.memory_limit_mb)?;
    writeln!(out, "  max_execution_time_secs: {}", perf.max_execution_time_secs)?;
    writeln!(out, "  startup_time_limit_secs: {}", perf.startup_time_limit_secs)?;

    writeln!(out, "timeouts:")?;
    for (category, seconds) in config.timeouts.iter() {
        writeln!(out, "  {}: {}s", category, seconds)?;
    }

    writeln!(out, "test_categories: {}", config.test_categories.join(", "))?;
    writeln!(out, "modules_to_test: {}", config.modules_to_test.join(", "))?;
    writeln!(
        out,
        "expected_data_files: {}",
        config.expected_data_files.join(", ")
    )?;

    writeln!(out, "reporting:")?;
    writeln!(out, "  reports_dir: {}", reporting.reports_dir.display())?;
    writeln!(out, "  formats: {}", reporting.formats.join(", "))?;
    writeln!(out, "  max_failures_listed: {}", reporting.max_failures_listed)?;
    writeln!(out, "  include_timings: {}", reporting.include_timings)?;

    Ok(out)
}
