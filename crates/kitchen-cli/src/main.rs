use anyhow::Result;
use clap::builder::FalseyValueParser;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use kitchen_config::ProjectLayout;
use std::io;
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod logging;

/// Kitchen Dashboard test kit.
///
/// Inspects the test configuration and locates the application modules the
/// test suite exercises.
///
/// EXAMPLES:
///     kitchen-tests config               Show the effective test configuration
///     kitchen-tests paths                Show the resolved project paths
///     kitchen-tests import inventory     Check that a module can be found
///     kitchen-tests verify --strict      Fail if configured targets are missing
///     kitchen-tests data-dir --ensure    Create the data directory
///
/// ENVIRONMENT VARIABLES:
///     KITCHEN_PROJECT_ROOT              Project root (same as --root)
///     KITCHEN_JSON                      Set to '1' or 'true' for JSON output by default
///     KITCHEN_TEST_MEMORY_LIMIT_MB      Override the memory ceiling
///     KITCHEN_TEST_MAX_EXECUTION_SECS   Override the execution time ceiling
///     KITCHEN_TEST_LARGE_DATASET_SIZE   Override the large dataset size
///     RUST_LOG                          Diagnostic filter (default: warn)
#[derive(Parser)]
#[command(name = "kitchen-tests")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Project root (defaults to the kit's compiled-in anchor)
    #[arg(long, global = true, env = "KITCHEN_PROJECT_ROOT")]
    root: Option<PathBuf>,

    /// Verbose diagnostics
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective test configuration
    ///
    /// Built from defaults, tests/test_config.toml and KITCHEN_TEST_*
    /// variables, in that order.
    ///
    /// EXAMPLES:
    ///     kitchen-tests config           Human-readable listing
    ///     kitchen-tests config --json    Full record as JSON
    #[command(visible_alias = "c")]
    Config {
        /// Output as JSON
        #[arg(long, env = "KITCHEN_JSON", value_parser = FalseyValueParser::new())]
        json: bool,
    },

    /// Show the resolved project root, modules and utils directories
    Paths {
        /// Output as JSON
        #[arg(long, env = "KITCHEN_JSON", value_parser = FalseyValueParser::new())]
        json: bool,
    },

    /// Locate an application module on the search path
    ///
    /// Exits with status 1 when the module cannot be found.
    ///
    /// EXAMPLES:
    ///     kitchen-tests import inventory
    ///     kitchen-tests import modules.meal_planning
    #[command(visible_alias = "i")]
    Import {
        /// Dotted module name
        module: String,
        /// Additional search directories, searched after the project ones
        #[arg(long = "search-dir", short = 'I')]
        search_dirs: Vec<PathBuf>,
        /// Output as JSON
        #[arg(long, env = "KITCHEN_JSON", value_parser = FalseyValueParser::new())]
        json: bool,
    },

    /// Check configured modules and data files against the checkout
    ///
    /// EXAMPLES:
    ///     kitchen-tests verify            Report missing targets
    ///     kitchen-tests verify --strict   Exit 1 if anything is missing
    Verify {
        /// Exit with status 1 if any target is missing
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long, env = "KITCHEN_JSON", value_parser = FalseyValueParser::new())]
        json: bool,
    },

    /// Print the data directory
    DataDir {
        /// Create the directory if it does not exist
        #[arg(long)]
        ensure: bool,
    },

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     kitchen-tests completions bash > /etc/bash_completion.d/kitchen-tests
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let layout = project_layout(cli.root)?;

    match cli.command {
        Commands::Config { json } => commands::config::run(&layout, json)?,
        Commands::Paths { json } => commands::paths::run(&layout, json)?,
        Commands::Import {
            module,
            search_dirs,
            json,
        } => commands::import::run(&layout, &module, search_dirs, json)?,
        Commands::Verify { strict, json } => commands::verify::run(&layout, strict, json)?,
        Commands::DataDir { ensure } => commands::data_dir::run(&layout, ensure)?,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "kitchen-tests", &mut io::stdout());
        }
    }

    Ok(())
}

/// `--root` (or `KITCHEN_PROJECT_ROOT`) wins; a relative root is taken from
/// the working directory once, here
fn project_layout(root: Option<PathBuf>) -> Result<ProjectLayout> {
    let layout = match root {
        Some(root) if root.as_os_str().is_empty() => ProjectLayout::resolve(),
        Some(root) if root.is_relative() => {
            ProjectLayout::new(std::env::current_dir()?.join(root))
        }
        Some(root) => ProjectLayout::new(root),
        None => ProjectLayout::resolve(),
    };
    debug!(root = %layout.root().display(), "using project layout");
    Ok(layout)
}
