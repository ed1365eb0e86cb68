//! Data-dir command - print and optionally create the data directory

use anyhow::Result;
use kitchen_config::ProjectLayout;
use kitchen_testkit::ensure_data_dir_in;

pub fn run(layout: &ProjectLayout, ensure: bool) -> Result<()> {
    let dir = if ensure {
        ensure_data_dir_in(layout)?
    } else {
        layout.data_dir()
    };

    println!("{}", dir.display());
    Ok(())
}
