//! Block listing command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use htmlrefs_scan::scan_blocks;

use crate::config::load_config;
use crate::discover::discover;

/// Run the scan command.
pub fn run(config_path: &Path, paths: Vec<PathBuf>) -> Result<()> {
    let sources = if paths.is_empty() {
        load_config(config_path)?.files.src
    } else {
        paths
    };
    if sources.is_empty() {
        bail!(
            "No input files. Pass paths or set files.src in {}",
            config_path.display()
        );
    }

    let mut total = 0;

    for input in discover(&sources)? {
        let content = fs::read_to_string(&input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let blocks = scan_blocks(&content).with_context(|| input.display().to_string())?;

        if blocks.is_empty() {
            continue;
        }

        println!("{}", input.display());
        for block in &blocks {
            println!(
                "  {:>4}-{:<4} {:<10} {}",
                block.start_line + 1,
                block.end_line + 1,
                block.kind,
                block.id
            );
        }
        total += blocks.len();
    }

    tracing::info!("Found {} block(s)", total);

    Ok(())
}
