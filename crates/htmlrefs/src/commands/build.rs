//! Rewrite command.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use htmlrefs_build::{Destination, Rewriter, Runner};
use htmlrefs_transforms::{FsSink, LesscCompiler, MemorySink};

use crate::config::load_config;
use crate::discover::discover;

/// Run the build command.
pub fn run(
    config_path: &Path,
    paths: Vec<PathBuf>,
    dest: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let file_config = load_config(config_path)?;

    let sources = if paths.is_empty() {
        file_config.files.src.clone()
    } else {
        paths
    };
    if sources.is_empty() {
        bail!(
            "No input files. Pass paths or set files.src in {}",
            config_path.display()
        );
    }

    let inputs = discover(&sources)?;
    let destination = match dest.or_else(|| file_config.files.dest.clone()) {
        Some(dir) => Destination::Directory(dir),
        None => Destination::InPlace,
    };

    tracing::info!("Rewriting {} file(s)...", inputs.len());

    let mut rewriter = Rewriter::new(file_config.rewrite_config()?);
    if let Some(lessc) = &file_config.less.compiler {
        tracing::debug!("Compiling less blocks with {}", lessc.display());
        rewriter = rewriter
            .with_compiler(LesscCompiler::new(lessc).with_args(file_config.less.args.clone()));
    }
    let runner = Runner::new(rewriter);

    let result = if dry_run {
        let mut sink = MemorySink::new();
        let result = runner.run(&inputs, &destination, &mut sink)?;
        for (path, contents) in sink.files() {
            tracing::info!("Would write {} ({} bytes)", path.display(), contents.len());
        }
        result
    } else {
        runner.run(&inputs, &destination, &mut FsSink)?
    };

    tracing::info!(
        "Rewrote {} documents ({} blocks, {} assets) in {}ms",
        result.documents,
        result.blocks,
        result.assets.len(),
        result.duration_ms
    );

    Ok(())
}
