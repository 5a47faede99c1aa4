//! Batch runner: rewrites a list of documents one after another.

use std::path::{Path, PathBuf};
use std::time::Instant;

use htmlrefs_transforms::OutputSink;

use crate::rewriter::{RewriteError, Rewriter};

/// Where rewritten documents go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    /// Overwrite each input file
    #[default]
    InPlace,

    /// Write `<dir>/<basename of input>`
    Directory(PathBuf),
}

impl Destination {
    /// Output path for an input document.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        match self {
            Self::InPlace => input.to_path_buf(),
            Self::Directory(dir) => match input.file_name() {
                Some(name) => dir.join(name),
                None => dir.join(input),
            },
        }
    }
}

/// Result of a run.
#[derive(Debug, Default)]
pub struct RunResult {
    /// Number of documents written
    pub documents: usize,

    /// Number of blocks replaced across all documents
    pub blocks: usize,

    /// Assets written by css/less blocks
    pub assets: Vec<PathBuf>,

    /// Documents written, in processing order
    pub outputs: Vec<PathBuf>,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

/// Rewrites documents in order, stopping at the first error.
pub struct Runner {
    rewriter: Rewriter,
}

impl Runner {
    pub fn new(rewriter: Rewriter) -> Self {
        Self { rewriter }
    }

    /// Rewrite every document in `inputs` and write it to `destination`.
    pub fn run(
        &self,
        inputs: &[PathBuf],
        destination: &Destination,
        sink: &mut dyn OutputSink,
    ) -> Result<RunResult, RewriteError> {
        let start = Instant::now();
        let mut result = RunResult::default();

        for input in inputs {
            let output = destination.output_path(input);
            let rewritten = self.rewriter.process_file(input, &output, sink)?;

            tracing::info!(
                "Rewrote {} -> {} ({} blocks)",
                input.display(),
                output.display(),
                rewritten.blocks
            );

            result.documents += 1;
            result.blocks += rewritten.blocks;
            result.assets.extend(rewritten.assets);
            result.outputs.push(output);
        }

        result.duration_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }
}
