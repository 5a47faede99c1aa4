//! Document rewriter: substitutes every block of a document with its rendered replacement.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use htmlrefs_scan::{scan_blocks, Block, LineEnding, ScanError};
use htmlrefs_transforms::{
    Includes, LightningCompiler, Options, OutputSink, StylesheetCompiler, TemplateEngine,
    TransformContext, TransformError, TransformRegistry,
};

/// Inputs shared by every document of a run.
#[derive(Debug, Clone)]
pub struct RewriteConfig {
    /// Task parameters (`static_url`, `static_root`, `cdn_prefix`, ...)
    pub params: Map<String, Value>,

    /// Package metadata, exposed to templates as `pkg`
    pub pkg: Value,

    /// Include names mapped to files
    pub includes: Includes,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            params: Map::new(),
            pkg: Value::Object(Map::new()),
            includes: Includes::new(),
        }
    }
}

/// Errors that can occur while rewriting a document.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: ScanError,
    },

    #[error("{path}: block {block} at line {line}: {source}")]
    Transform {
        path: PathBuf,
        block: String,
        line: usize,
        #[source]
        source: TransformError,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of rewriting one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewritten {
    /// The rewritten text
    pub content: String,

    /// Number of blocks replaced
    pub blocks: usize,

    /// Assets written while rendering the blocks
    pub assets: Vec<PathBuf>,
}

/// Rewrites documents block by block.
pub struct Rewriter {
    config: RewriteConfig,
    registry: TransformRegistry,
    templates: TemplateEngine,
    compiler: Box<dyn StylesheetCompiler>,
}

impl Rewriter {
    /// Create a rewriter with the built-in transforms and the lightningcss compiler.
    pub fn new(config: RewriteConfig) -> Self {
        Self {
            config,
            registry: TransformRegistry::new(),
            templates: TemplateEngine::new(),
            compiler: Box::new(LightningCompiler::new()),
        }
    }

    /// Replace the stylesheet compiler used by `less` blocks.
    pub fn with_compiler(mut self, compiler: impl StylesheetCompiler + 'static) -> Self {
        self.compiler = Box::new(compiler);
        self
    }

    /// The transform registry, for registering custom block kinds.
    pub fn registry_mut(&mut self) -> &mut TransformRegistry {
        &mut self.registry
    }

    /// Rewrite the text of one document. `path` is only used for error messages.
    ///
    /// Blocks are replaced in document order by the line range they were scanned from.
    /// Lines outside every block keep their own terminators; multi-line replacements use
    /// the document's detected line ending.
    pub fn rewrite(
        &self,
        path: &Path,
        source: &str,
        sink: &mut dyn OutputSink,
    ) -> Result<Rewritten, RewriteError> {
        let blocks = scan_blocks(source).map_err(|source| RewriteError::Scan {
            path: path.to_path_buf(),
            source,
        })?;

        if blocks.is_empty() {
            return Ok(Rewritten {
                content: source.to_string(),
                blocks: 0,
                assets: Vec::new(),
            });
        }

        let line_ending = LineEnding::detect(source);
        // Same indexing as the scanner's lines, terminators kept
        let lines: Vec<&str> = source.split_inclusive('\n').collect();

        let mut ordered: Vec<&Block> = blocks.iter().collect();
        ordered.sort_by_key(|b| b.index);

        let mut ctx = TransformContext::new(
            line_ending,
            &self.config.includes,
            &self.templates,
            self.compiler.as_ref(),
            sink,
        );

        let mut output = String::with_capacity(source.len());
        let mut cursor = 0;

        for block in ordered {
            let options = Options::resolve(block, &self.config.params, &self.config.pkg);
            let replacement = self
                .registry
                .dispatch(&block.kind, &options, &mut ctx)
                .map_err(|source| RewriteError::Transform {
                    path: path.to_path_buf(),
                    block: block.id.to_string(),
                    line: block.start_line + 1,
                    source,
                })?;

            tracing::debug!("Replaced block {} in {}", block.id, path.display());

            output.extend(lines[cursor..block.start_line].iter().copied());
            output.push_str(&replacement);
            output.push_str(terminator(lines[block.end_line]));
            cursor = block.end_line + 1;
        }
        output.extend(lines[cursor..].iter().copied());

        Ok(Rewritten {
            content: output,
            blocks: blocks.len(),
            assets: ctx.assets().to_vec(),
        })
    }

    /// Read `input`, rewrite it and write the result to `output` through the sink.
    ///
    /// Nothing is written for the document unless every block renders.
    pub fn process_file(
        &self,
        input: &Path,
        output: &Path,
        sink: &mut dyn OutputSink,
    ) -> Result<Rewritten, RewriteError> {
        let source = fs::read_to_string(input).map_err(|source| RewriteError::Read {
            path: input.to_path_buf(),
            source,
        })?;

        let rewritten = self.rewrite(input, &source, sink)?;

        sink.write(output, &rewritten.content)
            .map_err(|source| RewriteError::Write {
                path: output.to_path_buf(),
                source,
            })?;

        Ok(rewritten)
    }
}

/// The line break ending `line`, empty for the last line of a document.
fn terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}
