//! Trait definitions for block transforms.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use htmlrefs_scan::LineEnding;

use crate::compiler::StylesheetCompiler;
use crate::error::TransformError;
use crate::options::Options;
use crate::sink::OutputSink;
use crate::templates::TemplateEngine;

/// Include names mapped to the files they pull in.
pub type Includes = HashMap<String, PathBuf>;

/// Everything a transform may use besides its options.
pub struct TransformContext<'a> {
    /// Line ending of the document being rewritten
    pub line_ending: LineEnding,

    /// Includes table
    pub includes: &'a Includes,

    /// Template engine for markup and snippets
    pub templates: &'a TemplateEngine,

    /// Compiler for `less` sources
    pub compiler: &'a dyn StylesheetCompiler,

    sink: &'a mut dyn OutputSink,
    assets: Vec<PathBuf>,
}

impl<'a> TransformContext<'a> {
    pub fn new(
        line_ending: LineEnding,
        includes: &'a Includes,
        templates: &'a TemplateEngine,
        compiler: &'a dyn StylesheetCompiler,
        sink: &'a mut dyn OutputSink,
    ) -> Self {
        Self {
            line_ending,
            includes,
            templates,
            compiler,
            sink,
            assets: Vec::new(),
        }
    }

    /// Write a generated asset through the sink and record its path.
    pub fn write_asset(&mut self, path: &Path, contents: &str) -> Result<(), TransformError> {
        self.sink
            .write(path, contents)
            .map_err(|source| TransformError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        self.assets.push(path.to_path_buf());
        Ok(())
    }

    /// Assets written so far.
    pub fn assets(&self) -> &[PathBuf] {
        &self.assets
    }
}

/// A handler for one block kind.
pub trait BlockTransform: Send + Sync {
    /// Block type this handler renders (e.g. "js", "css")
    fn kind(&self) -> &str;

    /// Produce the replacement text for a block.
    ///
    /// # Arguments
    /// * `options` - The merged options bag for the block
    /// * `ctx` - Line ending, includes table and collaborators
    fn transform(
        &self,
        options: &Options,
        ctx: &mut TransformContext<'_>,
    ) -> Result<String, TransformError>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::compiler::LightningCompiler;
    use crate::sink::MemorySink;
    use htmlrefs_scan::scan_blocks;
    use serde_json::{Map, Value};

    /// Collaborators for exercising a transform in isolation.
    pub struct Harness {
        pub includes: Includes,
        pub templates: TemplateEngine,
        pub compiler: LightningCompiler,
        pub sink: MemorySink,
        pub params: Map<String, Value>,
        pub pkg: Value,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                includes: Includes::new(),
                templates: TemplateEngine::new(),
                compiler: LightningCompiler::new(),
                sink: MemorySink::new(),
                params: Map::new(),
                pkg: Value::Object(Map::new()),
            }
        }

        pub fn param(mut self, key: &str, value: &str) -> Self {
            self.params.insert(key.to_string(), Value::from(value));
            self
        }

        /// Scan `source`, then run `transform` on its first block.
        pub fn run(
            &mut self,
            transform: &dyn BlockTransform,
            source: &str,
        ) -> Result<String, TransformError> {
            let line_ending = LineEnding::detect(source);
            let block = scan_blocks(source)
                .expect("test document should scan")
                .into_iter()
                .next()
                .expect("test document should contain a block");
            let options = Options::resolve(&block, &self.params, &self.pkg);

            let mut ctx = TransformContext::new(
                line_ending,
                &self.includes,
                &self.templates,
                &self.compiler,
                &mut self.sink,
            );
            transform.transform(&options, &mut ctx)
        }
    }
}
