//! `css` and `less` blocks: consolidate the referenced stylesheets into one file.
//!
//! Every line between the markers must carry an `href="..."`. The referenced files are
//! read (and, for `less`, compiled), joined with newlines and written either to the exact
//! `.css` target or to `<target>/<content hash>.css`. The block becomes a single
//! `<link>` to the written file.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TransformError;
use crate::options::Options;
use crate::templates::STYLESHEET;
use crate::text::read_source;
use crate::traits::{BlockTransform, TransformContext};

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href\s*=\s*"([^"]+)""#).expect("Invalid href regex"));

/// Stylesheet consolidation, optionally compiling each source first.
#[derive(Debug, Clone, Copy)]
pub struct StylesheetTransform {
    kind: &'static str,
    compile: bool,
}

impl StylesheetTransform {
    /// Plain CSS sources, concatenated verbatim.
    pub fn css() -> Self {
        Self {
            kind: "css",
            compile: false,
        }
    }

    /// Sources run through the stylesheet compiler before concatenation.
    pub fn less() -> Self {
        Self {
            kind: "less",
            compile: true,
        }
    }
}

impl BlockTransform for StylesheetTransform {
    fn kind(&self) -> &str {
        self.kind
    }

    fn transform(
        &self,
        options: &Options,
        ctx: &mut TransformContext<'_>,
    ) -> Result<String, TransformError> {
        let raw = options.raw();
        if raw.len() < 3 {
            return Err(TransformError::NoSources {
                dest: options.dest().to_string(),
            });
        }

        let roots = options.static_roots();
        let mut parts = Vec::with_capacity(raw.len() - 2);

        for line in &raw[1..raw.len() - 1] {
            let href = extract_href(line)?;
            let path = roots.to_filesystem(href);
            let source = read_source(&path)?;

            let css = if self.compile {
                ctx.compiler
                    .compile(&path, &source)
                    .map_err(|e| TransformError::StylesheetCompile {
                        path: path.clone(),
                        message: e.to_string(),
                    })?
            } else {
                source
            };
            parts.push(css);
        }

        let css = parts.join("\n");
        let target = roots.resolve_output(options.dest(), &css);
        ctx.write_asset(&target.path, &css)?;

        tracing::debug!(
            "Bundled {} stylesheet(s) into {} ({})",
            parts.len(),
            target.path.display(),
            target.url
        );

        let options = options.with("dest", target.url);
        let tag = ctx.templates.render(STYLESHEET, options.as_map())?;
        Ok(format!("{}{}", options.indent(), tag))
    }
}

/// The quoted `href` value on a line.
fn extract_href(line: &str) -> Result<&str, TransformError> {
    HREF_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| TransformError::SourceExtraction {
            line: line.trim().to_string(),
            expected: "href=\"...\"".to_string(),
        })
}
