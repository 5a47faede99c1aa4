//! `add` blocks: a commented-out template snippet is rendered into the document.
//!
//! ```text
//! <!-- ref:add version -->
//! <!-- <meta name="version" content="{{ pkg.version }}"> -->
//! <!-- endref -->
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TransformError;
use crate::options::Options;
use crate::traits::{BlockTransform, TransformContext};

static SNIPPET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*(.+?)\s*-->").expect("Invalid snippet regex"));

static END_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*endref\s*-->").expect("Invalid end marker regex"));

/// Renders the comment on the line after the start marker against the options bag.
/// Only that line is consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddTransform;

impl BlockTransform for AddTransform {
    fn kind(&self) -> &str {
        "add"
    }

    fn transform(
        &self,
        options: &Options,
        ctx: &mut TransformContext<'_>,
    ) -> Result<String, TransformError> {
        let raw = options.raw();
        let line = match raw.as_slice() {
            [_, line, ..] => match END_MARKER_RE.find(line) {
                Some(end) => &line[..end.start()],
                None => *line,
            },
            _ => {
                return Err(TransformError::SourceExtraction {
                    line: raw.first().map(|l| l.trim()).unwrap_or_default().to_string(),
                    expected: "a snippet line after the start marker".to_string(),
                })
            }
        };

        let snippet = SNIPPET_RE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| TransformError::SourceExtraction {
                line: line.trim().to_string(),
                expected: "a <!-- snippet --> comment".to_string(),
            })?;

        let rendered = ctx.templates.render_snippet(snippet, options.as_map())?;
        Ok(format!("{}{}", options.indent(), rendered))
    }
}
