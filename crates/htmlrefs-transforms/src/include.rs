//! `include` blocks: replaced with the contents of a named include.

use crate::error::TransformError;
use crate::options::Options;
use crate::text::{read_source, reindent};
use crate::traits::{BlockTransform, TransformContext};

/// Looks `dest` up in the includes table. Unknown names remove the block.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeTransform;

impl BlockTransform for IncludeTransform {
    fn kind(&self) -> &str {
        "include"
    }

    fn transform(
        &self,
        options: &Options,
        ctx: &mut TransformContext<'_>,
    ) -> Result<String, TransformError> {
        let name = options.dest();
        let Some(path) = ctx.includes.get(name) else {
            tracing::warn!("Include `{}` is not listed, removing block", name);
            return Ok(String::new());
        };

        let content = read_source(path)?;
        Ok(reindent(&content, options.indent(), ctx.line_ending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::test_support::Harness;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn absent_include_is_removed() {
        let out = Harness::new()
            .run(
                &IncludeTransform,
                "<!-- ref:include analytics -->\n<p>placeholder</p>\n<!-- endref -->",
            )
            .unwrap();

        assert_eq!(out, "");
    }

    #[test]
    fn present_include_is_reindented() {
        let temp = tempdir().unwrap();
        let partial = temp.path().join("analytics.html");
        fs::write(&partial, "<script>\n  track();\n</script>\n").unwrap();

        let mut harness = Harness::new();
        harness.includes.insert("analytics".to_string(), partial);

        let out = harness
            .run(
                &IncludeTransform,
                "    <!-- ref:include analytics -->\r\n    <!-- endref -->",
            )
            .unwrap();

        assert_eq!(out, "    <script>\r\n      track();\r\n    </script>");
    }
}
