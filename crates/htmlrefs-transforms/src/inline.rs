//! `inlinecss` blocks: the target stylesheet is inlined into a `<style>` tag.

use std::path::Path;

use serde_json::json;

use crate::error::TransformError;
use crate::options::Options;
use crate::templates::INLINE_STYLE;
use crate::text::{read_source, reindent};
use crate::traits::{BlockTransform, TransformContext};

/// Reads the file at `dest` and emits it inside `<style>`, reindented to the block.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineCssTransform;

impl BlockTransform for InlineCssTransform {
    fn kind(&self) -> &str {
        "inlinecss"
    }

    fn transform(
        &self,
        options: &Options,
        ctx: &mut TransformContext<'_>,
    ) -> Result<String, TransformError> {
        let indent = options.indent();
        let css = read_source(Path::new(options.dest()))?;
        let body = reindent(&css, indent, ctx.line_ending);

        let html = ctx.templates.render(
            INLINE_STYLE,
            json!({
                "indent": indent,
                "body": body,
                "lf": ctx.line_ending.as_str(),
            }),
        )?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::test_support::Harness;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn inlines_stylesheet() {
        let temp = tempdir().unwrap();
        let css = temp.path().join("critical.css");
        fs::write(&css, "body {\n  margin: 0;\n}\n").unwrap();

        let source = format!(
            "  <!-- ref:inlinecss {} -->\n  <link href=\"critical.css\">\n  <!-- endref -->",
            css.display()
        );
        let out = Harness::new().run(&InlineCssTransform, &source).unwrap();

        assert_eq!(
            out,
            "  <style>\n  body {\n    margin: 0;\n  }\n  </style>"
        );
    }

    #[test]
    fn follows_document_line_ending() {
        let temp = tempdir().unwrap();
        let css = temp.path().join("a.css");
        fs::write(&css, "a{}\nb{}").unwrap();

        let source = format!("<!-- ref:inlinecss {} -->\r\n<!-- endref -->", css.display());
        let out = Harness::new().run(&InlineCssTransform, &source).unwrap();

        assert_eq!(out, "<style>\r\na{}\r\nb{}\r\n</style>");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Harness::new()
            .run(
                &InlineCssTransform,
                "<!-- ref:inlinecss /does/not/exist.css -->\n<!-- endref -->",
            )
            .unwrap_err();

        assert!(matches!(err, TransformError::Read { .. }));
    }
}
