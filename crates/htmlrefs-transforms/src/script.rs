//! `js` blocks: replaced with a single `<script>` reference to the block target.

use crate::error::TransformError;
use crate::options::Options;
use crate::templates::SCRIPT;
use crate::traits::{BlockTransform, TransformContext};

/// Emits `<script type="text/javascript" src="{dest}"></script>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptTransform;

impl BlockTransform for ScriptTransform {
    fn kind(&self) -> &str {
        "js"
    }

    fn transform(
        &self,
        options: &Options,
        ctx: &mut TransformContext<'_>,
    ) -> Result<String, TransformError> {
        let options = options.with("dest", options.dest());
        let tag = ctx.templates.render(SCRIPT, options.as_map())?;
        Ok(format!("{}{}", options.indent(), tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::test_support::Harness;

    #[test]
    fn emits_script_reference() {
        let source = r#"    <!-- ref:js /static/js/app.min.js -->
    <script src="/static/js/a.js"></script>
    <script src="/static/js/b.js"></script>
    <!-- endref -->"#;

        let out = Harness::new().run(&ScriptTransform, source).unwrap();

        assert_eq!(
            out,
            r#"    <script type="text/javascript" src="/static/js/app.min.js"></script>"#
        );
    }

    #[test]
    fn keeps_tab_indentation() {
        let out = Harness::new()
            .run(&ScriptTransform, "\t\t<!-- ref:js app.js -->\n\t\t<!-- endref -->")
            .unwrap();

        assert!(out.starts_with("\t\t<script"));
    }
}
