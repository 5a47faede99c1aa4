//! Template engine for generated markup and `add` snippets.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

/// Name of the `<script>` reference template.
pub const SCRIPT: &str = "script";

/// Name of the `<link rel="stylesheet">` reference template.
pub const STYLESHEET: &str = "stylesheet";

/// Name of the inline `<style>` template.
pub const INLINE_STYLE: &str = "inline_style";

/// Template engine using minijinja.
///
/// Built-in templates have no file extension so output is never HTML-escaped; URLs and
/// stylesheet bodies are emitted as-is. Undefined variables are errors.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        env.add_template_owned(SCRIPT.to_string(), SCRIPT_TEMPLATE.to_string())
            .expect("Failed to add script template");

        env.add_template_owned(STYLESHEET.to_string(), STYLESHEET_TEMPLATE.to_string())
            .expect("Failed to add stylesheet template");

        env.add_template_owned(INLINE_STYLE.to_string(), INLINE_STYLE_TEMPLATE.to_string())
            .expect("Failed to add inline style template");

        Self { env }
    }

    /// Render a built-in template.
    pub fn render<S: Serialize>(&self, template: &str, context: S) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(context)
    }

    /// Render an ad-hoc template string.
    pub fn render_snippet<S: Serialize>(
        &self,
        source: &str,
        context: S,
    ) -> Result<String, minijinja::Error> {
        self.env.render_str(source, context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const SCRIPT_TEMPLATE: &str = r#"<script type="text/javascript" src="{{ dest }}"></script>"#;

const STYLESHEET_TEMPLATE: &str = r#"<link type="text/css" rel="stylesheet" href="{{ dest }}">"#;

const INLINE_STYLE_TEMPLATE: &str = r#"{{ indent }}<style>{{ lf }}{{ body }}{{ lf }}{{ indent }}</style>"#;
