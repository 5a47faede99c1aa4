//! Registry of block transforms, keyed by block type.

use std::collections::HashMap;

use htmlrefs_scan::BlockKind;

use crate::add::AddTransform;
use crate::error::TransformError;
use crate::include::IncludeTransform;
use crate::inline::InlineCssTransform;
use crate::options::Options;
use crate::remove::RemoveTransform;
use crate::script::ScriptTransform;
use crate::stylesheet::StylesheetTransform;
use crate::traits::{BlockTransform, TransformContext};

/// Dispatch table from block type to handler.
pub struct TransformRegistry {
    handlers: HashMap<String, Box<dyn BlockTransform>>,
}

impl TransformRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in transforms:
    /// `js`, `css`, `inlinecss`, `include`, `remove`, `less` and `add`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(ScriptTransform);
        registry.register(StylesheetTransform::css());
        registry.register(InlineCssTransform);
        registry.register(IncludeTransform);
        registry.register(RemoveTransform);
        registry.register(StylesheetTransform::less());
        registry.register(AddTransform);
        registry
    }

    /// Register a handler, replacing any existing handler for the same kind.
    pub fn register<T: BlockTransform + 'static>(&mut self, handler: T) {
        self.handlers
            .insert(handler.kind().to_string(), Box::new(handler));
    }

    /// Look up the handler for a kind.
    pub fn get(&self, kind: &str) -> Option<&dyn BlockTransform> {
        self.handlers.get(kind).map(|h| h.as_ref())
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Render a block of the given kind.
    pub fn dispatch(
        &self,
        kind: &BlockKind,
        options: &Options,
        ctx: &mut TransformContext<'_>,
    ) -> Result<String, TransformError> {
        let handler = self
            .get(kind.as_str())
            .ok_or_else(|| TransformError::UnknownBlockType(kind.to_string()))?;

        handler.transform(options, ctx)
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new()
    }
}
