//! Block transforms for htmlrefs.
//!
//! Each block kind has a [`BlockTransform`] that turns a resolved [`Options`] bag into
//! replacement markup. The [`TransformRegistry`] dispatches on the block kind and can be
//! extended with custom kinds.

pub mod add;
pub mod compiler;
pub mod error;
pub mod hash;
pub mod include;
pub mod inline;
pub mod options;
pub mod paths;
pub mod registry;
pub mod remove;
pub mod script;
pub mod sink;
pub mod stylesheet;
pub mod templates;
pub mod text;
pub mod traits;

pub use compiler::{CompileError, LesscCompiler, LightningCompiler, StylesheetCompiler};
pub use error::TransformError;
pub use hash::{content_hash, hashed_filename};
pub use options::Options;
pub use paths::{OutputTarget, StaticRoots};
pub use registry::TransformRegistry;
pub use sink::{FsSink, MemorySink, OutputSink};
pub use templates::TemplateEngine;
pub use traits::{BlockTransform, Includes, TransformContext};
