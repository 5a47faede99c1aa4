//! Errors raised while rendering a block.

use std::path::PathBuf;

/// Errors that can occur during a block transform.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("No sources specified in between ref tags for `{dest}`")]
    NoSources { dest: String },

    #[error("Cannot extract {expected} from line: {line}")]
    SourceExtraction { line: String, expected: String },

    #[error("Error compiling stylesheet {path}: {message}")]
    StylesheetCompile { path: PathBuf, message: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("No transform registered for block type `{0}`")]
    UnknownBlockType(String),
}
