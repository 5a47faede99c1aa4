//! Reading and reindenting source files.

use std::fs;
use std::path::Path;

use htmlrefs_scan::{normalize_newlines, LineEnding};

use crate::error::TransformError;

/// Read a UTF-8 source file.
pub fn read_source(path: &Path) -> Result<String, TransformError> {
    fs::read_to_string(path).map_err(|source| TransformError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Prefix every line of `content` with `indent` and join with `line_ending`.
///
/// A single trailing newline in `content` does not produce an extra indented line.
pub fn reindent(content: &str, indent: &str, line_ending: LineEnding) -> String {
    let normalized = normalize_newlines(content);
    let body = normalized.strip_suffix('\n').unwrap_or(&normalized);

    body.split('\n')
        .map(|line| format!("{}{}", indent, line))
        .collect::<Vec<_>>()
        .join(line_ending.as_str())
}
