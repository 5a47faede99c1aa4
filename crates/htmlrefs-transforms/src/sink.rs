//! Output sinks that rewritten documents and generated assets are written through.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Destination for generated files.
pub trait OutputSink {
    /// Write `contents` to `path`, replacing anything already there.
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes to the filesystem, creating parent directories as needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, contents)
    }
}

/// Keeps writes in memory. Used for dry runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents last written to `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// All written files, ordered by path.
    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
