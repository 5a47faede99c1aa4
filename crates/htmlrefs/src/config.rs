//! Configuration file (htmlrefs.toml).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

use htmlrefs_build::RewriteConfig;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub files: FilesConfig,

    /// Task parameters: static_url, static_root, cdn_prefix and anything else
    /// snippets should see
    #[serde(default)]
    pub options: Map<String, Value>,

    /// Include names mapped to files
    #[serde(default)]
    pub includes: HashMap<String, PathBuf>,

    #[serde(default)]
    pub less: LessConfig,
}

/// External LESS compiler for `less` blocks.
#[derive(Debug, Deserialize, Default)]
pub struct LessConfig {
    /// `lessc` executable; omitted means sources must already be plain CSS
    pub compiler: Option<PathBuf>,

    /// Arguments passed before each source path
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FilesConfig {
    /// Files or directories to process
    #[serde(default)]
    pub src: Vec<PathBuf>,

    /// Output directory; omitted means rewrite in place
    pub dest: Option<PathBuf>,

    /// JSON package metadata exposed to templates as `pkg`
    pub package: Option<PathBuf>,
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(ConfigFile::default())
}

impl ConfigFile {
    /// Build the rewriter configuration, loading package metadata if configured.
    pub fn rewrite_config(&self) -> Result<RewriteConfig> {
        let pkg = match &self.files.package {
            Some(path) => load_package(path)?,
            None => Value::Object(Map::new()),
        };

        Ok(RewriteConfig {
            params: self.options.clone(),
            pkg,
            includes: self.includes.clone(),
        })
    }
}

fn load_package(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read package metadata {}", path.display()))?;
    let pkg: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse package metadata {}", path.display()))?;
    Ok(pkg)
}
