//! Initialize htmlrefs in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'htmlrefs build' to rewrite your templates.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# htmlrefs configuration

[files]
# Files or directories to rewrite (directories are searched for .html/.htm)
src = ["templates"]

# Output directory; remove to rewrite files in place
dest = "dist"

# JSON metadata available to `add` snippets as {{ pkg.* }}
# package = "package.json"

[options]
# Public URL prefix of static assets
static_url = "/static"

# Filesystem directory that static_url maps to
static_root = "public/static"

# URL prefix for emitted references (defaults to static_url)
# cdn_prefix = "http://cdn.example.com/static"

[includes]
# analytics = "partials/analytics.html"

[less]
# External compiler for `less` blocks; without it sources must be plain CSS
# compiler = "lessc"
# args = []
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::tempdir;

    #[test]
    fn default_config_parses() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("htmlrefs.toml");

        run(&path, false).unwrap();
        let config = load_config(&path).unwrap();

        assert_eq!(config.options["static_url"], "/static");
        assert!(config.includes.is_empty());
    }

    #[test]
    fn keeps_existing_config_without_yes() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("htmlrefs.toml");
        fs::write(&path, "# mine").unwrap();

        run(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        run(&path, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[options]"));
    }
}
