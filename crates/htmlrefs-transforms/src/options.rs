//! The merged options bag a transform renders from.

use serde_json::{Map, Value};

use htmlrefs_scan::{leading_whitespace, Block};

use crate::paths::StaticRoots;

/// Options for one block: package metadata, block fields and task parameters merged
/// into a single JSON object.
///
/// Precedence, lowest to highest: `pkg`, then the block's `type`, `dest` and `raw`,
/// then task parameters. A later layer shadows an earlier one on key collision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    values: Map<String, Value>,
}

impl Options {
    /// Merge the three layers for `block`.
    pub fn resolve(block: &Block, params: &Map<String, Value>, pkg: &Value) -> Self {
        let mut values = Map::new();
        values.insert("pkg".to_string(), pkg.clone());

        values.insert("type".to_string(), Value::from(block.kind.as_str()));
        values.insert("dest".to_string(), Value::from(block.dest.as_str()));
        values.insert(
            "raw".to_string(),
            Value::Array(block.raw.iter().map(|l| Value::from(l.as_str())).collect()),
        );

        for (key, value) in params {
            values.insert(key.clone(), value.clone());
        }

        Self { values }
    }

    /// Build options directly from a JSON object.
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// A string-valued option.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// The block type.
    pub fn kind(&self) -> &str {
        self.get_str("type").unwrap_or_default()
    }

    /// The block target, trimmed.
    pub fn dest(&self) -> &str {
        self.get_str("dest").unwrap_or_default().trim()
    }

    /// The block's raw lines.
    pub fn raw(&self) -> Vec<&str> {
        match self.values.get("raw") {
            Some(Value::Array(lines)) => lines.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Leading whitespace of the start marker line.
    pub fn indent(&self) -> &str {
        match self.values.get("raw") {
            Some(Value::Array(lines)) => lines
                .first()
                .and_then(Value::as_str)
                .map(leading_whitespace)
                .unwrap_or_default(),
            _ => "",
        }
    }

    /// `static_url`, `static_root` and `cdn_prefix`.
    pub fn static_roots(&self) -> StaticRoots {
        StaticRoots {
            static_url: self.get_str("static_url").unwrap_or_default().to_string(),
            static_root: self.get_str("static_root").unwrap_or_default().to_string(),
            cdn_prefix: self
                .get_str("cdn_prefix")
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        }
    }

    /// A copy with `key` set to `value`.
    pub fn with(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value.into());
        Self { values }
    }

    /// The merged object, used as template context.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use htmlrefs_scan::scan_blocks;
    use serde_json::json;

    fn first_block(source: &str) -> Block {
        scan_blocks(source).unwrap().into_iter().next().unwrap()
    }

    #[test]
    fn merges_block_fields() {
        let block = first_block("  <!-- ref:js /app.js -->\n  <!-- endref -->");
        let options = Options::resolve(&block, &Map::new(), &json!({}));

        assert_eq!(options.kind(), "js");
        assert_eq!(options.dest(), "/app.js");
        assert_eq!(options.raw(), vec!["  <!-- ref:js /app.js -->", "  <!-- endref -->"]);
        assert_eq!(options.indent(), "  ");
    }

    #[test]
    fn params_shadow_block_and_pkg() {
        let block = first_block("<!-- ref:add x -->\n<!-- <b>{{ name }}</b> -->\n<!-- endref -->");
        let pkg = json!({ "name": "site", "version": "1.2.0" });
        let params = json!({ "static_url": "/static", "dest": "override" });
        let params = params.as_object().unwrap().clone();

        let options = Options::resolve(&block, &params, &pkg);

        assert_eq!(options.dest(), "override");
        assert_eq!(options.get_str("static_url"), Some("/static"));
        assert_eq!(options.get("pkg"), Some(&pkg));
    }

    #[test]
    fn reads_static_roots() {
        let options = Options::from_map(
            json!({ "static_url": "/s", "static_root": "dist/s", "cdn_prefix": "" })
                .as_object()
                .unwrap()
                .clone(),
        );
        let roots = options.static_roots();

        assert_eq!(roots.static_url, "/s");
        assert_eq!(roots.static_root, "dist/s");
        assert_eq!(roots.cdn_prefix, None);
    }

    #[test]
    fn with_replaces_a_key() {
        let options = Options::default().with("dest", "a.css");
        assert_eq!(options.dest(), "a.css");
        assert_eq!(options.with("dest", "b.css").dest(), "b.css");
    }
}
