//! Rewriting asset locations between the static URL, static root and CDN prefix.
//!
//! The same asset is known by three names: the public URL used in source markup
//! (`static_url`), the filesystem path it is read from or written to (`static_root`),
//! and the URL emitted into the rewritten document (`cdn_prefix`, falling back to
//! `static_url`).

use std::path::PathBuf;

use crate::hash::hashed_filename;

/// The three configured roots of a static asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRoots {
    /// Public URL prefix identifying assets (e.g. `/static`)
    pub static_url: String,

    /// Filesystem path substituted for `static_url` when resolving files
    pub static_root: String,

    /// URL prefix substituted for `static_url` in emitted references
    pub cdn_prefix: Option<String>,
}

/// Where a consolidated asset is written and how the document refers to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    /// Filesystem path of the written asset
    pub path: PathBuf,

    /// Reference emitted into the document
    pub url: String,
}

impl StaticRoots {
    /// The CDN prefix, or the static URL when none is configured.
    pub fn cdn(&self) -> &str {
        match &self.cdn_prefix {
            Some(prefix) if !prefix.is_empty() => prefix,
            _ => &self.static_url,
        }
    }

    /// Map a static URL to its filesystem path.
    pub fn to_filesystem(&self, url: &str) -> PathBuf {
        PathBuf::from(substitute(url, &self.static_url, &self.static_root))
    }

    /// Map a static URL to the URL emitted into documents.
    pub fn to_public(&self, url: &str) -> String {
        substitute(url, &self.static_url, self.cdn())
    }

    /// Resolve the output location for consolidated stylesheet `content`.
    ///
    /// A `dest` ending in `.css` names the output file exactly. Anything else is a
    /// directory that receives `<hash>.css`.
    pub fn resolve_output(&self, dest: &str, content: &str) -> OutputTarget {
        let dest = dest.trim();

        if dest.ends_with(".css") {
            return OutputTarget {
                path: PathBuf::from(dest),
                url: self.to_public(dest),
            };
        }

        let name = hashed_filename(content.as_bytes(), "css");
        OutputTarget {
            path: self.to_filesystem(dest).join(&name),
            url: join_url(&self.to_public(dest), &name),
        }
    }
}

/// Replace the first occurrence of `from` in `text` with `to`. An empty `from` is a no-op.
fn substitute(text: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return text.to_string();
    }
    text.replacen(from, to, 1)
}

/// Append `name` to a URL and normalize the path, keeping any `scheme://` or `//` prefix.
pub fn join_url(base: &str, name: &str) -> String {
    let (authority, rest) = split_scheme(base);
    if rest.is_empty() {
        return format!("{}{}", authority, name);
    }
    format!("{}{}", authority, normalize_path(&format!("{}/{}", rest, name)))
}

fn split_scheme(url: &str) -> (&str, &str) {
    if let Some(pos) = url.find("://") {
        let is_scheme = url[..pos]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if pos > 0 && is_scheme {
            return url.split_at(pos + 3);
        }
    }
    if url.starts_with("//") {
        return url.split_at(2);
    }
    ("", url)
}

/// Collapse repeated slashes and resolve `.` and `..` segments.
fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            s => segments.push(s),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
