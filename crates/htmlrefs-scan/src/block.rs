//! Block types produced by the scanner.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Declared type of a block, taken from the `ref:<type>` part of the start marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `<script>` reference
    Js,
    /// Consolidated stylesheet
    Css,
    /// Stylesheet inlined into a `<style>` tag
    InlineCss,
    /// Named include from the includes table
    Include,
    /// Deleted block
    Remove,
    /// Compiled and consolidated stylesheet
    Less,
    /// Templated snippet
    Add,
    /// Any other identifier; resolved against registered handlers
    Custom(String),
}

impl BlockKind {
    /// Parse a kind from the identifier in a start marker.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "js" => Self::Js,
            "css" => Self::Css,
            "inlinecss" => Self::InlineCss,
            "include" => Self::Include,
            "remove" => Self::Remove,
            "less" => Self::Less,
            "add" => Self::Add,
            other => Self::Custom(other.to_string()),
        }
    }

    /// The identifier as it appears in markup.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Js => "js",
            Self::Css => "css",
            Self::InlineCss => "inlinecss",
            Self::Include => "include",
            Self::Remove => "remove",
            Self::Less => "less",
            Self::Add => "add",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Second half of a block identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// The trimmed target from the start marker
    Named(String),
    /// Per-document sequence number, used when the target is empty or already taken
    Sequence(usize),
}

/// Identity of a block, unique within one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockId {
    pub kind: BlockKind,
    pub target: Target,
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Target::Named(name) => write!(f, "{}:{}", self.kind, name),
            Target::Sequence(seq) => write!(f, "{}#{}", self.kind, seq),
        }
    }
}

/// A marker-delimited block scanned from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Unique identity within the document
    pub id: BlockId,

    /// Discovery order (0-based)
    pub index: usize,

    /// Declared type
    pub kind: BlockKind,

    /// Trimmed target from the start marker (may be empty)
    pub dest: String,

    /// Original lines from the start marker through the end marker, inclusive
    pub raw: Vec<String>,

    /// Line index of the start marker (0-based)
    pub start_line: usize,

    /// Line index of the end marker (0-based, inclusive)
    pub end_line: usize,
}

/// Leading whitespace of a line.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line.len() - line.trim_start().len();
    &line[..end]
}

/// Blocks of one document, keyed by identity and iterated in discovery order.
#[derive(Debug, Clone, Default)]
pub struct BlockSet {
    blocks: Vec<Block>,
    by_id: HashMap<BlockId, usize>,
}

impl BlockSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an identity is already taken.
    pub fn contains(&self, id: &BlockId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Add a block. Returns `false` and leaves the set untouched if its identity is taken.
    pub fn insert(&mut self, block: Block) -> bool {
        if self.by_id.contains_key(&block.id) {
            return false;
        }
        self.by_id.insert(block.id.clone(), self.blocks.len());
        self.blocks.push(block);
        true
    }

    /// Look up a block by identity.
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.by_id.get(id).map(|&i| &self.blocks[i])
    }

    /// Blocks in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl IntoIterator for BlockSet {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a BlockSet {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Line-ending style of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// `CrLf` if the text contains any `\r\n`, `Lf` otherwise.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Replace every `\r\n` with `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(kind: BlockKind, dest: &str, raw: &[&str]) -> Block {
        Block {
            id: BlockId {
                kind: kind.clone(),
                target: Target::Named(dest.to_string()),
            },
            index: 0,
            kind,
            dest: dest.to_string(),
            raw: raw.iter().map(|s| s.to_string()).collect(),
            start_line: 0,
            end_line: raw.len().saturating_sub(1),
        }
    }

    #[test]
    fn parses_kind() {
        assert_eq!(BlockKind::from_tag("js"), BlockKind::Js);
        assert_eq!(BlockKind::from_tag("inlinecss"), BlockKind::InlineCss);
        assert_eq!(
            BlockKind::from_tag("svg"),
            BlockKind::Custom("svg".to_string())
        );
        assert_eq!(BlockKind::from_tag("less").as_str(), "less");
    }

    #[test]
    fn displays_identity() {
        let named = BlockId {
            kind: BlockKind::Js,
            target: Target::Named("app.js".to_string()),
        };
        let anonymous = BlockId {
            kind: BlockKind::Remove,
            target: Target::Sequence(3),
        };

        assert_eq!(named.to_string(), "js:app.js");
        assert_eq!(anonymous.to_string(), "remove#3");
    }

    #[test]
    fn block_set_rejects_duplicate_identity() {
        let mut set = BlockSet::new();
        let b = block(BlockKind::Js, "app.js", &["a", "b"]);

        assert!(set.insert(b.clone()));
        assert!(!set.insert(b.clone()));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&b.id), Some(&b));
    }

    #[test]
    fn detects_line_endings() {
        assert_eq!(LineEnding::detect("a\nb"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb"), LineEnding::CrLf);
        assert_eq!(normalize_newlines("a\r\nb\r\n"), "a\nb\n");
    }
}
