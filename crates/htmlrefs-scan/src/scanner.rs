//! Line-oriented scanner for `ref`/`endref` marker pairs.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::{normalize_newlines, Block, BlockId, BlockKind, BlockSet, Target};

/// Start marker: `<!-- ref:<type> <target> -->`, target optional.
static START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s*ref:(\w+)(?:\s+(.*?))?\s*-->").expect("Invalid start marker regex")
});

/// End marker: `<!-- endref -->`.
static END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*endref\s*-->").expect("Invalid end marker regex"));

/// Errors that can occur while scanning a document.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("Malformed block at line {line}: {message}")]
    MalformedBlock { line: usize, message: String },
}

/// A block whose end marker has not been seen yet.
struct OpenBlock {
    kind: BlockKind,
    dest: String,
    start_line: usize,
    raw: Vec<String>,
}

/// Scan a document for marker-delimited blocks.
///
/// `\r\n` line endings are treated as `\n`. Line numbers recorded on blocks are 0-based
/// indexes into the normalized document's lines; line numbers in errors are 1-based.
pub fn scan_blocks(source: &str) -> Result<BlockSet, ScanError> {
    let text = normalize_newlines(source);
    let mut blocks = BlockSet::new();
    let mut open: Option<OpenBlock> = None;

    for (line_no, line) in text.split('\n').enumerate() {
        if let Some(caps) = START_RE.captures(line) {
            if let Some(current) = &open {
                return Err(ScanError::MalformedBlock {
                    line: line_no + 1,
                    message: format!(
                        "start marker inside `{}` block opened at line {}",
                        current.kind,
                        current.start_line + 1
                    ),
                });
            }

            let tag = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let dest = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();

            open = Some(OpenBlock {
                kind: BlockKind::from_tag(tag),
                dest: dest.to_string(),
                start_line: line_no,
                raw: Vec::new(),
            });
        }

        // END with nothing open is ignored
        let closes = END_RE.is_match(line);
        if let Some(mut current) = open.take() {
            current.raw.push(line.to_string());
            if closes {
                close_block(&mut blocks, current, line_no);
            } else {
                open = Some(current);
            }
        }
    }

    if let Some(current) = open {
        return Err(ScanError::MalformedBlock {
            line: current.start_line + 1,
            message: format!(
                "`{}` block is never closed with <!-- endref -->",
                current.kind
            ),
        });
    }

    Ok(blocks)
}

fn close_block(blocks: &mut BlockSet, open: OpenBlock, end_line: usize) {
    let index = blocks.len();

    let mut id = BlockId {
        kind: open.kind.clone(),
        target: Target::Named(open.dest.clone()),
    };
    if open.dest.is_empty() || blocks.contains(&id) {
        id.target = Target::Sequence(index);
    }

    tracing::debug!(
        "Found block {} at lines {}-{}",
        id,
        open.start_line + 1,
        end_line + 1
    );

    blocks.insert(Block {
        id,
        index,
        kind: open.kind,
        dest: open.dest,
        raw: open.raw,
        start_line: open.start_line,
        end_line,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_markers_yields_no_blocks() {
        let blocks = scan_blocks("<html>\n<body></body>\n</html>").unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn scans_single_block() {
        let source = r#"<head>
    <!-- ref:js /static/app.min.js -->
    <script src="/static/a.js"></script>
    <script src="/static/b.js"></script>
    <!-- endref -->
</head>"#;

        let blocks = scan_blocks(source).unwrap();
        assert_eq!(blocks.len(), 1);

        let block = blocks.iter().next().unwrap();
        assert_eq!(block.kind, BlockKind::Js);
        assert_eq!(block.dest, "/static/app.min.js");
        assert_eq!(block.id.to_string(), "js:/static/app.min.js");
        assert_eq!(block.raw.len(), 4);
        assert_eq!(block.raw[0], "    <!-- ref:js /static/app.min.js -->");
        assert_eq!(block.raw[3], "    <!-- endref -->");
        assert_eq!((block.start_line, block.end_line), (1, 4));
    }

    #[test]
    fn lines_outside_blocks_are_not_collected() {
        let source = "a\n<!-- ref:remove -->\nb\n<!-- endref -->\nc";

        let blocks = scan_blocks(source).unwrap();
        let block = blocks.iter().next().unwrap();

        assert_eq!(block.raw, vec!["<!-- ref:remove -->", "b", "<!-- endref -->"]);
    }

    #[test]
    fn anonymous_blocks_get_sequence_identity() {
        let source = "<!-- ref:remove -->\nx\n<!-- endref -->\n<!-- ref:remove -->\nx\n<!-- endref -->";

        let blocks = scan_blocks(source).unwrap();
        let ids: Vec<String> = blocks.iter().map(|b| b.id.to_string()).collect();

        assert_eq!(ids, vec!["remove#0", "remove#1"]);
    }

    #[test]
    fn duplicate_targets_stay_distinct() {
        let source = "<!-- ref:js app.js -->\n<!-- endref -->\n<!-- ref:js app.js -->\n<!-- endref -->";

        let blocks = scan_blocks(source).unwrap();
        let ids: Vec<String> = blocks.iter().map(|b| b.id.to_string()).collect();

        assert_eq!(ids, vec!["js:app.js", "js#1"]);
        assert!(blocks.iter().all(|b| b.dest == "app.js"));
    }

    #[test]
    fn keeps_discovery_order() {
        let source = "<!-- ref:remove -->\n<!-- endref -->\n<!-- ref:js z.js -->\n<!-- endref -->\n<!-- ref:css a/ -->\n<!-- endref -->";

        let blocks = scan_blocks(source).unwrap();
        let kinds: Vec<&str> = blocks.iter().map(|b| b.kind.as_str()).collect();
        let indexes: Vec<usize> = blocks.iter().map(|b| b.index).collect();

        assert_eq!(kinds, vec!["remove", "js", "css"]);
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn handles_crlf_input() {
        let source = "a\r\n<!-- ref:remove old -->\r\nb\r\n<!-- endref -->\r\nc";

        let blocks = scan_blocks(source).unwrap();
        let block = blocks.iter().next().unwrap();

        assert_eq!(block.raw, vec!["<!-- ref:remove old -->", "b", "<!-- endref -->"]);
        assert_eq!(block.dest, "old");
    }

    #[test]
    fn marker_whitespace_is_flexible() {
        let source = "<!--ref:include   header  -->\n<!--   endref-->";

        let blocks = scan_blocks(source).unwrap();
        let block = blocks.iter().next().unwrap();

        assert_eq!(block.kind, BlockKind::Include);
        assert_eq!(block.dest, "header");
        assert_eq!(block.raw.len(), 2);
    }

    #[test]
    fn single_line_block() {
        let source = "x\n<!-- ref:remove --><p>old</p><!-- endref -->\ny";

        let blocks = scan_blocks(source).unwrap();
        let block = blocks.iter().next().unwrap();

        assert_eq!(block.raw.len(), 1);
        assert_eq!((block.start_line, block.end_line), (1, 1));
    }

    #[test]
    fn stray_end_marker_is_ignored() {
        let source = "<!-- endref -->\n<!-- ref:remove -->\n<!-- endref -->";

        let blocks = scan_blocks(source).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks.iter().next().unwrap().start_line, 1);
    }

    #[test]
    fn end_marker_is_case_sensitive() {
        let source = "<!-- ref:remove -->\n<!-- ENDREF -->";

        assert!(scan_blocks(source).is_err());
    }

    #[test]
    fn errors_on_unterminated_block() {
        let source = "a\n<!-- ref:css /static/ -->\n<link href=\"/static/a.css\">";

        let err = scan_blocks(source).unwrap_err();
        let ScanError::MalformedBlock { line, message } = err;

        assert_eq!(line, 2);
        assert!(message.contains("never closed"));
    }

    #[test]
    fn errors_on_nested_block() {
        let source = "<!-- ref:remove -->\n<!-- ref:js a.js -->\n<!-- endref -->";

        let err = scan_blocks(source).unwrap_err();
        let ScanError::MalformedBlock { line, message } = err;

        assert_eq!(line, 2);
        assert!(message.contains("line 1"));
    }
}
