//! Marker scanner for htmlrefs.
//!
//! This crate finds `<!-- ref:<type> <target> -->` / `<!-- endref -->` comment pairs
//! in HTML documents and turns them into ordered, uniquely identified blocks.

pub mod block;
pub mod scanner;

pub use block::{
    leading_whitespace, normalize_newlines, Block, BlockId, BlockKind, BlockSet, LineEnding, Target,
};
pub use scanner::{scan_blocks, ScanError};
