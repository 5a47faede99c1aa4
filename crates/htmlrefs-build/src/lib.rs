//! Document rewriting for htmlrefs.
//!
//! Scans each document for marker blocks, renders every block through the transform
//! registry and writes the rewritten document through an output sink.

pub mod rewriter;
pub mod runner;

pub use rewriter::{RewriteConfig, RewriteError, Rewritten, Rewriter};
pub use runner::{Destination, RunResult, Runner};
