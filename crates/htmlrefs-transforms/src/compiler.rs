//! Stylesheet compilation for `less` blocks.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use regex::Regex;

/// LESS constructs that plain CSS parsing would pass through or misreport.
static LESS_SYNTAX: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"^\s*@([\w-]+)\s*:", "variable declaration"),
        (r#":(?:[^;{}"']*[\s(,])?@[A-Za-z_-]"#, "variable reference"),
        (r"(?:^|[\s;{}])//", "line comment"),
        (
            r"(?:^|[{;])\s*\.[\w-]+\s*(?:\([^)]*\))?\s*(?:!important\s*)?;",
            "mixin call",
        ),
    ]
    .into_iter()
    .map(|(pattern, what)| (Regex::new(pattern).expect("Invalid LESS syntax regex"), what))
    .collect()
});

/// Error reported by a stylesheet compiler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct CompileError(pub String);

/// Compiles one stylesheet source file to plain CSS.
///
/// Implementations are called once per source file and must not keep state between calls.
pub trait StylesheetCompiler: Send + Sync {
    fn compile(&self, path: &Path, source: &str) -> Result<String, CompileError>;
}

/// Compiler backed by lightningcss. Output is minified by default.
///
/// Only CSS syntax is accepted. Sources still carrying LESS variables, mixin calls or
/// `//` comments are rejected rather than copied through; use [`LesscCompiler`] for those.
#[derive(Debug, Clone, Copy)]
pub struct LightningCompiler {
    pub minify: bool,
}

impl LightningCompiler {
    pub fn new() -> Self {
        Self { minify: true }
    }
}

impl Default for LightningCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl StylesheetCompiler for LightningCompiler {
    fn compile(&self, path: &Path, source: &str) -> Result<String, CompileError> {
        reject_less_syntax(source)?;

        let options = ParserOptions {
            filename: path.display().to_string(),
            ..ParserOptions::default()
        };

        let stylesheet = StyleSheet::parse(source, options)
            .map_err(|e| CompileError(format!("CSS parse error: {}", e)))?;

        let printed = stylesheet
            .to_css(PrinterOptions {
                minify: self.minify,
                ..Default::default()
            })
            .map_err(|e| CompileError(format!("CSS print error: {}", e)))?;

        Ok(printed.code)
    }
}

fn reject_less_syntax(source: &str) -> Result<(), CompileError> {
    for (line_no, line) in source.lines().enumerate() {
        for (re, what) in LESS_SYNTAX.iter() {
            let Some(caps) = re.captures(line) else {
                continue;
            };
            // `@page :first` is CSS
            if caps.get(1).is_some_and(|name| name.as_str() == "page") {
                continue;
            }
            return Err(CompileError(format!(
                "LESS {} on line {} needs a LESS compiler: {}",
                what,
                line_no + 1,
                line.trim()
            )));
        }
    }
    Ok(())
}

/// Compiler that runs an external `lessc` on each source file and reads CSS from stdout.
#[derive(Debug, Clone)]
pub struct LesscCompiler {
    program: PathBuf,
    args: Vec<String>,
}

impl LesscCompiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Extra arguments placed before the source path.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl StylesheetCompiler for LesscCompiler {
    fn compile(&self, path: &Path, _source: &str) -> Result<String, CompileError> {
        let name = self.program.display();
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| CompileError(format!("Failed to execute `{}`: {}", name, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CompileError(format!(
                "`{}` exited with {}: {}",
                name,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| CompileError(format!("`{}` wrote invalid UTF-8: {}", name, e)))
    }
}
